//! # Checkpoints Subcommand
//!
//! Previews a shipment's segment states on a route: the initial state for
//! a given current branch, and optionally the state after confirming
//! arrival at a segment. Nothing is persisted.

use anyhow::{bail, Result};
use clap::Args;

use rutas_core::{BranchId, RouteId, Segment};
use rutas_tracker::{confirm_arrival, current_index, states_at, SegmentState};

use crate::branch_label;
use crate::config::LoadedCatalog;

/// Arguments for the `rutas checkpoints` subcommand.
#[derive(Args, Debug)]
pub struct CheckpointsArgs {
    /// Route id.
    #[arg(long)]
    pub route: u64,
    /// The shipment's current branch id. Defaults to the first segment.
    #[arg(long)]
    pub current: Option<u64>,
    /// Segment index (0-based) to confirm arrival at.
    #[arg(long)]
    pub confirm: Option<usize>,
}

/// Execute the checkpoints subcommand.
pub fn run_checkpoints(args: &CheckpointsArgs, loaded: &LoadedCatalog) -> Result<u8> {
    print!("{}", render_checkpoints(args, loaded)?);
    Ok(0)
}

fn render_checkpoints(args: &CheckpointsArgs, loaded: &LoadedCatalog) -> Result<String> {
    let route = loaded.network.require_route(RouteId(args.route))?;
    let path = route.path();
    if path.is_empty() {
        bail!("{} has no segments", route.id);
    }

    let (index, states, branch) = match args.confirm {
        Some(i) => {
            let arrival = confirm_arrival(path, i)?;
            (arrival.index, arrival.states, Some(arrival.current_branch))
        }
        None => {
            let current = args.current.map(BranchId);
            let index = current_index(path, current);
            (index, states_at(path.len(), index), current)
        }
    };

    let branches = loaded.catalog.branches();
    let mut out = format!("{} {:?}\n", route.id, route.name);
    for (i, (segment, state)) in path.iter().zip(&states).enumerate() {
        out.push_str(&render_segment(i, segment, *state, loaded));
    }
    match branch {
        Some(b) => out.push_str(&format!("current branch: {}\n", branch_label(branches, b))),
        None => out.push_str("current branch: unset\n"),
    }
    if index + 1 == path.len() {
        out.push_str("on last segment: shipment can be finalized\n");
    }
    Ok(out)
}

fn render_segment(i: usize, segment: &Segment, state: SegmentState, loaded: &LoadedCatalog) -> String {
    let branches = loaded.catalog.branches();
    format!(
        "  [{i}] {:<9} {} → {}  {}\n",
        state.to_string(),
        branch_label(branches, segment.origin),
        branch_label(branches, segment.destination),
        segment.distance
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::{write, CATALOG_YAML};

    fn loaded(dir: &tempfile::TempDir) -> LoadedCatalog {
        LoadedCatalog::load(&write(dir, "rutas.yaml", CATALOG_YAML)).unwrap()
    }

    #[test]
    fn initial_preview_from_current_branch() {
        let dir = tempfile::tempdir().unwrap();
        let out = render_checkpoints(
            &CheckpointsArgs {
                route: 1,
                current: Some(2),
                confirm: None,
            },
            &loaded(&dir),
        )
        .unwrap();
        assert!(out.contains("[0] completed"));
        assert!(out.contains("[1] current"));
        assert!(out.contains("current branch: 2 (Córdoba)"));
        assert!(out.contains("can be finalized"));
    }

    #[test]
    fn confirm_preview_jumps_backwards() {
        let dir = tempfile::tempdir().unwrap();
        let out = render_checkpoints(
            &CheckpointsArgs {
                route: 1,
                current: Some(2),
                confirm: Some(0),
            },
            &loaded(&dir),
        )
        .unwrap();
        assert!(out.contains("[0] current"));
        assert!(out.contains("[1] pending"));
        assert!(out.contains("current branch: 1 (Rosario)"));
        assert!(!out.contains("can be finalized"));
    }

    #[test]
    fn unknown_route_and_bad_index_fail() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = loaded(&dir);
        let missing = CheckpointsArgs {
            route: 42,
            current: None,
            confirm: None,
        };
        assert!(run_checkpoints(&missing, &catalog).is_err());
        let past_end = CheckpointsArgs {
            route: 1,
            current: None,
            confirm: Some(5),
        };
        let err = run_checkpoints(&past_end, &catalog).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
