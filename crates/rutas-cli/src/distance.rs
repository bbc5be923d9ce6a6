//! # Distance Subcommand
//!
//! Resolves the travel distance between two branches by catalog lookup.

use anyhow::Result;
use clap::Args;

use rutas_core::BranchId;
use rutas_topology::RouteDistance;

use crate::branch_label;
use crate::config::LoadedCatalog;

/// Arguments for the `rutas distance` subcommand.
#[derive(Args, Debug)]
pub struct DistanceArgs {
    /// Origin branch id.
    #[arg(long)]
    pub from: u64,
    /// Destination branch id.
    #[arg(long)]
    pub to: u64,
}

/// Execute the distance subcommand.
pub fn run_distance(args: &DistanceArgs, loaded: &LoadedCatalog) -> Result<u8> {
    let resolved = resolve(args, loaded)?;
    let branches = loaded.catalog.branches();
    println!(
        "{} → {}: {} ({} min, {} segments) via {}",
        branch_label(branches, BranchId(args.from)),
        branch_label(branches, BranchId(args.to)),
        resolved.distance,
        resolved.duration_min,
        resolved.legs,
        resolved.route_id
    );
    Ok(0)
}

fn resolve(args: &DistanceArgs, loaded: &LoadedCatalog) -> Result<RouteDistance> {
    Ok(loaded
        .network
        .resolve_distance(BranchId(args.from), BranchId(args.to))?)
}
