//! # Routes Subcommand
//!
//! Lists every catalog route in enumeration order with its linearized
//! branch sequence, totals, and shape.

use anyhow::Result;
use clap::Args;

use rutas_core::BranchRegistry;
use rutas_topology::{NetworkRoute, PathShape};

use crate::branch_label;
use crate::config::LoadedCatalog;

/// Arguments for the `rutas routes` subcommand.
#[derive(Args, Debug)]
pub struct RoutesArgs {
    /// Print the linearized routes as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the routes subcommand.
pub fn run_routes(args: &RoutesArgs, loaded: &LoadedCatalog) -> Result<u8> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(loaded.network.routes())?);
    } else {
        print!("{}", render_routes(loaded));
    }
    Ok(0)
}

/// Human-readable route listing.
pub fn render_routes(loaded: &LoadedCatalog) -> String {
    let routes = loaded.network.routes();
    if routes.is_empty() {
        return "No routes in catalog.\n".to_string();
    }
    let mut out = format!("Routes ({}):\n", routes.len());
    for route in routes {
        out.push_str(&render_route(route, loaded.catalog.branches()));
    }
    out
}

fn render_route(route: &NetworkRoute, branches: &BranchRegistry) -> String {
    let linearized = &route.linearized;
    let mut out = format!("  {} {:?} [{}]\n", route.id, route.name, linearized.shape);
    if linearized.shape == PathShape::Empty {
        return out;
    }
    let walk: Vec<String> = linearized
        .branches()
        .into_iter()
        .map(|b| branch_label(branches, b))
        .collect();
    out.push_str(&format!("    {}\n", walk.join(" → ")));
    let distance = linearized
        .total_distance()
        .map_or_else(|| "distance overflow".to_string(), |d| d.to_string());
    out.push_str(&format!(
        "    {} segments, {}, {} min\n",
        linearized.len(),
        distance,
        linearized.total_duration_min()
    ));
    if !linearized.orphaned.is_empty() {
        let orphaned: Vec<String> = linearized.orphaned.iter().map(|s| s.seq.to_string()).collect();
        out.push_str(&format!("    orphaned: {}\n", orphaned.join(", ")));
    }
    out
}
