//! # rutas-cli: Operator Tooling for the Rutas Stack
//!
//! Provides the `rutas` command-line interface over a catalog file (see
//! [`config`] for the format).
//!
//! ## Subcommands
//!
//! - `rutas routes`: Linearized routes with totals and shape.
//! - `rutas audit`: Catalog irregularities; exit code 2 when any.
//! - `rutas distance`: Distance between two branches.
//! - `rutas quote`: Shipment price between two branches.
//! - `rutas checkpoints`: Segment-state preview for a route.
//!
//! ```bash
//! rutas --catalog rutas.yaml distance --from 1 --to 3
//! rutas quote --from 1 --to 3 --weight 8 --service insurance
//! rutas checkpoints --route 1 --current 2 --confirm 0
//! ```

pub mod audit;
pub mod checkpoints;
pub mod config;
pub mod distance;
pub mod quote;
pub mod routes;

use rutas_core::{BranchId, BranchRegistry};

/// `"<id> (<city>)"` for registered branches, the bare id otherwise.
pub fn branch_label(branches: &BranchRegistry, id: BranchId) -> String {
    match branches.get(id) {
        Some(branch) => format!("{} ({})", id.0, branch.city),
        None => id.0.to_string(),
    }
}
