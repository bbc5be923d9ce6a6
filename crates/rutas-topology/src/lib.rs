//! # rutas-topology: Route Topology
//!
//! Turns the catalog's unordered segment bags into ordered walks and answers
//! distance questions over them:
//!
//! - **Linearize** (`linearize.rs`): recovers the start-to-end walk from a
//!   route's segments. Cycles fall back to storage order; unreachable
//!   segments are reported as orphaned.
//!
//! - **Network** (`network.rs`): the whole catalog in linearized form.
//!   Resolves the distance between two branches, first-match-wins in route
//!   enumeration order, and selects a candidate route for a shipment.
//!
//! - **Audit** (`audit.rs`): lists the irregularities the linearizer
//!   recovered from, per route.
//!
//! ## Crate Policy
//!
//! - Depends on `rutas-core` only.
//! - Everything here is pure, synchronous computation over read-only data.

pub mod audit;
pub mod linearize;
pub mod network;

pub use audit::{audit, RouteFinding, RouteIssue};
pub use linearize::{linearize, linearize_route, LinearizedRoute, PathShape};
pub use network::{
    leg_span, route_contains_branches, NetworkRoute, RouteDistance, RouteNetwork, TopologyError,
};
