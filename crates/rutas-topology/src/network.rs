//! # Route Network: Distance Resolution
//!
//! Holds every catalog route in linearized form and answers "how far is it
//! from branch A to branch B" by catalog lookup.
//!
//! ## Resolution policy
//!
//! For each route, in catalog enumeration order, the linearized path is
//! scanned for a segment leaving `origin` and, at or after it, a segment
//! arriving at `destination`. The distances of that run of segments are
//! summed. The first route that satisfies the scan wins; this is a stable
//! catalog lookup, not a shortest-path search.
//!
//! The network is built once from the catalog and is read-only afterwards,
//! so it can be shared freely between order-pricing and tracking flows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use rutas_core::{BranchId, Distance, RouteCatalog, RouteId, Segment};

use crate::linearize::{linearize_route, LinearizedRoute};

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised by route lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// No catalog route connects the two branches.
    #[error("no route connects {origin} to {destination}")]
    NotReachable {
        /// Requested origin branch.
        origin: BranchId,
        /// Requested destination branch.
        destination: BranchId,
    },

    /// The route is not in the catalog.
    #[error("unknown {0}")]
    UnknownRoute(RouteId),

    /// The summed segment distances exceed the decimal range.
    #[error("distance along {0} overflows")]
    DistanceOverflow(RouteId),
}

// ─── Results ─────────────────────────────────────────────────────────

/// The resolved travel between two branches along one catalog route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDistance {
    /// The route the distance was measured along.
    pub route_id: RouteId,
    /// Summed segment distance.
    pub distance: Distance,
    /// Summed estimated duration in minutes.
    pub duration_min: u64,
    /// Number of segments travelled.
    pub legs: usize,
}

/// A catalog route with its linearized path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRoute {
    /// Route identifier.
    pub id: RouteId,
    /// Route name.
    pub name: String,
    /// Linearized segments.
    pub linearized: LinearizedRoute,
}

impl NetworkRoute {
    /// The ordered path.
    pub fn path(&self) -> &[Segment] {
        &self.linearized.path
    }

    /// Whether this route travels from `a` to `b`.
    pub fn contains_branches(&self, a: BranchId, b: BranchId) -> bool {
        route_contains_branches(&self.linearized, a, b)
    }
}

/// Locate the run of segments from a segment leaving `origin` through the
/// first segment, at or after it, arriving at `destination`.
///
/// Returns inclusive `(first, last)` indices into `path`.
pub fn leg_span(path: &[Segment], origin: BranchId, destination: BranchId) -> Option<(usize, usize)> {
    path.iter()
        .enumerate()
        .filter(|(_, s)| s.origin == origin)
        .find_map(|(first, _)| {
            path[first..]
                .iter()
                .position(|s| s.destination == destination)
                .map(|offset| (first, first + offset))
        })
}

/// Whether a linearized route travels from `a` to `b`.
pub fn route_contains_branches(route: &LinearizedRoute, a: BranchId, b: BranchId) -> bool {
    leg_span(&route.path, a, b).is_some()
}

// ─── Network ─────────────────────────────────────────────────────────

/// Every catalog route in linearized form, in enumeration order.
#[derive(Debug, Clone, Default)]
pub struct RouteNetwork {
    routes: Vec<NetworkRoute>,
}

impl RouteNetwork {
    /// Linearize every route of the catalog.
    pub fn from_catalog(catalog: &RouteCatalog) -> Self {
        let routes = catalog
            .routes()
            .iter()
            .map(|route| NetworkRoute {
                id: route.id,
                name: route.name.clone(),
                linearized: linearize_route(&route.segments),
            })
            .collect();
        Self { routes }
    }

    /// Routes in enumeration order.
    pub fn routes(&self) -> &[NetworkRoute] {
        &self.routes
    }

    /// Look up a route.
    pub fn route(&self, id: RouteId) -> Option<&NetworkRoute> {
        self.routes.iter().find(|r| r.id == id)
    }

    /// Look up a route, failing if it is unknown.
    pub fn require_route(&self, id: RouteId) -> Result<&NetworkRoute, TopologyError> {
        self.route(id).ok_or(TopologyError::UnknownRoute(id))
    }

    /// Resolve the travel distance between two branches.
    ///
    /// # Errors
    ///
    /// [`TopologyError::NotReachable`] when no route travels from `origin`
    /// to `destination`; [`TopologyError::DistanceOverflow`] when the first
    /// matching run of segments cannot be summed.
    pub fn resolve_distance(
        &self,
        origin: BranchId,
        destination: BranchId,
    ) -> Result<RouteDistance, TopologyError> {
        for route in &self.routes {
            let path = route.path();
            if let Some((first, last)) = leg_span(path, origin, destination) {
                let legs = &path[first..=last];
                let distance = Distance::checked_sum(legs.iter().map(|s| s.distance))
                    .ok_or(TopologyError::DistanceOverflow(route.id))?;
                let resolved = RouteDistance {
                    route_id: route.id,
                    distance,
                    duration_min: legs.iter().map(|s| u64::from(s.duration_min)).sum(),
                    legs: legs.len(),
                };
                debug!(
                    route = %route.id,
                    %origin,
                    %destination,
                    distance = %resolved.distance,
                    "resolved distance"
                );
                return Ok(resolved);
            }
        }
        Err(TopologyError::NotReachable {
            origin,
            destination,
        })
    }

    /// Whether the given route travels from `a` to `b`. Unknown routes
    /// contain nothing.
    pub fn route_contains_branches(&self, route: RouteId, a: BranchId, b: BranchId) -> bool {
        self.route(route)
            .is_some_and(|r| r.contains_branches(a, b))
    }

    /// Pick a route for a shipment leaving `origin` with orders bound for
    /// `destinations`.
    ///
    /// The most frequent destination is chosen (ties go to the one listed
    /// first), then the first route travelling from `origin` to it.
    pub fn candidate_route(
        &self,
        origin: BranchId,
        destinations: &[BranchId],
    ) -> Option<&NetworkRoute> {
        let target = most_frequent(destinations)?;
        let found = self.routes.iter().find(|r| r.contains_branches(origin, target));
        debug!(
            %origin,
            %target,
            route = ?found.map(|r| r.id),
            "candidate route lookup"
        );
        found
    }
}

fn most_frequent(items: &[BranchId]) -> Option<BranchId> {
    let mut counts: HashMap<BranchId, usize> = HashMap::new();
    for item in items {
        *counts.entry(*item).or_default() += 1;
    }
    let mut best: Option<(BranchId, usize)> = None;
    for item in items {
        let count = counts[item];
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((*item, count));
        }
    }
    best.map(|(id, _)| id)
}

// ─── Tests ───────────────────────────────────────────────────────────
