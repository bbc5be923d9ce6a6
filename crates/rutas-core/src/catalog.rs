//! # Route Catalog
//!
//! Reference data supplied by the data layer: branches, directed segments,
//! named routes, and the many-to-many join rows that attach segments to
//! routes. A segment may belong to zero, one, or many routes.
//!
//! ## Invariants
//!
//! - Branch, segment, and route identifiers are unique.
//! - Every segment endpoint is a registered branch.
//! - Every join row names an existing route and segment.
//! - Route enumeration order is the order the data layer supplied. Distance
//!   resolution is first-match-wins in this order, so it is preserved.
//! - Segment order within a route is storage order. It is NOT assumed to be
//!   path order; linearization happens downstream in `rutas-topology`.
//!
//! Whether a route's segments form a well-formed simple path is checked at
//! read time by the linearizer, not here. Malformed routes are accepted.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::identity::{BranchId, RouteId, SegmentSeq};
use crate::units::Distance;

// ─── Records ─────────────────────────────────────────────────────────

/// A physical depot or stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Branch identifier.
    pub id: BranchId,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
}

/// One directed leg between two branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Sequence number of the segment in the segment table.
    pub seq: SegmentSeq,
    /// Branch the leg departs from.
    pub origin: BranchId,
    /// Branch the leg arrives at.
    pub destination: BranchId,
    /// Travel distance.
    pub distance: Distance,
    /// Estimated travel time in minutes.
    pub duration_min: u32,
}

impl Segment {
    /// Build a segment record.
    pub fn new(
        seq: SegmentSeq,
        origin: BranchId,
        destination: BranchId,
        distance: Distance,
        duration_min: u32,
    ) -> Self {
        Self {
            seq,
            origin,
            destination,
            distance,
            duration_min,
        }
    }
}

/// A route row as stored, before its segments are attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteHeader {
    /// Route identifier.
    pub id: RouteId,
    /// Human-readable route name.
    pub name: String,
}

/// A join row attaching a segment to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSegmentLink {
    /// The route.
    pub route: RouteId,
    /// The segment.
    pub segment: SegmentSeq,
}

/// A named, curated bag of segments intended to form one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Route identifier.
    pub id: RouteId,
    /// Human-readable route name.
    pub name: String,
    /// Segments in storage order.
    pub segments: Vec<Segment>,
}

impl Route {
    /// Build a route from its segments in storage order.
    pub fn new(id: RouteId, name: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            id,
            name: name.into(),
            segments,
        }
    }
}

// ─── Branch Registry ─────────────────────────────────────────────────

/// Flat lookup of registered branches.
#[derive(Debug, Clone, Default)]
pub struct BranchRegistry {
    branches: BTreeMap<BranchId, Branch>,
}

impl BranchRegistry {
    /// Build a registry, rejecting duplicate identifiers.
    pub fn new(branches: impl IntoIterator<Item = Branch>) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for branch in branches {
            let id = branch.id;
            if map.insert(id, branch).is_some() {
                return Err(CatalogError::DuplicateBranch(id));
            }
        }
        Ok(Self { branches: map })
    }

    /// Look up a branch.
    pub fn get(&self, id: BranchId) -> Option<&Branch> {
        self.branches.get(&id)
    }

    /// Whether a branch is registered.
    pub fn contains(&self, id: BranchId) -> bool {
        self.branches.contains_key(&id)
    }

    /// All branches in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Branch> {
        self.branches.values()
    }

    /// Number of registered branches.
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Whether no branches are registered.
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

// ─── Route Catalog ───────────────────────────────────────────────────

/// Validated, read-only catalog of branches and routes.
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    branches: BranchRegistry,
    routes: Vec<Route>,
}

impl RouteCatalog {
    /// Assemble a catalog from the data layer's flat tables.
    ///
    /// Join rows are applied in the order given, so each route's segments
    /// keep the storage order of its join rows.
    pub fn assemble(
        branches: BranchRegistry,
        segments: Vec<Segment>,
        routes: Vec<RouteHeader>,
        links: &[RouteSegmentLink],
    ) -> Result<Self, CatalogError> {
        let mut segment_table: HashMap<SegmentSeq, Segment> = HashMap::with_capacity(segments.len());
        for segment in segments {
            validate_segment(&branches, &segment)?;
            let seq = segment.seq;
            if segment_table.insert(seq, segment).is_some() {
                return Err(CatalogError::DuplicateSegment(seq));
            }
        }

        let mut position: HashMap<RouteId, usize> = HashMap::with_capacity(routes.len());
        let mut assembled: Vec<Route> = Vec::with_capacity(routes.len());
        for header in routes {
            if position.insert(header.id, assembled.len()).is_some() {
                return Err(CatalogError::DuplicateRoute(header.id));
            }
            assembled.push(Route::new(header.id, header.name, Vec::new()));
        }

        for link in links {
            let idx = *position.get(&link.route).ok_or(CatalogError::UnknownRoute {
                route: link.route,
                segment: link.segment,
            })?;
            let segment = segment_table
                .get(&link.segment)
                .ok_or(CatalogError::UnknownSegment {
                    route: link.route,
                    segment: link.segment,
                })?;
            assembled[idx].segments.push(segment.clone());
        }

        Ok(Self {
            branches,
            routes: assembled,
        })
    }

    /// Build a catalog from routes whose segments are already attached.
    pub fn from_routes(branches: BranchRegistry, routes: Vec<Route>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(routes.len());
        for route in &routes {
            if !seen.insert(route.id) {
                return Err(CatalogError::DuplicateRoute(route.id));
            }
            for segment in &route.segments {
                validate_segment(&branches, segment)?;
            }
        }
        Ok(Self { branches, routes })
    }

    /// The branch registry.
    pub fn branches(&self) -> &BranchRegistry {
        &self.branches
    }

    /// Routes in enumeration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Look up a route by identifier.
    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == id)
    }
}

fn validate_segment(branches: &BranchRegistry, segment: &Segment) -> Result<(), CatalogError> {
    for branch in [segment.origin, segment.destination] {
        if !branches.contains(branch) {
            return Err(CatalogError::UnknownBranch {
                segment: segment.seq,
                branch,
            });
        }
    }
    if segment.distance.is_negative() {
        return Err(CatalogError::NegativeDistance(segment.seq));
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────
