//! # Route Linearizer
//!
//! Reconstructs the ordered branch-to-branch walk from a route's unordered
//! segment set.
//!
//! ## Algorithm
//!
//! 1. The start segment is the first segment (in input order) whose origin
//!    is not the destination of any segment.
//! 2. From the start, repeatedly append the first not-yet-placed segment (in
//!    input order) whose origin equals the current tail branch.
//! 3. Stop when no successor exists or every segment has been placed.
//!
//! ## Irregular input
//!
//! - **Cycle** (no branch without an incoming edge): the input is returned
//!   verbatim, in storage order. Shape `Cyclic`.
//! - **Disconnected or branching** segments never reached from the start are
//!   left out of the path and reported in `orphaned`. Shape `Disconnected`.
//!
//! Neither case is an error. Both are logged at `warn`.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::warn;

use rutas_core::{BranchId, Distance, Segment};

/// How a segment set related to the path recovered from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathShape {
    /// No segments.
    Empty,
    /// Every segment was chained into one walk from the start.
    Simple,
    /// Some segments were not reachable from the start and were left out.
    Disconnected,
    /// No start branch exists; the input order was kept as-is.
    Cyclic,
}

impl std::fmt::Display for PathShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Empty => "empty",
            Self::Simple => "simple",
            Self::Disconnected => "disconnected",
            Self::Cyclic => "cyclic",
        };
        f.write_str(s)
    }
}

/// The ordered walk recovered from a segment set, plus what was left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearizedRoute {
    /// Segments in travel order.
    pub path: Vec<Segment>,
    /// Segments not reachable from the start, in input order.
    pub orphaned: Vec<Segment>,
    /// Classification of the input.
    pub shape: PathShape,
}

impl LinearizedRoute {
    fn empty() -> Self {
        Self {
            path: Vec::new(),
            orphaned: Vec::new(),
            shape: PathShape::Empty,
        }
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of segments in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// First branch of the walk.
    pub fn start(&self) -> Option<BranchId> {
        self.path.first().map(|s| s.origin)
    }

    /// Last branch of the walk.
    pub fn end(&self) -> Option<BranchId> {
        self.path.last().map(|s| s.destination)
    }

    /// Branches visited in order: the start, then every segment destination.
    pub fn branches(&self) -> Vec<BranchId> {
        let mut out = Vec::with_capacity(self.path.len() + 1);
        if let Some(start) = self.start() {
            out.push(start);
        }
        out.extend(self.path.iter().map(|s| s.destination));
        out
    }

    /// Sum of the path's segment distances, or `None` if it overflows.
    pub fn total_distance(&self) -> Option<Distance> {
        Distance::checked_sum(self.path.iter().map(|s| s.distance))
    }

    /// Sum of the path's estimated segment durations, in minutes.
    pub fn total_duration_min(&self) -> u64 {
        self.path.iter().map(|s| u64::from(s.duration_min)).sum()
    }
}

/// Order a route's segments into a walk from its start branch.
///
/// Returns only the path; see [`linearize_route`] for the orphaned
/// segments and the shape classification.
pub fn linearize(segments: &[Segment]) -> Vec<Segment> {
    linearize_route(segments).path
}

/// Order a route's segments and report anything left out.
pub fn linearize_route(segments: &[Segment]) -> LinearizedRoute {
    if segments.is_empty() {
        return LinearizedRoute::empty();
    }

    let destinations: HashSet<BranchId> = segments.iter().map(|s| s.destination).collect();
    let Some(start) = segments
        .iter()
        .position(|s| !destinations.contains(&s.origin))
    else {
        warn!(
            segments = segments.len(),
            "no start branch found; keeping storage order"
        );
        return LinearizedRoute {
            path: segments.to_vec(),
            orphaned: Vec::new(),
            shape: PathShape::Cyclic,
        };
    };

    // Per-origin queues in input order give first-match tie-breaking.
    let mut by_origin: HashMap<BranchId, VecDeque<usize>> = HashMap::new();
    for (idx, segment) in segments.iter().enumerate() {
        by_origin.entry(segment.origin).or_default().push_back(idx);
    }

    let mut placed = vec![false; segments.len()];
    let mut order = Vec::with_capacity(segments.len());
    let mut next = Some(start);

    while let Some(idx) = next {
        placed[idx] = true;
        order.push(idx);
        if order.len() == segments.len() {
            break;
        }
        let tail = segments[idx].destination;
        next = by_origin.get_mut(&tail).and_then(|queue| {
            while let Some(candidate) = queue.pop_front() {
                if !placed[candidate] {
                    return Some(candidate);
                }
            }
            None
        });
    }

    let path: Vec<Segment> = order.iter().map(|&i| segments[i].clone()).collect();
    let orphaned: Vec<Segment> = segments
        .iter()
        .zip(&placed)
        .filter(|(_, was_placed)| !**was_placed)
        .map(|(s, _)| s.clone())
        .collect();

    let shape = if orphaned.is_empty() {
        PathShape::Simple
    } else {
        warn!(
            orphaned = orphaned.len(),
            placed = path.len(),
            "segments unreachable from the start branch were left out"
        );
        PathShape::Disconnected
    };

    LinearizedRoute {
        path,
        orphaned,
        shape,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
