//! # Catalog Integrity Audit
//!
//! The linearizer recovers silently from malformed routes. This module
//! surfaces what it recovered from so operators can fix the catalog rows.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use rutas_core::{BranchId, RouteId, SegmentSeq};

use crate::linearize::PathShape;
use crate::network::{NetworkRoute, RouteNetwork};

/// A data-integrity problem found on one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteIssue {
    /// The route has no segments.
    Empty,
    /// No start branch exists; tracking and pricing use storage order.
    Cyclic,
    /// Segments unreachable from the start were dropped from the path.
    OrphanedSegments {
        /// The dropped segments, in storage order.
        segments: Vec<SegmentSeq>,
    },
    /// The recovered path passes through the same branch twice.
    RepeatedBranch {
        /// The first branch seen twice.
        branch: BranchId,
    },
}

impl std::fmt::Display for RouteIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("route has no segments"),
            Self::Cyclic => f.write_str("segments form a cycle; storage order kept"),
            Self::OrphanedSegments { segments } => {
                let list: Vec<String> = segments.iter().map(|s| s.0.to_string()).collect();
                write!(f, "segments unreachable from start: {}", list.join(", "))
            }
            Self::RepeatedBranch { branch } => write!(f, "path revisits {branch}"),
        }
    }
}

/// One finding of the audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteFinding {
    /// Affected route.
    pub route: RouteId,
    /// Route name.
    pub name: String,
    /// The problem.
    pub issue: RouteIssue,
}

/// Audit every route of the network, in enumeration order.
pub fn audit(network: &RouteNetwork) -> Vec<RouteFinding> {
    network.routes().iter().flat_map(audit_route).collect()
}

fn audit_route(route: &NetworkRoute) -> Vec<RouteFinding> {
    let mut issues = Vec::new();
    let linearized = &route.linearized;

    match linearized.shape {
        PathShape::Empty => issues.push(RouteIssue::Empty),
        PathShape::Cyclic => issues.push(RouteIssue::Cyclic),
        PathShape::Disconnected => issues.push(RouteIssue::OrphanedSegments {
            segments: linearized.orphaned.iter().map(|s| s.seq).collect(),
        }),
        PathShape::Simple => {}
    }

    if linearized.shape != PathShape::Cyclic {
        let mut seen = HashSet::new();
        if let Some(branch) = linearized.branches().into_iter().find(|b| !seen.insert(*b)) {
            issues.push(RouteIssue::RepeatedBranch { branch });
        }
    }

    issues
        .into_iter()
        .map(|issue| RouteFinding {
            route: route.id,
            name: route.name.clone(),
            issue,
        })
        .collect()
}
