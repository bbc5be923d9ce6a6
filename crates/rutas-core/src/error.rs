//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types shared across the Rutas stack. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Catalog errors name the offending identifier so operators can locate
//!   the bad row in the data layer.
//! - Component errors (topology, pricing, checkpoint) live next to the code
//!   that raises them and carry the identifiers involved.
//! - Recoverable catalog irregularities (cyclic or disconnected routes) are
//!   not errors. They surface as path shapes on the linearized route.

use thiserror::Error;

use crate::identity::{BranchId, RouteId, SegmentSeq};

/// Top-level error type for the Rutas stack.
#[derive(Error, Debug)]
pub enum RutasError {
    /// The catalog supplied by the data layer is inconsistent.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A value failed validation at a construction boundary.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Error raised while assembling a catalog from data-layer records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two branches share an identifier.
    #[error("duplicate branch id {0}")]
    DuplicateBranch(BranchId),

    /// Two segments share a sequence number.
    #[error("duplicate segment {0}")]
    DuplicateSegment(SegmentSeq),

    /// Two routes share an identifier.
    #[error("duplicate route id {0}")]
    DuplicateRoute(RouteId),

    /// A segment endpoint refers to a branch that is not registered.
    #[error("{segment} refers to unknown {branch}")]
    UnknownBranch {
        /// The offending segment.
        segment: SegmentSeq,
        /// The missing branch.
        branch: BranchId,
    },

    /// A join row refers to a segment that does not exist.
    #[error("{route} links unknown {segment}")]
    UnknownSegment {
        /// The route named in the join row.
        route: RouteId,
        /// The missing segment.
        segment: SegmentSeq,
    },

    /// A join row refers to a route that does not exist.
    #[error("join row for {segment} refers to unknown {route}")]
    UnknownRoute {
        /// The missing route.
        route: RouteId,
        /// The segment named in the join row.
        segment: SegmentSeq,
    },

    /// A segment carries a negative distance.
    #[error("{0} has a negative distance")]
    NegativeDistance(SegmentSeq),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_error_names_identifiers() {
        let err = CatalogError::UnknownBranch {
            segment: SegmentSeq(4),
            branch: BranchId(99),
        };
        assert_eq!(err.to_string(), "segment:4 refers to unknown branch:99");
    }

    #[test]
    fn catalog_error_converts_into_top_level() {
        let err: RutasError = CatalogError::DuplicateRoute(RouteId(1)).into();
        assert!(matches!(err, RutasError::Catalog(_)));
        assert_eq!(err.to_string(), "catalog error: duplicate route id route:1");
    }
}
