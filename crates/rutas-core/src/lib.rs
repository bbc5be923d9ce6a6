//! # rutas-core: Foundational Types for the Rutas Stack
//!
//! This crate is the leaf of the Rutas workspace. It defines the records
//! the data layer supplies (branches, segments, routes, the route-segment
//! join table) and the primitives every other crate computes with.
//! Every other crate in the workspace depends on `rutas-core`; it depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `BranchId`, `RouteId`,
//!    `SegmentSeq`, `ShipmentId`, `OrderId`, `DriverId`. A branch id can
//!    never be passed where a route id is expected.
//!
//! 2. **Exact units.** `Distance` and `Amount` wrap `rust_decimal::Decimal`.
//!    Prices are reproducible bit-for-bit across repeated computation, which
//!    order-edit flows rely on.
//!
//! 3. **Catalog assembled once, read many times.** `RouteCatalog::assemble()`
//!    resolves the many-to-many join table and validates references. After
//!    assembly the catalog is immutable reference data.
//!
//! 4. **UTC-only timestamps.** `Timestamp` is UTC with seconds precision.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rutas-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public record types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod catalog;
pub mod error;
pub mod identity;
pub mod temporal;
pub mod units;

// Re-export primary types for ergonomic imports.
pub use catalog::{Branch, BranchRegistry, Route, RouteCatalog, RouteHeader, RouteSegmentLink, Segment};
pub use error::{CatalogError, RutasError};
pub use identity::{BranchId, DriverId, OrderId, RouteId, SegmentSeq, ShipmentId};
pub use temporal::Timestamp;
pub use units::{Amount, Distance};
