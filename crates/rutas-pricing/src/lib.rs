//! # rutas-pricing: Shipment Pricing
//!
//! - **Tiers** (`tier.rs`): validated, ascending weight bands with a
//!   per-kilometre rate each. An unspecified weight is an explicit mode
//!   charged at the mean rate.
//!
//! - **Engine** (`engine.rs`): `base + rate × distance + services`, in exact
//!   decimals, with negative inputs rejected.
//!
//! - **Orders** (`order.rs`): prices orders from the distance resolved over
//!   the route network. Destination edits recompute the price until the
//!   order is dispatched; after that the price is frozen.
//!
//! ## Crate Policy
//!
//! - Depends on `rutas-core` and `rutas-topology`.
//! - No rounding: amounts keep full decimal precision.

pub mod engine;
pub mod order;
pub mod tier;

pub use engine::{PricingEngine, Quote};
pub use order::{Order, OrderDraft, OrderError, OrderPricer};
pub use tier::{ParcelWeight, PricingError, RateTable, RateTier};
