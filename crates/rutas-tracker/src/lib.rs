//! # rutas-tracker: Shipment Progress
//!
//! - **Shipment** (`shipment.rs`): the shipment aggregate. Owns the
//!   current-branch pointer and the `Planned → InTransit → Finished`
//!   status, with a transition log.
//!
//! - **Checkpoint** (`checkpoint.rs`): per-segment `completed / current /
//!   pending` states over the shipment's linearized route, driver-confirmed
//!   arrivals (any index, backwards included), and finalization. Side
//!   effects go through the [`ShipmentMutations`] port, one call per
//!   transition.
//!
//! ## Design
//!
//! The tracker owns its shipment and takes `&mut self` for every
//! transition, so there is no ambient shared state and no second
//! confirmation can be issued while one is pending. State is committed
//! only after the port accepts the mutation.

pub mod checkpoint;
pub mod shipment;

pub use checkpoint::{
    confirm_arrival, current_index, initial_state, states_at, Arrival, CheckpointError,
    CheckpointTracker, SegmentState, ShipmentMutations,
};
pub use shipment::{Shipment, ShipmentError, ShipmentStatus, ShipmentTransitionRecord};
