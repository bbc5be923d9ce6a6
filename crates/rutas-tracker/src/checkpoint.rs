//! # Checkpoint Tracker
//!
//! Derives per-segment progress of a shipment along its linearized route
//! and accepts driver-confirmed arrivals.
//!
//! ## Segment states
//!
//! For a path of `N` segments and a current index `i`, segments `0..i` are
//! `Completed`, segment `i` is `Current`, and `i+1..N` are `Pending`. Every
//! transition re-derives the whole vector from the new index, so confirming
//! the same index twice yields the same state.
//!
//! ## Transitions
//!
//! - **confirm arrival at `i`**: any index may be targeted, backwards jumps
//!   included. Moves the shipment's current-branch pointer to the origin of
//!   segment `i` through exactly one `update_current_branch` call.
//! - **finalize**: only once the last segment is current. One
//!   `update_status(Finished)` call; the tracker is terminal afterwards.
//!
//! ## Repeated branches
//!
//! The shipment persists only a branch, not an index. On a path that
//! leaves the same branch twice (reported by the topology audit as a
//! repeated branch), an open tracker keeps the index it confirmed, but a
//! tracker reopened from the persisted branch resolves to the first segment
//! leaving it and may show an earlier position than the one confirmed.
//!
//! In-memory state is committed only after the external mutation returns
//! `Ok`. A failed mutation leaves the tracker exactly as it was, and the
//! collaborator's error is handed back unchanged.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use rutas_core::{BranchId, RouteId, Segment, ShipmentId};
use rutas_topology::{NetworkRoute, RouteNetwork};

use crate::shipment::{Shipment, ShipmentStatus};

// ─── Segment State ───────────────────────────────────────────────────

/// Progress of one segment of the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentState {
    /// Already travelled.
    Completed,
    /// The vehicle is on this segment.
    Current,
    /// Not yet reached.
    Pending,
}

impl std::fmt::Display for SegmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Completed => "completed",
            Self::Current => "current",
            Self::Pending => "pending",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised by checkpoint operations.
///
/// `E` is the error type of the [`ShipmentMutations`] collaborator. The
/// pure helpers never call one and use the default.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckpointError<E = Infallible> {
    /// No shipment is assigned.
    #[error("no active shipment")]
    NoActiveShipment,

    /// The shipment's route is unknown or has no segments.
    #[error("{shipment} has no resolvable route ({route})")]
    InvalidRoute {
        /// The shipment.
        shipment: ShipmentId,
        /// Its assigned route.
        route: RouteId,
    },

    /// The shipment is finished; no further checkpoints are accepted.
    #[error("{0} is finished")]
    ShipmentFinished(ShipmentId),

    /// The confirmed index is past the end of the route.
    #[error("segment index {index} out of range for a route of {len} segments")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Path length.
        len: usize,
    },

    /// Finalization requires the last segment to be current.
    #[error("cannot finalize: current segment is {current}, last is {last}")]
    NotOnLastSegment {
        /// Current index.
        current: usize,
        /// Index of the last segment.
        last: usize,
    },

    /// The external mutation failed.
    #[error(transparent)]
    Mutation(E),
}

// ─── Pure Derivation ─────────────────────────────────────────────────

/// Result of confirming an arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrival {
    /// Index of the segment that is now current.
    pub index: usize,
    /// The shipment's new current branch: the origin of that segment.
    pub current_branch: BranchId,
    /// Re-derived state of every segment.
    pub states: Vec<SegmentState>,
}

/// Index of the segment whose origin is `current_branch`, or `0` when the
/// branch is unset or is not the origin of any segment.
///
/// When several segments leave the branch, the first one is chosen.
pub fn current_index(path: &[Segment], current_branch: Option<BranchId>) -> usize {
    current_branch
        .and_then(|branch| path.iter().position(|s| s.origin == branch))
        .unwrap_or(0)
}

/// Segment states for a path of `len` segments with `index` current.
pub fn states_at(len: usize, index: usize) -> Vec<SegmentState> {
    (0..len)
        .map(|i| match i.cmp(&index) {
            std::cmp::Ordering::Less => SegmentState::Completed,
            std::cmp::Ordering::Equal => SegmentState::Current,
            std::cmp::Ordering::Greater => SegmentState::Pending,
        })
        .collect()
}

/// Segment states of a shipment positioned at `current_branch`.
pub fn initial_state(path: &[Segment], current_branch: Option<BranchId>) -> Vec<SegmentState> {
    states_at(path.len(), current_index(path, current_branch))
}

/// State after confirming arrival at segment `index`.
pub fn confirm_arrival(path: &[Segment], index: usize) -> Result<Arrival, CheckpointError> {
    arrival(path, index).ok_or(CheckpointError::IndexOutOfRange {
        index,
        len: path.len(),
    })
}

fn arrival(path: &[Segment], index: usize) -> Option<Arrival> {
    path.get(index).map(|segment| Arrival {
        index,
        current_branch: segment.origin,
        states: states_at(path.len(), index),
    })
}

// ─── Mutation Port ───────────────────────────────────────────────────

/// The persistence collaborator that receives checkpoint side effects.
///
/// Each tracker transition issues exactly one of these calls.
pub trait ShipmentMutations {
    /// The collaborator's failure type, propagated unchanged.
    type Error: std::error::Error + 'static;

    /// Persist the shipment's new current branch.
    fn update_current_branch(&mut self, shipment: ShipmentId, branch: BranchId) -> Result<(), Self::Error>;

    /// Persist the shipment's new status.
    fn update_status(&mut self, shipment: ShipmentId, status: ShipmentStatus) -> Result<(), Self::Error>;
}

impl<T: ShipmentMutations + ?Sized> ShipmentMutations for &mut T {
    type Error = T::Error;

    fn update_current_branch(&mut self, shipment: ShipmentId, branch: BranchId) -> Result<(), Self::Error> {
        (**self).update_current_branch(shipment, branch)
    }

    fn update_status(&mut self, shipment: ShipmentId, status: ShipmentStatus) -> Result<(), Self::Error> {
        (**self).update_status(shipment, status)
    }
}

// ─── Tracker ─────────────────────────────────────────────────────────

/// Checkpoint progress of one shipment.
///
/// Owns the shipment for the lifetime of the driver session. All mutators
/// take `&mut self`, so at most one confirmation per shipment is in flight.
#[derive(Debug)]
pub struct CheckpointTracker<'n, P: ShipmentMutations> {
    shipment: Shipment,
    route: &'n NetworkRoute,
    port: P,
    current: usize,
    states: Vec<SegmentState>,
}

impl<'n, P: ShipmentMutations> CheckpointTracker<'n, P> {
    /// Open a tracker for the assigned shipment.
    ///
    /// # Errors
    ///
    /// - [`CheckpointError::NoActiveShipment`] when `shipment` is `None`.
    /// - [`CheckpointError::ShipmentFinished`] when it is already finished.
    /// - [`CheckpointError::InvalidRoute`] when its route is not in the
    ///   network or has no segments.
    pub fn open(
        shipment: Option<Shipment>,
        network: &'n RouteNetwork,
        port: P,
    ) -> Result<Self, CheckpointError<P::Error>> {
        let shipment = shipment.ok_or(CheckpointError::NoActiveShipment)?;
        if shipment.is_terminal() {
            return Err(CheckpointError::ShipmentFinished(shipment.id()));
        }
        let route = network
            .route(shipment.route_id())
            .filter(|r| !r.path().is_empty())
            .ok_or(CheckpointError::InvalidRoute {
                shipment: shipment.id(),
                route: shipment.route_id(),
            })?;
        let current = current_index(route.path(), shipment.current_branch());
        let states = states_at(route.path().len(), current);
        debug!(shipment = %shipment.id(), route = %route.id, current, "checkpoint tracker opened");
        Ok(Self {
            shipment,
            route,
            port,
            current,
            states,
        })
    }

    /// The tracked shipment.
    pub fn shipment(&self) -> &Shipment {
        &self.shipment
    }

    /// The shipment's route.
    pub fn route(&self) -> &NetworkRoute {
        self.route
    }

    /// Current segment states. Empty once finalized.
    pub fn states(&self) -> &[SegmentState] {
        &self.states
    }

    /// Index of the current segment.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The segment the vehicle is on, until finalized.
    pub fn current_segment(&self) -> Option<&Segment> {
        if self.shipment.is_terminal() {
            return None;
        }
        self.route.path().get(self.current)
    }

    /// Whether the current segment is the last one of the route.
    pub fn is_last_segment(&self) -> bool {
        self.current + 1 == self.route.path().len()
    }

    /// Whether finalization would be accepted now.
    pub fn can_finalize(&self) -> bool {
        !self.shipment.is_terminal() && self.is_last_segment()
    }

    /// Confirm arrival at segment `index`.
    ///
    /// Re-confirming the current index while the shipment's pointer already
    /// matches issues no mutation.
    pub fn confirm_arrival(&mut self, index: usize) -> Result<Arrival, CheckpointError<P::Error>> {
        self.require_active()?;
        let path = self.route.path();
        let next = arrival(path, index).ok_or(CheckpointError::IndexOutOfRange {
            index,
            len: path.len(),
        })?;

        if index == self.current && self.shipment.current_branch() == Some(next.current_branch) {
            debug!(shipment = %self.shipment.id(), index, "arrival already confirmed");
            return Ok(next);
        }

        self.port
            .update_current_branch(self.shipment.id(), next.current_branch)
            .map_err(CheckpointError::Mutation)?;

        debug!(
            shipment = %self.shipment.id(),
            from = self.current,
            to = index,
            branch = %next.current_branch,
            "arrival confirmed"
        );
        self.shipment.set_current_branch(next.current_branch);
        self.current = index;
        self.states.clone_from(&next.states);
        Ok(next)
    }

    /// Finish the shipment. Requires the last segment to be current.
    pub fn finalize(&mut self) -> Result<ShipmentStatus, CheckpointError<P::Error>> {
        self.require_active()?;
        if !self.is_last_segment() {
            return Err(CheckpointError::NotOnLastSegment {
                current: self.current,
                last: self.route.path().len() - 1,
            });
        }

        self.port
            .update_status(self.shipment.id(), ShipmentStatus::Finished)
            .map_err(CheckpointError::Mutation)?;

        self.shipment.mark_finished();
        self.states.clear();
        info!(shipment = %self.shipment.id(), route = %self.route.id, "shipment finished");
        Ok(ShipmentStatus::Finished)
    }

    /// Release the shipment and the mutation port.
    pub fn into_parts(self) -> (Shipment, P) {
        (self.shipment, self.port)
    }

    fn require_active(&self) -> Result<(), CheckpointError<P::Error>> {
        if self.shipment.is_terminal() {
            return Err(CheckpointError::ShipmentFinished(self.shipment.id()));
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
