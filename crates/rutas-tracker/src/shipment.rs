//! # Shipment Lifecycle
//!
//! A shipment is one vehicle's assignment to a catalog route. It owns the
//! mutable current-branch pointer and the status; nothing outside this
//! crate can move either. The checkpoint tracker is the only writer once
//! the shipment is on the road.
//!
//! ## States
//!
//! ```text
//! Planned ──depart()──▶ InTransit ──finalize (tracker)──▶ Finished
//!    │                                                   (terminal)
//!    └──────────────finalize (tracker)───────────────────────▲
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rutas_core::{BranchId, DriverId, RouteId, ShipmentId, Timestamp};

// ─── Shipment Status ─────────────────────────────────────────────────

/// Lifecycle status of a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    /// Assigned but not yet departed.
    Planned,
    /// On the road.
    InTransit,
    /// Delivered along the whole route (terminal).
    Finished,
}

impl ShipmentStatus {
    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Planned => "planned",
            Self::InTransit => "in_transit",
            Self::Finished => "finished",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised by shipment lifecycle transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShipmentError {
    /// Attempted transition is not valid from the current status.
    #[error("invalid shipment transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: ShipmentStatus,
        /// Attempted target status.
        to: ShipmentStatus,
    },

    /// The shipment is finished and immutable.
    #[error("{0} is finished")]
    Terminal(ShipmentId),
}

/// Record of a status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentTransitionRecord {
    /// Status before the transition.
    pub from: ShipmentStatus,
    /// Status after the transition.
    pub to: ShipmentStatus,
    /// When the transition was committed.
    pub timestamp: Timestamp,
}

// ─── Shipment ────────────────────────────────────────────────────────

/// A vehicle's assignment to a route, with its progress pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    id: ShipmentId,
    route_id: RouteId,
    driver: DriverId,
    current_branch: Option<BranchId>,
    status: ShipmentStatus,
    created_at: Timestamp,
    transitions: Vec<ShipmentTransitionRecord>,
}

impl Shipment {
    /// A shipment assigned to a route that has not departed. The current
    /// branch is unset until the first checkpoint is confirmed.
    pub fn planned(route_id: RouteId, driver: DriverId) -> Self {
        Self {
            id: ShipmentId::new(),
            route_id,
            driver,
            current_branch: None,
            status: ShipmentStatus::Planned,
            created_at: Timestamp::now(),
            transitions: Vec::new(),
        }
    }

    /// A shipment already on the road, positioned at `start`.
    pub fn dispatched(route_id: RouteId, driver: DriverId, start: BranchId) -> Self {
        Self {
            current_branch: Some(start),
            status: ShipmentStatus::InTransit,
            ..Self::planned(route_id, driver)
        }
    }

    /// Depart (PLANNED → IN_TRANSIT).
    pub fn depart(&mut self) -> Result<(), ShipmentError> {
        self.require_status(ShipmentStatus::Planned, ShipmentStatus::InTransit)?;
        self.do_transition(ShipmentStatus::InTransit);
        Ok(())
    }

    pub fn id(&self) -> ShipmentId {
        self.id
    }

    pub fn route_id(&self) -> RouteId {
        self.route_id
    }

    pub fn driver(&self) -> DriverId {
        self.driver
    }

    /// The last-confirmed branch, if any.
    pub fn current_branch(&self) -> Option<BranchId> {
        self.current_branch
    }

    pub fn status(&self) -> ShipmentStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Ordered log of status transitions.
    pub fn transitions(&self) -> &[ShipmentTransitionRecord] {
        &self.transitions
    }

    /// Whether the shipment is finished.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub(crate) fn set_current_branch(&mut self, branch: BranchId) {
        self.current_branch = Some(branch);
    }

    /// Callers check `is_terminal()` first.
    pub(crate) fn mark_finished(&mut self) {
        self.do_transition(ShipmentStatus::Finished);
    }

    fn require_status(
        &self,
        expected: ShipmentStatus,
        target: ShipmentStatus,
    ) -> Result<(), ShipmentError> {
        if self.status.is_terminal() {
            return Err(ShipmentError::Terminal(self.id));
        }
        if self.status != expected {
            return Err(ShipmentError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }
        Ok(())
    }

    fn do_transition(&mut self, to: ShipmentStatus) {
        self.transitions.push(ShipmentTransitionRecord {
            from: self.status,
            to,
            timestamp: Timestamp::now(),
        });
        self.status = to;
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
