//! # Domain Identity Newtypes
//!
//! Newtype wrappers for all identifiers in the Rutas stack. These prevent
//! accidental identifier confusion: you cannot pass a `RouteId` where a
//! `BranchId` is expected.
//!
//! Catalog identifiers (`BranchId`, `RouteId`, `SegmentSeq`) are the
//! integer keys issued by the data layer. Operational identifiers
//! (`ShipmentId`, `OrderId`, `DriverId`) are UUIDs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a branch (depot or stop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BranchId(pub u64);

/// Identifier of a catalog route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RouteId(pub u64);

/// Sequence number of a segment, unique within the segment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SegmentSeq(pub u32);

/// Unique identifier for a shipment (one vehicle's assignment to a route).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipmentId(pub Uuid);

/// Unique identifier for an order (one parcel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

/// Unique identifier for a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DriverId(pub Uuid);

impl ShipmentId {
    /// Generate a new random shipment identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl OrderId {
    /// Generate a new random order identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl DriverId {
    /// Generate a new random driver identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ShipmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for DriverId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BranchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "branch:{}", self.0)
    }
}

impl std::fmt::Display for RouteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "route:{}", self.0)
    }
}

impl std::fmt::Display for SegmentSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "segment:{}", self.0)
    }
}

impl std::fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "shipment:{}", self.0)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order:{}", self.0)
    }
}

impl std::fmt::Display for DriverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "driver:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_namespace() {
        assert_eq!(BranchId(7).to_string(), "branch:7");
        assert_eq!(RouteId(2).to_string(), "route:2");
        assert_eq!(SegmentSeq(11).to_string(), "segment:11");
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(ShipmentId::new(), ShipmentId::new());
        assert_ne!(OrderId::new(), OrderId::new());
    }

    #[test]
    fn catalog_ids_serialize_as_bare_integers() {
        assert_eq!(serde_json::to_string(&BranchId(3)).unwrap(), "3");
        let parsed: RouteId = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, RouteId(12));
    }
}
