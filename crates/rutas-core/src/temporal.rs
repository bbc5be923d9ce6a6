//! # Temporal Types: UTC-Only Timestamps
//!
//! `Timestamp` is a UTC timestamp truncated to seconds precision. Shipment
//! transition logs are stamped with it so that records written by
//! different drivers' devices compare and sort consistently.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A UTC-only timestamp, truncated to seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%SZ"))
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn now_has_no_subseconds() {
        assert_eq!(Timestamp::now().0.nanosecond(), 0);
    }

    #[test]
    fn display_is_utc_with_z_suffix() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 2, 8, 15, 30).unwrap();
        let ts = Timestamp(truncate_to_seconds(dt.with_nanosecond(987_000_000).unwrap()));
        assert_eq!(ts.to_string(), "2026-03-02T08:15:30Z");
    }

    #[test]
    fn serde_roundtrip_keeps_ordering() {
        let earlier = Timestamp(Utc.with_ymd_and_hms(2026, 3, 2, 8, 15, 30).unwrap());
        let later = Timestamp(Utc.with_ymd_and_hms(2026, 3, 2, 8, 15, 31).unwrap());
        let json = serde_json::to_string(&later).unwrap();
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, later);
        assert!(earlier < back);
    }
}
