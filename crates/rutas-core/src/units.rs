//! # Exact Units
//!
//! `Distance` (kilometres) and `Amount` (currency units) wrap
//! `rust_decimal::Decimal`. No rounding happens here; presentation-layer
//! rounding belongs to the caller.
//!
//! Arithmetic is checked. Catalog values are operator input and a valid,
//! non-negative rate or distance can still exceed the `Decimal` range, so
//! every operation returns `None` on overflow instead of panicking.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A travel distance in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Distance(pub Decimal);

impl Distance {
    /// Zero kilometres.
    pub const ZERO: Distance = Distance(Decimal::ZERO);

    /// Create a distance from a kilometre value.
    pub fn km(value: Decimal) -> Self {
        Self(value)
    }

    /// The kilometre value.
    pub fn as_km(&self) -> Decimal {
        self.0
    }

    /// Whether the distance is below zero (malformed input).
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Add two distances, or `None` on overflow.
    pub fn checked_add(self, rhs: Distance) -> Option<Distance> {
        self.0.checked_add(rhs.0).map(Distance)
    }

    /// Sum distances, or `None` on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Distance>>(iter: I) -> Option<Distance> {
        iter.into_iter().try_fold(Distance::ZERO, Distance::checked_add)
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} km", self.0.normalize())
    }
}

/// A monetary amount in the operator's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Amount(pub Decimal);

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Wrap a decimal value.
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// The decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is below zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Scale a per-kilometre rate by a distance, or `None` on overflow.
    pub fn checked_per_km(self, distance: Distance) -> Option<Amount> {
        self.0.checked_mul(distance.0).map(Amount)
    }

    /// Add two amounts, or `None` on overflow.
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Sum amounts, or `None` on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Amount>>(iter: I) -> Option<Amount> {
        iter.into_iter().try_fold(Amount::ZERO, Amount::checked_add)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
