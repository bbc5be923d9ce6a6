//! # Rate Tiers
//!
//! Weight-tiered per-kilometre rates. Tiers are ordered by ascending weight
//! ceiling; the last tier is open-ended.
//!
//! ## Invariants (enforced by [`RateTable::new`])
//!
//! - At least one tier.
//! - Ceilings strictly ascending and non-negative.
//! - Rates non-negative and non-decreasing with the ceiling, so the rate
//!   charged never drops as a parcel gets heavier.
//! - The rates sum within the decimal range, so the mean rate charged for
//!   an unspecified weight is computed once, up front.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use rutas_core::Amount;

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised when building a rate table or pricing a shipment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// A rate table needs at least one tier.
    #[error("rate table has no tiers")]
    EmptyRateTable,

    /// Tier ceilings must strictly ascend.
    #[error("tier {index} ceiling {ceiling} does not exceed the previous ceiling")]
    UnorderedTiers {
        /// Position of the offending tier.
        index: usize,
        /// Its ceiling.
        ceiling: Decimal,
    },

    /// Rates must not drop as the ceiling rises.
    #[error("tier {index} rate {rate} is lower than the previous tier's")]
    DecreasingRate {
        /// Position of the offending tier.
        index: usize,
        /// Its rate.
        rate: Amount,
    },

    /// A pricing input is negative.
    #[error("{field} must not be negative")]
    Negative {
        /// The offending input.
        field: &'static str,
    },

    /// A computed amount exceeds the decimal range.
    #[error("{field} overflows the decimal range")]
    Overflow {
        /// The amount being computed.
        field: &'static str,
    },
}

// ─── Tiers ───────────────────────────────────────────────────────────

/// One weight band and its per-kilometre rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTier {
    /// Heaviest weight (kg) the tier covers, inclusive.
    pub weight_ceiling: Decimal,
    /// Charge per kilometre.
    pub cost_per_km: Amount,
}

impl RateTier {
    /// Build a tier.
    pub fn new(weight_ceiling: Decimal, cost_per_km: Amount) -> Self {
        Self {
            weight_ceiling,
            cost_per_km,
        }
    }
}

/// The weight a price is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelWeight {
    /// Actual parcel weight in kilograms.
    Known(Decimal),
    /// No weight available; the mean of all tier rates is charged.
    Unspecified,
}

impl From<Option<Decimal>> for ParcelWeight {
    fn from(weight: Option<Decimal>) -> Self {
        weight.map_or(Self::Unspecified, Self::Known)
    }
}

/// Validated, ascending list of rate tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateTable {
    tiers: Vec<RateTier>,
    #[serde(skip)]
    mean_rate: Amount,
}

impl RateTable {
    /// Validate and build a rate table.
    pub fn new(tiers: Vec<RateTier>) -> Result<Self, PricingError> {
        if tiers.is_empty() {
            return Err(PricingError::EmptyRateTable);
        }
        for (index, tier) in tiers.iter().enumerate() {
            if tier.weight_ceiling.is_sign_negative() && !tier.weight_ceiling.is_zero() {
                return Err(PricingError::Negative {
                    field: "weight ceiling",
                });
            }
            if tier.cost_per_km.is_negative() {
                return Err(PricingError::Negative {
                    field: "cost per km",
                });
            }
            if index > 0 {
                let prev = &tiers[index - 1];
                if tier.weight_ceiling <= prev.weight_ceiling {
                    return Err(PricingError::UnorderedTiers {
                        index,
                        ceiling: tier.weight_ceiling,
                    });
                }
                if tier.cost_per_km < prev.cost_per_km {
                    return Err(PricingError::DecreasingRate {
                        index,
                        rate: tier.cost_per_km,
                    });
                }
            }
        }
        let sum = Amount::checked_sum(tiers.iter().map(|t| t.cost_per_km)).ok_or(
            PricingError::Overflow {
                field: "sum of tier rates",
            },
        )?;
        let mean_rate = Amount::new(sum.value() / Decimal::from(tiers.len()));
        Ok(Self { tiers, mean_rate })
    }

    /// Tiers in ascending ceiling order.
    pub fn tiers(&self) -> &[RateTier] {
        &self.tiers
    }

    /// Per-kilometre rate for a weight.
    ///
    /// A known weight is charged at the first tier whose ceiling covers it,
    /// or the last tier when it exceeds every ceiling. An unspecified weight
    /// is charged at the mean of all tier rates.
    pub fn cost_per_km(&self, weight: ParcelWeight) -> Amount {
        match weight {
            ParcelWeight::Known(kg) => self
                .tiers
                .iter()
                .find(|t| t.weight_ceiling >= kg)
                .or_else(|| self.tiers.last())
                .map_or(Amount::ZERO, |t| t.cost_per_km),
            ParcelWeight::Unspecified => self.mean_rate,
        }
    }
}

impl<'de> Deserialize<'de> for RateTable {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            tiers: Vec<RateTier>,
        }
        let raw = Raw::deserialize(deserializer)?;
        RateTable::new(raw.tiers).map_err(serde::de::Error::custom)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn tier(ceiling: Decimal, rate: Decimal) -> RateTier {
        RateTier::new(ceiling, Amount::new(rate))
    }

    fn table() -> RateTable {
        RateTable::new(vec![
            tier(dec!(5), dec!(10)),
            tier(dec!(10), dec!(15)),
            tier(dec!(30), dec!(22)),
        ])
        .unwrap()
    }

    // ── Tier lookup ──────────────────────────────────────────────────

    #[test]
    fn first_covering_tier_is_used() {
        let t = table();
        assert_eq!(t.cost_per_km(ParcelWeight::Known(dec!(0.5))), Amount::new(dec!(10)));
        assert_eq!(t.cost_per_km(ParcelWeight::Known(dec!(8))), Amount::new(dec!(15)));
    }

    #[test]
    fn ceiling_is_inclusive() {
        assert_eq!(table().cost_per_km(ParcelWeight::Known(dec!(5))), Amount::new(dec!(10)));
    }

    #[test]
    fn heavier_than_every_ceiling_uses_last_tier() {
        assert_eq!(table().cost_per_km(ParcelWeight::Known(dec!(400))), Amount::new(dec!(22)));
    }

    #[test]
    fn unspecified_weight_uses_mean_rate() {
        let t = RateTable::new(vec![tier(dec!(5), dec!(10)), tier(dec!(10), dec!(15))]).unwrap();
        assert_eq!(t.cost_per_km(ParcelWeight::Unspecified), Amount::new(dec!(12.5)));
    }

    #[test]
    fn weight_from_option() {
        assert_eq!(ParcelWeight::from(None), ParcelWeight::Unspecified);
        assert_eq!(ParcelWeight::from(Some(dec!(3))), ParcelWeight::Known(dec!(3)));
    }

    // ── Validation ───────────────────────────────────────────────────

    #[test]
    fn rejects_empty_table() {
        assert_eq!(RateTable::new(vec![]), Err(PricingError::EmptyRateTable));
    }

    #[test]
    fn rejects_unordered_ceilings() {
        let err = RateTable::new(vec![tier(dec!(10), dec!(1)), tier(dec!(10), dec!(2))]).unwrap_err();
        assert!(matches!(err, PricingError::UnorderedTiers { index: 1, .. }));
    }

    #[test]
    fn rejects_decreasing_rates() {
        let err = RateTable::new(vec![tier(dec!(5), dec!(9)), tier(dec!(10), dec!(8))]).unwrap_err();
        assert!(matches!(err, PricingError::DecreasingRate { index: 1, .. }));
    }

    #[test]
    fn rejects_negative_rate() {
        let err = RateTable::new(vec![tier(dec!(5), dec!(-1))]).unwrap_err();
        assert_eq!(err, PricingError::Negative { field: "cost per km" });
    }

    #[test]
    fn rejects_rates_whose_sum_overflows() {
        let err = RateTable::new(vec![tier(dec!(5), Decimal::MAX), tier(dec!(10), Decimal::MAX)])
            .unwrap_err();
        assert_eq!(err, PricingError::Overflow { field: "sum of tier rates" });
    }

    #[test]
    fn deserialization_validates() {
        let ok: RateTable =
            serde_json::from_str(r#"{"tiers":[{"weight_ceiling":"10","cost_per_km":"15"}]}"#).unwrap();
        assert_eq!(ok.tiers().len(), 1);
        let bad = serde_json::from_str::<RateTable>(r#"{"tiers":[]}"#);
        assert!(bad.is_err());
    }

    // ── Properties ───────────────────────────────────────────────────

    proptest! {
        /// Heavier parcels are never charged a lower rate.
        #[test]
        fn cost_per_km_is_monotonic(
            increments in proptest::collection::vec((1u32..50, 0u32..20), 1..8),
            a in 0u32..500,
            b in 0u32..500,
        ) {
            let mut ceiling = Decimal::ZERO;
            let mut rate = Decimal::ZERO;
            let tiers: Vec<RateTier> = increments
                .iter()
                .map(|&(dc, dr)| {
                    ceiling += Decimal::from(dc);
                    rate += Decimal::from(dr);
                    tier(ceiling, rate)
                })
                .collect();
            let table = RateTable::new(tiers).unwrap();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let lo_rate = table.cost_per_km(ParcelWeight::Known(Decimal::from(lo)));
            let hi_rate = table.cost_per_km(ParcelWeight::Known(Decimal::from(hi)));
            prop_assert!(lo_rate <= hi_rate);
        }
    }
}
