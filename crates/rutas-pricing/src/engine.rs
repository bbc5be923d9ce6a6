//! # Pricing Engine
//!
//! `total = base + cost_per_km(weight) * distance + Σ optional services`
//!
//! The engine is pure: identical inputs always produce the identical
//! amount. Order-edit flows rely on this to reproduce the original price
//! when nothing relevant changed. No currency rounding happens here.

use serde::{Deserialize, Serialize};

use rutas_core::{Amount, Distance};

use crate::tier::{ParcelWeight, PricingError, RateTable};

/// Breakdown of a computed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Rate applied per kilometre.
    pub cost_per_km: Amount,
    /// Base cost plus distance charge.
    pub transport: Amount,
    /// Sum of the selected optional services.
    pub services: Amount,
    /// Final price.
    pub total: Amount,
}

/// Prices shipments against a validated rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingEngine {
    rates: RateTable,
}

impl PricingEngine {
    /// Build an engine over a rate table.
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    /// The rate table in use.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Price a shipment and return the breakdown.
    ///
    /// # Errors
    ///
    /// [`PricingError::Negative`] if the weight, base cost, any service cost,
    /// or the distance is negative. [`PricingError::Overflow`] if an
    /// intermediate amount exceeds the decimal range.
    pub fn quote(
        &self,
        weight: ParcelWeight,
        base_transport_cost: Amount,
        optional_services: &[Amount],
        distance: Distance,
    ) -> Result<Quote, PricingError> {
        if let ParcelWeight::Known(kg) = weight {
            if kg.is_sign_negative() && !kg.is_zero() {
                return Err(PricingError::Negative { field: "weight" });
            }
        }
        if base_transport_cost.is_negative() {
            return Err(PricingError::Negative {
                field: "base transport cost",
            });
        }
        if optional_services.iter().any(Amount::is_negative) {
            return Err(PricingError::Negative {
                field: "optional service cost",
            });
        }
        if distance.is_negative() {
            return Err(PricingError::Negative { field: "distance" });
        }

        let cost_per_km = self.rates.cost_per_km(weight);
        let transport = cost_per_km
            .checked_per_km(distance)
            .and_then(|charge| base_transport_cost.checked_add(charge))
            .ok_or(PricingError::Overflow {
                field: "transport cost",
            })?;
        let services = Amount::checked_sum(optional_services.iter().copied()).ok_or(
            PricingError::Overflow {
                field: "optional services",
            },
        )?;
        let total = transport
            .checked_add(services)
            .ok_or(PricingError::Overflow { field: "total" })?;

        Ok(Quote {
            cost_per_km,
            transport,
            services,
            total,
        })
    }

    /// Price a shipment and return only the total.
    pub fn price(
        &self,
        weight: ParcelWeight,
        base_transport_cost: Amount,
        optional_services: &[Amount],
        distance: Distance,
    ) -> Result<Amount, PricingError> {
        self.quote(weight, base_transport_cost, optional_services, distance)
            .map(|q| q.total)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
