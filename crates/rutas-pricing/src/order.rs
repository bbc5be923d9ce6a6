//! # Order Pricing
//!
//! Prices orders at creation from the distance resolved over the route
//! network, and keeps the price frozen once the shipment carrying the
//! order has departed.
//!
//! ## Lifecycle
//!
//! ```text
//! OrderDraft ──price_order()──▶ Order (open) ──mark_dispatched()──▶ Order (frozen)
//!                                  │
//!                     change_destination(): recompute
//! ```
//!
//! A destination change on an open order recomputes the price; re-issuing
//! the current destination reproduces it unchanged. A destination change on
//! a frozen order is rejected.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use rutas_core::{Amount, BranchId, Distance, OrderId, RouteId};
use rutas_topology::{RouteNetwork, TopologyError};

use crate::engine::PricingEngine;
use crate::tier::{ParcelWeight, PricingError};

/// Errors raised while pricing or editing an order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// No route connects the order's branches.
    #[error(transparent)]
    Topology(#[from] TopologyError),

    /// The pricing inputs were rejected.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The order's shipment has departed; its price can no longer change.
    #[error("{0} has been dispatched; its price is frozen")]
    PriceFrozen(OrderId),
}

/// An order before it is priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// The merchant's branch.
    pub origin: BranchId,
    /// Delivery branch.
    pub destination: BranchId,
    /// Parcel weight in kilograms.
    pub weight: Decimal,
    /// Costs of the selected optional services.
    pub services: Vec<Amount>,
}

/// A priced order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier.
    pub id: OrderId,
    /// The merchant's branch.
    pub origin: BranchId,
    /// Delivery branch.
    pub destination: BranchId,
    /// Parcel weight in kilograms.
    pub weight: Decimal,
    /// Costs of the selected optional services.
    pub services: Vec<Amount>,
    /// Route the distance was resolved along.
    pub route_id: RouteId,
    /// Resolved distance.
    pub distance: Distance,
    /// Computed price.
    pub price: Amount,
    dispatched: bool,
}

impl Order {
    /// Whether the price is frozen.
    pub fn is_dispatched(&self) -> bool {
        self.dispatched
    }

    /// Freeze the price: the shipment carrying this order has departed.
    pub fn mark_dispatched(&mut self) {
        self.dispatched = true;
    }
}

/// Prices orders with a fixed base transport cost.
#[derive(Debug, Clone, Copy)]
pub struct OrderPricer<'a> {
    network: &'a RouteNetwork,
    engine: &'a PricingEngine,
    base_transport_cost: Amount,
}

impl<'a> OrderPricer<'a> {
    /// Build a pricer over the network and engine.
    pub fn new(network: &'a RouteNetwork, engine: &'a PricingEngine, base_transport_cost: Amount) -> Self {
        Self {
            network,
            engine,
            base_transport_cost,
        }
    }

    /// Price a new order.
    ///
    /// # Errors
    ///
    /// [`OrderError::Topology`] when no route connects origin and
    /// destination; no order is produced in that case.
    pub fn price_order(&self, draft: OrderDraft) -> Result<Order, OrderError> {
        let (route_id, distance, price) =
            self.compute(draft.origin, draft.destination, draft.weight, &draft.services)?;
        let order = Order {
            id: OrderId::new(),
            origin: draft.origin,
            destination: draft.destination,
            weight: draft.weight,
            services: draft.services,
            route_id,
            distance,
            price,
            dispatched: false,
        };
        info!(order = %order.id, price = %order.price, "order priced");
        Ok(order)
    }

    /// Move an open order to a new destination, recomputing its price.
    ///
    /// On error the order is left untouched.
    pub fn change_destination(&self, order: &mut Order, destination: BranchId) -> Result<(), OrderError> {
        if order.dispatched {
            return Err(OrderError::PriceFrozen(order.id));
        }
        if order.destination == destination {
            debug!(order = %order.id, "destination unchanged; price kept");
            return Ok(());
        }
        let (route_id, distance, price) =
            self.compute(order.origin, destination, order.weight, &order.services)?;
        debug!(order = %order.id, old = %order.price, new = %price, "order repriced");
        order.destination = destination;
        order.route_id = route_id;
        order.distance = distance;
        order.price = price;
        Ok(())
    }

    fn compute(
        &self,
        origin: BranchId,
        destination: BranchId,
        weight: Decimal,
        services: &[Amount],
    ) -> Result<(RouteId, Distance, Amount), OrderError> {
        let resolved = self.network.resolve_distance(origin, destination)?;
        let price = self.engine.price(
            ParcelWeight::Known(weight),
            self.base_transport_cost,
            services,
            resolved.distance,
        )?;
        Ok((resolved.route_id, resolved.distance, price))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::{RateTable, RateTier};
    use rust_decimal_macros::dec;
    use rutas_core::{Branch, BranchRegistry, Route, RouteCatalog, Segment, SegmentSeq};

    fn network() -> RouteNetwork {
        let branches = BranchRegistry::new((1..=4).map(|id| Branch {
            id: BranchId(id),
            address: String::new(),
            city: String::new(),
        }))
        .unwrap();
        let seg = |seq, from, to, km| {
            Segment::new(SegmentSeq(seq), BranchId(from), BranchId(to), Distance::km(km), 60)
        };
        let route = Route::new(
            RouteId(1),
            "main",
            vec![seg(2, 2, 3, dec!(150)), seg(1, 1, 2, dec!(100))],
        );
        RouteNetwork::from_catalog(&RouteCatalog::from_routes(branches, vec![route]).unwrap())
    }

    fn engine() -> PricingEngine {
        PricingEngine::new(
            RateTable::new(vec![
                RateTier::new(dec!(10), Amount::new(dec!(15))),
                RateTier::new(dec!(50), Amount::new(dec!(20))),
            ])
            .unwrap(),
        )
    }

    fn draft(destination: u64) -> OrderDraft {
        OrderDraft {
            origin: BranchId(1),
            destination: BranchId(destination),
            weight: dec!(8),
            services: vec![Amount::new(dec!(3000))],
        }
    }

    #[test]
    fn order_is_priced_from_resolved_distance() {
        let (net, eng) = (network(), engine());
        let pricer = OrderPricer::new(&net, &eng, Amount::new(dec!(8000)));
        let order = pricer.price_order(draft(3)).unwrap();
        assert_eq!(order.distance, Distance::km(dec!(250)));
        assert_eq!(order.price, Amount::new(dec!(14750)));
        assert!(!order.is_dispatched());
    }

    #[test]
    fn unreachable_destination_produces_no_order() {
        let (net, eng) = (network(), engine());
        let pricer = OrderPricer::new(&net, &eng, Amount::new(dec!(8000)));
        let err = pricer.price_order(draft(4)).unwrap_err();
        assert!(matches!(err, OrderError::Topology(TopologyError::NotReachable { .. })));
    }

    #[test]
    fn destination_change_recomputes_open_order() {
        let (net, eng) = (network(), engine());
        let pricer = OrderPricer::new(&net, &eng, Amount::new(dec!(8000)));
        let mut order = pricer.price_order(draft(3)).unwrap();
        pricer.change_destination(&mut order, BranchId(2)).unwrap();
        assert_eq!(order.destination, BranchId(2));
        assert_eq!(order.price, Amount::new(dec!(12500)));
    }

    #[test]
    fn same_destination_reproduces_price() {
        let (net, eng) = (network(), engine());
        let pricer = OrderPricer::new(&net, &eng, Amount::new(dec!(8000)));
        let mut order = pricer.price_order(draft(3)).unwrap();
        let before = order.clone();
        pricer.change_destination(&mut order, BranchId(3)).unwrap();
        assert_eq!(order, before);
    }

    #[test]
    fn dispatched_order_price_is_frozen() {
        let (net, eng) = (network(), engine());
        let pricer = OrderPricer::new(&net, &eng, Amount::new(dec!(8000)));
        let mut order = pricer.price_order(draft(3)).unwrap();
        order.mark_dispatched();
        let err = pricer.change_destination(&mut order, BranchId(2)).unwrap_err();
        assert_eq!(err, OrderError::PriceFrozen(order.id));
        assert_eq!(order.price, Amount::new(dec!(14750)));
    }

    #[test]
    fn failed_change_leaves_order_untouched() {
        let (net, eng) = (network(), engine());
        let pricer = OrderPricer::new(&net, &eng, Amount::new(dec!(8000)));
        let mut order = pricer.price_order(draft(3)).unwrap();
        let before = order.clone();
        assert!(pricer.change_destination(&mut order, BranchId(4)).is_err());
        assert_eq!(order, before);
    }
}
