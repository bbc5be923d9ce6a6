//! End-to-end pricing over a catalog-backed route network.

use rust_decimal_macros::dec;
use rutas_core::{
    Amount, Branch, BranchId, BranchRegistry, Distance, RouteCatalog, RouteHeader, RouteId,
    RouteSegmentLink, Segment, SegmentSeq,
};
use rutas_pricing::{
    OrderDraft, OrderError, OrderPricer, ParcelWeight, PricingEngine, RateTable, RateTier,
};
use rutas_topology::RouteNetwork;

fn rates() -> RateTable {
    RateTable::new(vec![
        RateTier::new(dec!(5), Amount::new(dec!(10))),
        RateTier::new(dec!(10), Amount::new(dec!(15))),
        RateTier::new(dec!(30), Amount::new(dec!(150))),
    ])
    .unwrap()
}

fn network() -> RouteNetwork {
    let branches = BranchRegistry::new((1..=3).map(|id| Branch {
        id: BranchId(id),
        address: format!("Sucursal {id}"),
        city: "Buenos Aires".into(),
    }))
    .unwrap();
    let catalog = RouteCatalog::assemble(
        branches,
        vec![
            Segment::new(SegmentSeq(1), BranchId(1), BranchId(2), Distance::km(dec!(100)), 90),
            Segment::new(SegmentSeq(2), BranchId(2), BranchId(3), Distance::km(dec!(150)), 110),
        ],
        vec![RouteHeader {
            id: RouteId(1),
            name: "troncal".into(),
        }],
        &[
            RouteSegmentLink {
                route: RouteId(1),
                segment: SegmentSeq(2),
            },
            RouteSegmentLink {
                route: RouteId(1),
                segment: SegmentSeq(1),
            },
        ],
    )
    .unwrap();
    RouteNetwork::from_catalog(&catalog)
}

#[test]
fn tiered_price_over_resolved_distance() {
    let net = network();
    let engine = PricingEngine::new(rates());
    let distance = net.resolve_distance(BranchId(1), BranchId(3)).unwrap().distance;
    assert_eq!(distance, Distance::km(dec!(250)));

    let total = engine
        .price(
            ParcelWeight::Known(dec!(8)),
            Amount::new(dec!(8000)),
            &[Amount::new(dec!(3000))],
            distance,
        )
        .unwrap();
    assert_eq!(total, Amount::new(dec!(14750)));

    let heavy = engine
        .price(
            ParcelWeight::Known(dec!(20)),
            Amount::new(dec!(8000)),
            &[Amount::new(dec!(3000))],
            distance,
        )
        .unwrap();
    assert_eq!(heavy, Amount::new(dec!(48500)));
}

#[test]
fn order_edit_flow() {
    let net = network();
    let engine = PricingEngine::new(rates());
    let pricer = OrderPricer::new(&net, &engine, Amount::new(dec!(8000)));

    let mut order = pricer
        .price_order(OrderDraft {
            origin: BranchId(1),
            destination: BranchId(2),
            weight: dec!(3),
            services: vec![],
        })
        .unwrap();
    assert_eq!(order.price, Amount::new(dec!(9000)));

    pricer.change_destination(&mut order, BranchId(3)).unwrap();
    assert_eq!(order.price, Amount::new(dec!(10500)));

    order.mark_dispatched();
    assert!(matches!(
        pricer.change_destination(&mut order, BranchId(2)),
        Err(OrderError::PriceFrozen(_))
    ));
    assert_eq!(order.price, Amount::new(dec!(10500)));
}
