//! # Route Scenarios
//!
//! End-to-end checks over a catalog assembled from flat data-layer tables:
//! linearization of stored routes and distance resolution across them.

use rust_decimal_macros::dec;
use rutas_core::{
    Branch, BranchId, BranchRegistry, Distance, RouteCatalog, RouteHeader, RouteId,
    RouteSegmentLink, Segment, SegmentSeq,
};
use rutas_topology::{audit, linearize, PathShape, RouteNetwork, TopologyError};

const A: BranchId = BranchId(1);
const B: BranchId = BranchId(2);
const C: BranchId = BranchId(3);

fn branches() -> BranchRegistry {
    BranchRegistry::new([
        Branch {
            id: A,
            address: "Av. Pellegrini 1200".into(),
            city: "Rosario".into(),
        },
        Branch {
            id: B,
            address: "Bv. San Juan 45".into(),
            city: "Córdoba".into(),
        },
        Branch {
            id: C,
            address: "San Martín 900".into(),
            city: "Mendoza".into(),
        },
    ])
    .unwrap()
}

fn ab() -> Segment {
    Segment::new(SegmentSeq(1), A, B, Distance::km(dec!(100)), 80)
}

fn bc() -> Segment {
    Segment::new(SegmentSeq(2), B, C, Distance::km(dec!(150)), 120)
}

fn ca() -> Segment {
    Segment::new(SegmentSeq(3), C, A, Distance::km(dec!(220)), 170)
}

fn link(route: u64, segment: u32) -> RouteSegmentLink {
    RouteSegmentLink {
        route: RouteId(route),
        segment: SegmentSeq(segment),
    }
}

#[test]
fn unordered_route_is_linearized() {
    let out = linearize(&[bc(), ab()]);
    assert_eq!(out, vec![ab(), bc()]);
}

#[test]
fn cyclic_route_is_kept_unchanged() {
    let input = vec![ab(), bc(), ca()];
    assert_eq!(linearize(&input), input);
}

#[test]
fn distance_across_stored_out_of_order_route() {
    let catalog = RouteCatalog::assemble(
        branches(),
        vec![ab(), bc(), ca()],
        vec![RouteHeader {
            id: RouteId(1),
            name: "Rosario - Mendoza".into(),
        }],
        // Join rows stored in reverse travel order.
        &[link(1, 2), link(1, 1)],
    )
    .unwrap();
    let network = RouteNetwork::from_catalog(&catalog);

    let resolved = network.resolve_distance(A, C).unwrap();
    assert_eq!(resolved.distance, Distance::km(dec!(250)));
    assert_eq!(resolved.duration_min, 200);

    assert_eq!(
        network.resolve_distance(C, A),
        Err(TopologyError::NotReachable {
            origin: C,
            destination: A
        })
    );
    assert!(audit(&network).is_empty());
}

#[test]
fn cyclic_route_still_resolves_in_storage_order() {
    let catalog = RouteCatalog::assemble(
        branches(),
        vec![ab(), bc(), ca()],
        vec![RouteHeader {
            id: RouteId(9),
            name: "circuit".into(),
        }],
        &[link(9, 2), link(9, 3), link(9, 1)],
    )
    .unwrap();
    let network = RouteNetwork::from_catalog(&catalog);
    let route = network.route(RouteId(9)).unwrap();
    assert_eq!(route.linearized.shape, PathShape::Cyclic);

    // Storage order is B→C, C→A, A→B.
    let resolved = network.resolve_distance(B, A).unwrap();
    assert_eq!(resolved.distance, Distance::km(dec!(370)));
    assert_eq!(audit(&network).len(), 1);
}
