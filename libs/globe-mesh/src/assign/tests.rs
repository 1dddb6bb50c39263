//! # Spatial Assignment Tests

use super::*;
use crate::geo::direction_from_lat_lon;
use crate::tessellation::{Primitive, TessellationKind};
use config::constants::DUAL_WALK_LIMIT;
use glam::DVec2;

fn rect(name: &str, min: (f64, f64), max: (f64, f64)) -> Region {
    let ring = vec![
        DVec2::new(min.0, min.1),
        DVec2::new(max.0, min.1),
        DVec2::new(max.0, max.1),
        DVec2::new(min.0, max.1),
    ];
    Region::new(name, name, vec![ring]).unwrap()
}

/// Tessellation whose primitives sit at the given (lat, lon) anchors.
fn anchored(points: &[(f64, f64)]) -> Tessellation {
    let mut tess = Tessellation::generate(TessellationKind::Icosphere, 1, 1.0, DUAL_WALK_LIMIT);
    tess.primitives = points
        .iter()
        .map(|&(lat, lon)| Primitive::new(vec![0, 1, 2], direction_from_lat_lon(lat, lon)))
        .collect();
    tess
}

#[test]
fn test_square_point_classification() {
    let regions = vec![rect("Square", (0.0, 0.0), (10.0, 10.0))];
    let tess = anchored(&[(5.0, 5.0), (50.0, 50.0)]);
    let assignment = Assignment::classify(&tess, &regions);
    assert_eq!(assignment.region_of(0), Some(0));
    assert_eq!(assignment.region_of(1), None);
    assert_eq!(assignment.unassigned(), vec![1]);
}

#[test]
fn test_first_match_wins() {
    let regions = vec![
        rect("A", (0.0, 0.0), (10.0, 10.0)),
        rect("B", (5.0, 5.0), (20.0, 20.0)),
    ];
    let tess = anchored(&[(7.0, 7.0), (15.0, 15.0), (2.0, 2.0)]);
    let assignment = Assignment::classify(&tess, &regions);
    assert_eq!(assignment.as_slice(), &[Some(0), Some(1), Some(0)]);

    let reversed = vec![regions[1].clone(), regions[0].clone()];
    let assignment = Assignment::classify(&tess, &reversed);
    assert_eq!(assignment.region_of(0), Some(0));
}

#[test]
fn test_hole_not_excluded() {
    let outer = vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(10.0, 0.0),
        DVec2::new(10.0, 10.0),
        DVec2::new(0.0, 10.0),
    ];
    let hole = vec![
        DVec2::new(4.0, 4.0),
        DVec2::new(6.0, 4.0),
        DVec2::new(6.0, 6.0),
        DVec2::new(4.0, 6.0),
    ];
    let regions = vec![Region::new("Ring", "Ring", vec![outer, hole]).unwrap()];
    assert_eq!(find_region(&regions, 5.0, 5.0), Some(0));
}

#[test]
fn test_every_primitive_appears_once() {
    let tess = Tessellation::generate(TessellationKind::Goldberg, 3, 1.0, DUAL_WALK_LIMIT);
    let regions = vec![
        rect("North", (-180.0, 0.0), (180.0, 90.0)),
        rect("Band", (-30.0, -45.0), (30.0, -10.0)),
    ];
    let assignment = Assignment::classify(&tess, &regions);

    assert_eq!(assignment.len(), tess.primitive_count());
    let groups = assignment.primitives_by_region();
    assert_eq!(groups.len(), 2);

    let mut seen: Vec<u32> = groups.iter().flatten().copied().collect();
    seen.extend(assignment.unassigned());
    seen.sort_unstable();
    let all: Vec<u32> = (0..tess.primitive_count() as u32).collect();
    assert_eq!(seen, all);

    assert!(!groups[0].is_empty());
    assert!(!groups[1].is_empty());
    assert_eq!(
        assignment.assigned_count() + assignment.unassigned_count(),
        tess.primitive_count()
    );
    assert_eq!(assignment.assigned().len(), assignment.assigned_count());
}

#[test]
fn test_classification_is_deterministic() {
    let tess = Tessellation::generate(TessellationKind::Goldberg, 4, 1.0, DUAL_WALK_LIMIT);
    let regions = vec![
        rect("A", (-60.0, -20.0), (40.0, 50.0)),
        rect("B", (100.0, -50.0), (150.0, -10.0)),
    ];
    let first = Assignment::classify(&tess, &regions);
    let second = Assignment::classify(&tess, &regions);
    assert_eq!(first, second);

    let sequential: Vec<Option<u32>> = tess
        .primitives
        .iter()
        .map(|p| {
            let (lat, lon) = lat_lon_of(p.anchor);
            find_region(&regions, lat, lon)
        })
        .collect();
    assert_eq!(first.as_slice(), sequential.as_slice());
}

#[test]
fn test_no_regions() {
    let tess = Tessellation::generate(TessellationKind::Icosphere, 2, 1.0, DUAL_WALK_LIMIT);
    let assignment = Assignment::classify(&tess, &[]);
    assert_eq!(assignment.assigned_count(), 0);
    assert!(assignment.primitives_by_region().is_empty());
    assert_eq!(assignment.unassigned().len(), 80);
}
