//! # Geographic Input Tests

use super::*;
use approx::assert_relative_eq;
use glam::{DVec2, DVec3};

fn ring(points: &[(f64, f64)]) -> Vec<DVec2> {
    points.iter().map(|&(x, y)| DVec2::new(x, y)).collect()
}

fn square() -> Vec<DVec2> {
    ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])
}

// =============================================================================
// POINT IN POLYGON
// =============================================================================

#[test]
fn test_square_inside_and_outside() {
    let square = square();
    assert!(point_in_poly(5.0, 5.0, &square));
    assert!(!point_in_poly(50.0, 50.0, &square));
    assert!(!point_in_poly(-1.0, 5.0, &square));
}

#[test]
fn test_concave_ring() {
    // U shape opening upwards: the notch is outside
    let u = ring(&[
        (0.0, 0.0),
        (9.0, 0.0),
        (9.0, 9.0),
        (6.0, 9.0),
        (6.0, 3.0),
        (3.0, 3.0),
        (3.0, 9.0),
        (0.0, 9.0),
    ]);
    assert!(point_in_poly(1.5, 6.0, &u));
    assert!(point_in_poly(7.5, 6.0, &u));
    assert!(point_in_poly(4.5, 1.5, &u));
    assert!(!point_in_poly(4.5, 6.0, &u));
}

#[test]
fn test_centroid_inside_far_point_outside() {
    let rings = [
        square(),
        ring(&[(-20.0, -5.0), (-10.0, -8.0), (-12.0, 4.0)]),
        ring(&[(100.0, 40.0), (120.0, 42.0), (125.0, 60.0), (110.0, 65.0), (98.0, 55.0)]),
    ];
    for r in &rings {
        let c = ring_centroid(r);
        assert!(point_in_poly(c.x, c.y, r));

        let bbox = BoundingBox::of_ring(r).unwrap();
        let far = bbox.max + DVec2::splat(50.0);
        assert!(!bbox.contains(far.x, far.y));
        assert!(!point_in_poly(far.x, far.y, r));
    }
}

#[test]
fn test_degenerate_ring_contains_nothing() {
    assert!(!point_in_poly(0.0, 0.0, &[]));
    let flat = ring(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
    assert!(!point_in_poly(1.0, 0.0, &flat));
}

#[test]
fn test_bbox_inclusive() {
    let bbox = BoundingBox::of_ring(&square()).unwrap();
    assert!(bbox.contains(0.0, 0.0));
    assert!(bbox.contains(10.0, 10.0));
    assert!(!bbox.contains(10.000001, 5.0));
    assert!(BoundingBox::of_ring(&[]).is_none());
}

// =============================================================================
// LAT / LON
// =============================================================================

#[test]
fn test_lat_lon_axes() {
    let (lat, lon) = lat_lon_of(DVec3::X * 3.0);
    assert_relative_eq!(lat, 0.0);
    assert_relative_eq!(lon, 0.0);

    let (lat, _) = lat_lon_of(DVec3::Z);
    assert_relative_eq!(lat, 90.0);

    let (lat, lon) = lat_lon_of(-DVec3::Y);
    assert_relative_eq!(lat, 0.0);
    assert_relative_eq!(lon, -90.0);
}

#[test]
fn test_lat_lon_near_zero_length() {
    assert_eq!(lat_lon_of(DVec3::ZERO), (0.0, 0.0));
    assert_eq!(lat_lon_of(DVec3::splat(1e-12)), (0.0, 0.0));
}

#[test]
fn test_lat_lon_round_trip() {
    for &(lat, lon) in &[(0.0, 0.0), (45.0, 120.0), (-33.5, -70.6), (89.0, 179.0)] {
        let dir = direction_from_lat_lon(lat, lon);
        assert_relative_eq!(dir.length(), 1.0, epsilon = 1e-12);
        let (lat2, lon2) = lat_lon_of(dir);
        assert_relative_eq!(lat2, lat, epsilon = 1e-9);
        assert_relative_eq!(lon2, lon, epsilon = 1e-9);
    }
}

// =============================================================================
// REGIONS
// =============================================================================

#[test]
fn test_region_contains_outer_ring_only() {
    let hole = ring(&[(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0)]);
    let region = Region::new("Square_0", "Square", vec![square(), hole]).unwrap();
    assert!(region.contains(5.0, 5.0));
    assert!(region.contains(1.0, 1.0));
    assert!(!region.contains(50.0, 50.0));
    assert_eq!(region.bbox.max, DVec2::new(10.0, 10.0));
}

#[test]
fn test_region_without_rings() {
    assert!(Region::new("empty", "empty", Vec::new()).is_none());
}

#[test]
fn test_multipolygon_naming_and_skips() {
    let mut report = InputReport::default();
    let polygons = vec![
        vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]],
        vec![vec![[5.0, 5.0], [6.0, 5.0]]],
        vec![
            vec![[10.0, 10.0], [12.0, 10.0], [f64::INFINITY, 0.0], [12.0, 12.0]],
            vec![[11.0, 11.0], [f64::NAN, 11.0]],
        ],
    ];
    let regions = regions_from_multipolygon("Chile", &polygons, &mut report);

    let names: Vec<&str> = regions.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Chile_0", "Chile_2"]);
    assert!(regions.iter().all(|r| r.admin == "Chile"));
    assert_eq!(regions[1].rings.len(), 1);
    assert_eq!(regions[1].outer().len(), 3);
    assert_eq!(
        report,
        InputReport {
            skipped_rings: 2,
            skipped_features: 1,
            skipped_places: 0,
        }
    );
}

#[test]
fn test_report_absorb() {
    let mut total = InputReport::default();
    total.absorb(InputReport {
        skipped_rings: 2,
        skipped_features: 1,
        skipped_places: 0,
    });
    total.absorb(InputReport {
        skipped_rings: 1,
        skipped_features: 0,
        skipped_places: 2,
    });
    assert_eq!(total.skipped_rings, 3);
    assert_eq!(total.skipped_features, 1);
    assert_eq!(total.skipped_places, 2);
}

// =============================================================================
// PLACES
// =============================================================================

#[test]
fn test_select_places_by_weight() {
    let places = vec![
        Place::new("a", 0.0, 0.0).with_weight(1.0),
        Place::new("b", 0.0, 0.0).with_weight(5.0),
        Place::new("c", 0.0, 0.0).with_weight(1.0),
        Place::new("d", 0.0, 0.0).with_weight(3.0),
    ];
    let mut report = InputReport::default();
    let names: Vec<String> = select_places(&places, 3, &mut report)
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["b", "d", "a"]);
    assert!(select_places(&places, 0, &mut report).is_empty());
    assert_eq!(report, InputReport::default());
}

#[test]
fn test_select_places_drops_non_finite_coordinates() {
    let places = vec![
        Place::new("NoLat", f64::NAN, 10.0).with_weight(9.0),
        Place::new("Lima", -12.0, -77.0).with_weight(1.0),
        Place::new("NoLon", 5.0, f64::INFINITY).with_weight(8.0),
    ];
    let mut report = InputReport::default();
    let kept = select_places(&places, 10, &mut report);

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].name, "Lima");
    assert_eq!(report.skipped_places, 2);
    assert_eq!(report.skipped_rings, 0);
}

#[test]
fn test_place_serde_default_weight() {
    let place: Place = serde_json::from_str(r#"{"name":"Lima","lat":-12.0,"lon":-77.0}"#).unwrap();
    assert_eq!(place.weight, 0.0);
    assert_eq!(place.name, "Lima");
}
