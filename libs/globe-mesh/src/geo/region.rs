//! Named regions and the point features placed on them.

use super::polygon::{point_in_poly, BoundingBox};
use config::constants::MIN_RING_POINTS;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Input defects absorbed while building regions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputReport {
    /// Rings dropped for having fewer than 3 usable points
    pub skipped_rings: usize,
    /// Polygons dropped because none of their rings survived
    pub skipped_features: usize,
    /// Places dropped for a non-finite latitude or longitude
    #[serde(default)]
    pub skipped_places: usize,
}

impl InputReport {
    /// Adds another report's counts to this one.
    pub fn absorb(&mut self, other: InputReport) {
        self.skipped_rings += other.skipped_rings;
        self.skipped_features += other.skipped_features;
        self.skipped_places += other.skipped_places;
    }
}

/// A named geographic polygon.
///
/// `rings[0]` is the outer boundary; further rings are holes, kept for
/// completeness but never tested during classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Unique name, e.g. `Chile_3`
    pub name: String,
    /// Display name shared by all parts of one feature
    pub admin: String,
    /// `(lon, lat)` rings in degrees
    pub rings: Vec<Vec<DVec2>>,
    /// Box around the outer ring
    pub bbox: BoundingBox,
}

impl Region {
    /// Creates a region, or `None` if there is no outer ring.
    pub fn new(
        name: impl Into<String>,
        admin: impl Into<String>,
        rings: Vec<Vec<DVec2>>,
    ) -> Option<Self> {
        let bbox = BoundingBox::of_ring(rings.first()?)?;
        Some(Self {
            name: name.into(),
            admin: admin.into(),
            rings,
            bbox,
        })
    }

    /// The outer ring.
    #[inline]
    pub fn outer(&self) -> &[DVec2] {
        &self.rings[0]
    }

    /// Bounding box rejection, then ray casting against the outer ring.
    ///
    /// Holes are not tested: a point inside an enclave still counts as
    /// inside the surrounding region.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.bbox.contains(lon, lat) && point_in_poly(lon, lat, self.outer())
    }
}

/// Splits a multi-polygon into independently addressable regions.
///
/// Polygon `i` becomes region `{admin}_{i}`. Points with a non-finite
/// coordinate are dropped, rings left with fewer than 3 points are skipped,
/// and a polygon with no surviving ring is skipped as a whole. Each skip is
/// counted in `report`. Indices keep their input position, so names stay
/// stable when a sibling polygon is dropped.
///
/// # Example
///
/// ```rust
/// use globe_mesh::geo::{regions_from_multipolygon, InputReport};
///
/// let mut report = InputReport::default();
/// let polygons = vec![
///     vec![vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]],
///     vec![vec![[20.0, 0.0], [f64::NAN, 1.0]]],
/// ];
/// let regions = regions_from_multipolygon("Square", &polygons, &mut report);
/// assert_eq!(regions.len(), 1);
/// assert_eq!(regions[0].name, "Square_0");
/// assert_eq!(report.skipped_rings, 1);
/// assert_eq!(report.skipped_features, 1);
/// ```
pub fn regions_from_multipolygon(
    admin: &str,
    polygons: &[Vec<Vec<[f64; 2]>>],
    report: &mut InputReport,
) -> Vec<Region> {
    let mut regions = Vec::with_capacity(polygons.len());

    for (index, polygon) in polygons.iter().enumerate() {
        let mut rings = Vec::with_capacity(polygon.len());
        for (ring_index, raw) in polygon.iter().enumerate() {
            let ring: Vec<DVec2> = raw
                .iter()
                .filter(|[lon, lat]| lon.is_finite() && lat.is_finite())
                .map(|&[lon, lat]| DVec2::new(lon, lat))
                .collect();
            if ring.len() < MIN_RING_POINTS {
                warn!(admin, polygon = index, ring = ring_index, points = ring.len(), "ring skipped");
                report.skipped_rings += 1;
                continue;
            }
            rings.push(ring);
        }

        match Region::new(format!("{admin}_{index}"), admin, rings) {
            Some(region) => regions.push(region),
            None => {
                warn!(admin, polygon = index, "feature skipped: no usable ring");
                report.skipped_features += 1;
            }
        }
    }

    regions
}

/// A named point feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Display name
    pub name: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Priority; higher places are kept first
    #[serde(default)]
    pub weight: f64,
}

impl Place {
    /// Creates a place with zero weight.
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
            weight: 0.0,
        }
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// Keeps the `max` heaviest places, heaviest first.
///
/// Places with a non-finite coordinate are dropped before ranking and
/// counted in `report`. Equal weights keep their input order.
pub fn select_places(places: &[Place], max: usize, report: &mut InputReport) -> Vec<Place> {
    let mut selected = Vec::with_capacity(places.len());
    for place in places {
        if place.lat.is_finite() && place.lon.is_finite() {
            selected.push(place.clone());
        } else {
            warn!(place = %place.name, lat = place.lat, lon = place.lon, "place skipped");
            report.skipped_places += 1;
        }
    }
    selected.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    selected.truncate(max);
    selected
}
