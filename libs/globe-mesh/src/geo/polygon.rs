//! Longitude/latitude rings and the containment tests run against them.

use config::constants::EPSILON;
use glam::{DVec2, DVec3};

/// Geographic coordinates of a direction, in degrees: `(lat, lon)`.
///
/// `lat = asin(z / |p|)`, `lon = atan2(y, x)`. The ratio is clamped to
/// `[-1, 1]` against rounding, and a point too close to the origin to have
/// a direction maps to `(0, 0)`.
///
/// # Example
///
/// ```rust
/// use globe_mesh::geo::lat_lon_of;
/// use glam::DVec3;
///
/// let (lat, lon) = lat_lon_of(DVec3::new(0.0, 2.0, 0.0));
/// assert!(lat.abs() < 1e-12);
/// assert!((lon - 90.0).abs() < 1e-12);
/// ```
pub fn lat_lon_of(p: DVec3) -> (f64, f64) {
    let r = p.length();
    if r < EPSILON {
        return (0.0, 0.0);
    }
    let lat = (p.z / r).clamp(-1.0, 1.0).asin().to_degrees();
    let lon = p.y.atan2(p.x).to_degrees();
    (lat, lon)
}

/// Unit direction for a latitude/longitude pair in degrees.
pub fn direction_from_lat_lon(lat: f64, lon: f64) -> DVec3 {
    let (lat, lon) = (lat.to_radians(), lon.to_radians());
    DVec3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// Ray-casting point-in-polygon test.
///
/// `ring` holds `(lon, lat)` points; the closing edge is implicit. Points
/// exactly on an edge may land on either side.
///
/// # Example
///
/// ```rust
/// use globe_mesh::geo::point_in_poly;
/// use glam::DVec2;
///
/// let square = [
///     DVec2::new(0.0, 0.0),
///     DVec2::new(10.0, 0.0),
///     DVec2::new(10.0, 10.0),
///     DVec2::new(0.0, 10.0),
/// ];
/// assert!(point_in_poly(5.0, 5.0, &square));
/// assert!(!point_in_poly(50.0, 50.0, &square));
/// ```
pub fn point_in_poly(lon: f64, lat: f64, ring: &[DVec2]) -> bool {
    let n = ring.len();
    let mut inside = false;
    for i in 0..n {
        let p1 = ring[i];
        let p2 = ring[(i + 1) % n];
        if (p1.y > lat) != (p2.y > lat) && lon < (p2.x - p1.x) * (lat - p1.y) / (p2.y - p1.y) + p1.x
        {
            inside = !inside;
        }
    }
    inside
}

/// Inclusive longitude/latitude box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// (min lon, min lat)
    pub min: DVec2,
    /// (max lon, max lat)
    pub max: DVec2,
}

impl BoundingBox {
    /// Box around a ring, or `None` for an empty ring.
    pub fn of_ring(ring: &[DVec2]) -> Option<Self> {
        let first = *ring.first()?;
        let (min, max) = ring[1..]
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    /// Returns true if `(lon, lat)` lies inside or on the box.
    #[inline]
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min.x && lon <= self.max.x && lat >= self.min.y && lat <= self.max.y
    }
}

/// Arithmetic mean of a ring's points.
pub fn ring_centroid(ring: &[DVec2]) -> DVec2 {
    if ring.is_empty() {
        return DVec2::ZERO;
    }
    ring.iter().copied().sum::<DVec2>() / ring.len() as f64
}
