//! # Geographic Input
//!
//! In-memory geographic data the pipeline classifies against:
//!
//! - `(lon, lat)` rings with inclusive bounding boxes
//! - ray-casting containment against a region's outer ring
//! - conversion between sphere directions and latitude/longitude
//! - point features (places) with their priority ordering
//!
//! File formats are not handled here; callers hand over decoded polygons.

mod polygon;
mod region;

#[cfg(test)]
mod tests;

pub use polygon::{
    direction_from_lat_lon, lat_lon_of, point_in_poly, ring_centroid, BoundingBox,
};
pub use region::{regions_from_multipolygon, select_places, InputReport, Place, Region};
