//! # Spatial Assignment
//!
//! Classifies every tessellation primitive into at most one region.
//!
//! ## Policy
//!
//! - One representative point per primitive (its anchor direction), converted
//!   to latitude/longitude
//! - Regions are tried in input order: bounding box first, then ray casting
//!   against the outer ring
//! - The first region that matches wins. This is a simple ordering rule, not
//!   a cartographic one: overlapping inputs resolve to whichever came first
//! - Holes are not tested, so primitives inside an enclave go to the
//!   surrounding region
//!
//! Sampling a single point keeps narrow straits open at the cost of thin
//! regions vanishing at coarse levels; raising the subdivision level is the
//! remedy.
//!
//! Classification of one primitive never looks at another, so the pass runs
//! in parallel and the result is identical to a sequential run.

#[cfg(test)]
mod tests;

use crate::geo::{lat_lon_of, Region};
use crate::tessellation::Tessellation;
use rayon::prelude::*;
use tracing::info;

/// Finds the first region containing `(lat, lon)`.
///
/// # Example
///
/// ```rust
/// use globe_mesh::assign::find_region;
/// use globe_mesh::geo::Region;
/// use glam::DVec2;
///
/// let square = vec![
///     DVec2::new(0.0, 0.0),
///     DVec2::new(10.0, 0.0),
///     DVec2::new(10.0, 10.0),
///     DVec2::new(0.0, 10.0),
/// ];
/// let regions = vec![Region::new("Square_0", "Square", vec![square]).unwrap()];
/// assert_eq!(find_region(&regions, 5.0, 5.0), Some(0));
/// assert_eq!(find_region(&regions, 50.0, 50.0), None);
/// ```
pub fn find_region(regions: &[Region], lat: f64, lon: f64) -> Option<u32> {
    regions
        .iter()
        .position(|region| region.contains(lon, lat))
        .map(|i| i as u32)
}

/// Primitive id → region index map.
///
/// Every primitive appears exactly once; `None` means ocean/fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    regions: Vec<Option<u32>>,
    region_count: usize,
}

impl Assignment {
    /// Classifies every primitive of `tess` against `regions`.
    pub fn classify(tess: &Tessellation, regions: &[Region]) -> Self {
        let assigned: Vec<Option<u32>> = tess
            .primitives
            .par_iter()
            .map(|primitive| {
                let (lat, lon) = lat_lon_of(primitive.anchor);
                find_region(regions, lat, lon)
            })
            .collect();

        let assignment = Self {
            regions: assigned,
            region_count: regions.len(),
        };
        info!(
            primitives = assignment.len(),
            assigned = assignment.assigned_count(),
            unassigned = assignment.unassigned_count(),
            "primitives classified"
        );
        assignment
    }

    /// Builds an assignment from a precomputed map.
    pub fn from_map(regions: Vec<Option<u32>>, region_count: usize) -> Self {
        Self {
            regions,
            region_count,
        }
    }

    /// Number of classified primitives.
    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if there are no primitives.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Region index of a primitive, `None` for ocean/fill.
    #[inline]
    pub fn region_of(&self, primitive: usize) -> Option<u32> {
        self.regions.get(primitive).copied().flatten()
    }

    /// The raw map, indexed by primitive id.
    #[inline]
    pub fn as_slice(&self) -> &[Option<u32>] {
        &self.regions
    }

    /// Primitive ids per region, in region order; ids ascend in each list.
    pub fn primitives_by_region(&self) -> Vec<Vec<u32>> {
        let mut groups = vec![Vec::new(); self.region_count];
        for (id, region) in self.regions.iter().enumerate() {
            if let Some(r) = region {
                if let Some(group) = groups.get_mut(*r as usize) {
                    group.push(id as u32);
                }
            }
        }
        groups
    }

    /// Ids of all assigned primitives, ascending.
    pub fn assigned(&self) -> Vec<u32> {
        self.ids_where(|r| r.is_some())
    }

    /// Ids of all unassigned primitives, ascending.
    pub fn unassigned(&self) -> Vec<u32> {
        self.ids_where(|r| r.is_none())
    }

    /// Number of assigned primitives.
    pub fn assigned_count(&self) -> usize {
        self.regions.iter().filter(|r| r.is_some()).count()
    }

    /// Number of unassigned primitives.
    pub fn unassigned_count(&self) -> usize {
        self.len() - self.assigned_count()
    }

    fn ids_where(&self, keep: impl Fn(&Option<u32>) -> bool) -> Vec<u32> {
        self.regions
            .iter()
            .enumerate()
            .filter(|(_, r)| keep(r))
            .map(|(id, _)| id as u32)
            .collect()
    }
}
