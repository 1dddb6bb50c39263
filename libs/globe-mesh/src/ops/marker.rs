//! # Point Markers
//!
//! Small closed prisms standing on the globe at point features.
//!
//! ## Anchoring
//!
//! 1. Find the region containing the point with the same test used for
//!    classification; candidates are that region's primitives
//! 2. Without a containing region, candidates are all assigned primitives
//! 3. The candidate whose anchor direction has the largest dot product with
//!    the point's direction wins
//! 4. Without any candidate the marker is built directly on the point's own
//!    direction, with no primitive underneath
//!
//! An anchored marker reuses its primitive's outline, pulled towards the
//! anchor direction by `shrink` so it stays inside the host primitive. A
//! direct marker is a regular polygon of `sides` corners and `radius`.

use crate::assign::{find_region, Assignment};
use crate::geo::{direction_from_lat_lon, Region};
use crate::mesh::Mesh;
use crate::params::MarkerParams;
use crate::tessellation::Tessellation;
use config::constants::EPSILON;
use glam::DVec3;
use std::f64::consts::TAU;

/// Where a marker found its footing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerAnchor {
    /// Closest primitive of the region containing the point.
    Region {
        /// Containing region index
        region: u32,
        /// Anchor primitive id
        primitive: u32,
    },
    /// Closest assigned primitive anywhere; the point lies in no region.
    Assigned {
        /// Anchor primitive id
        primitive: u32,
    },
    /// No primitive; placed on the point's own direction.
    Direct,
}

impl MarkerAnchor {
    /// Anchor primitive id, if any.
    pub fn primitive(&self) -> Option<u32> {
        match *self {
            MarkerAnchor::Region { primitive, .. } | MarkerAnchor::Assigned { primitive } => {
                Some(primitive)
            }
            MarkerAnchor::Direct => None,
        }
    }
}

/// A built marker prism.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Closed prism
    pub mesh: Mesh,
    /// Top face corners, counter-clockwise seen from outside
    pub top: Vec<DVec3>,
    /// How the marker was placed
    pub anchor: MarkerAnchor,
}

/// Picks the anchor for a point at `(lat, lon)`.
pub fn locate_anchor(
    lat: f64,
    lon: f64,
    tess: &Tessellation,
    regions: &[Region],
    assignment: &Assignment,
) -> MarkerAnchor {
    let dir = direction_from_lat_lon(lat, lon);

    if let Some(region) = find_region(regions, lat, lon) {
        let candidates =
            (0..assignment.len()).filter(|&id| assignment.region_of(id) == Some(region));
        if let Some(primitive) = closest(tess, dir, candidates) {
            return MarkerAnchor::Region { region, primitive };
        }
    }

    let assigned = (0..assignment.len()).filter(|&id| assignment.region_of(id).is_some());
    match closest(tess, dir, assigned) {
        Some(primitive) => MarkerAnchor::Assigned { primitive },
        None => MarkerAnchor::Direct,
    }
}

fn closest(
    tess: &Tessellation,
    dir: DVec3,
    candidates: impl Iterator<Item = usize>,
) -> Option<u32> {
    let mut best = None;
    let mut best_dot = f64::NEG_INFINITY;
    for id in candidates {
        let Some(primitive) = tess.primitives.get(id) else {
            continue;
        };
        let dot = primitive.anchor.dot(dir);
        if dot > best_dot {
            best_dot = dot;
            best = Some(id as u32);
        }
    }
    best
}

/// Places a marker for the point at `(lat, lon)`.
///
/// `embed` sinks the marker base below `radius + above` so it does not
/// float over the shell it stands on.
#[allow(clippy::too_many_arguments)]
pub fn place_marker(
    lat: f64,
    lon: f64,
    tess: &Tessellation,
    regions: &[Region],
    assignment: &Assignment,
    radius: f64,
    params: &MarkerParams,
    embed: f64,
) -> Marker {
    let anchor = locate_anchor(lat, lon, tess, regions, assignment);
    match anchor.primitive() {
        Some(primitive) => {
            let mut marker = anchored_marker(tess, primitive as usize, radius, params, embed);
            marker.anchor = anchor;
            marker
        }
        None => direct_marker(direction_from_lat_lon(lat, lon), radius, params, embed),
    }
}

/// Marker shaped after a tessellation primitive.
pub fn anchored_marker(
    tess: &Tessellation,
    primitive: usize,
    radius: f64,
    params: &MarkerParams,
    embed: f64,
) -> Marker {
    let anchor = tess.primitive(primitive).anchor;
    let base_radius = radius + params.above - embed;
    let base: Vec<DVec3> = tess
        .corner_positions(primitive)
        .into_iter()
        .map(|corner| {
            corner
                .normalize_or_zero()
                .lerp(anchor, params.shrink)
                .normalize_or_zero()
                * base_radius
        })
        .collect();

    let (mesh, top) = prism(&base, anchor, params.above, params.below);
    Marker {
        mesh,
        top,
        anchor: MarkerAnchor::Assigned {
            primitive: primitive as u32,
        },
    }
}

/// Regular-polygon marker on an arbitrary direction.
pub fn direct_marker(direction: DVec3, radius: f64, params: &MarkerParams, embed: f64) -> Marker {
    let n = direction.normalize_or_zero();
    let center = n * (radius + params.above - embed);
    let (t1, t2) = tangent_basis(n);

    let sides = params.sides.max(3);
    let base: Vec<DVec3> = (0..sides)
        .map(|i| {
            let theta = TAU * i as f64 / sides as f64;
            center + (t1 * theta.cos() + t2 * theta.sin()) * params.radius
        })
        .collect();

    let (mesh, top) = prism(&base, n, params.above, params.below);
    Marker {
        mesh,
        top,
        anchor: MarkerAnchor::Direct,
    }
}

/// Orthonormal tangent pair with `t1 × t2 = n`.
fn tangent_basis(n: DVec3) -> (DVec3, DVec3) {
    let mut t1 = n.cross(DVec3::Z);
    if t1.length() < 1e-6 {
        t1 = n.cross(DVec3::Y);
    }
    let t1 = t1.normalize_or_zero();
    let t2 = n.cross(t1).normalize_or_zero();
    (t1, t2)
}

/// Closes a counter-clockwise base ring into a prism along `axis`.
///
/// The top ring sits `above` out, a bottom ring `below` in. A zero offset
/// skips that layer; a marker with both at zero is a single cap.
fn prism(base: &[DVec3], axis: DVec3, above: f64, below: f64) -> (Mesh, Vec<DVec3>) {
    let k = base.len() as u32;
    let mut mesh = Mesh::with_capacity(base.len() * 3, base.len() * 2 + 2);
    for &p in base {
        mesh.add_vertex(p);
    }

    let top = (above > EPSILON).then(|| {
        for &p in base {
            mesh.add_vertex(p + axis * above);
        }
        k
    });
    let bottom = (below > EPSILON).then(|| {
        let offset = mesh.vertex_count() as u32;
        for &p in base {
            mesh.add_vertex(p - axis * below);
        }
        offset
    });

    if let Some(t) = top {
        for i in 0..k {
            let j = (i + 1) % k;
            mesh.add_face(&[i, j, t + j, t + i]);
        }
    }
    let cap = top.unwrap_or(0);
    mesh.add_face(&(cap..cap + k).collect::<Vec<_>>());

    if let Some(b) = bottom {
        for i in 0..k {
            let j = (i + 1) % k;
            mesh.add_face(&[j, i, b + i, b + j]);
        }
        mesh.add_face(&(b..b + k).rev().collect::<Vec<_>>());
    } else if top.is_some() {
        mesh.add_face(&(0..k).rev().collect::<Vec<_>>());
    }

    let top_ring = (cap..cap + k).map(|v| mesh.vertex(v)).collect();
    (mesh, top_ring)
}
