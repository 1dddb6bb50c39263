//! # Boundary Ribbons
//!
//! Thin raised strips traced along a patch outline. Every boundary edge
//! becomes one box-shaped segment:
//!
//! ```text
//!        7 ─────── 6          top = base + radial * height
//!       /│        /│
//!      4 ─────── 5 │
//!      │ 3 ──────│─ 2         left side  (+perp)
//!      │/        │/
//!      0 ─────── 1            right side (-perp)
//!     v1   edge → v2
//! ```
//!
//! Four walls and the outward cap are emitted. The base is left open: it
//! sits slightly sunk into the surface below and is never visible.

use super::boundary::boundary_edges;
use crate::mesh::Mesh;
use crate::params::BorderParams;
use config::constants::ToleranceConfig;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::warn;

const SEGMENT_FACES: [[u32; 4]; 5] = [
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
    [4, 5, 6, 7],
];

/// Counts from one ribbon build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RibbonReport {
    /// Segments emitted
    pub segments: usize,
    /// Edges skipped for near-zero length after projection
    pub degenerate_edges: usize,
}

impl RibbonReport {
    /// Adds another report's counts to this one.
    pub fn absorb(&mut self, other: RibbonReport) {
        self.segments += other.segments;
        self.degenerate_edges += other.degenerate_edges;
    }
}

/// Builds the border ribbon of `patch` on top of a surface at
/// `radius + above`.
///
/// Endpoints are projected to `radius + above - embed_epsilon`. Edges
/// shorter than `tolerance.degenerate_length` after projection are skipped.
/// A patch without boundary edges yields an empty mesh.
///
/// # Example
///
/// ```rust
/// use config::constants::ToleranceConfig;
/// use globe_mesh::{ops::build_ribbon, params::BorderParams, Mesh};
///
/// let (border, tolerance) = (BorderParams::default(), ToleranceConfig::default());
/// let (ribbon, report) = build_ribbon(&Mesh::new(), 1.0, 0.02, &border, &tolerance);
/// assert!(ribbon.is_empty());
/// assert_eq!(report.segments, 0);
/// ```
pub fn build_ribbon(
    patch: &Mesh,
    radius: f64,
    above: f64,
    border: &BorderParams,
    tolerance: &ToleranceConfig,
) -> (Mesh, RibbonReport) {
    let edges = boundary_edges(patch);
    let mut ribbon = Mesh::with_capacity(edges.len() * 8, edges.len() * SEGMENT_FACES.len());
    let mut report = RibbonReport::default();
    let base = radius + above - border.embed_epsilon;

    for [a, b] in edges {
        let v1 = patch.vertex(a).normalize_or_zero() * base;
        let v2 = patch.vertex(b).normalize_or_zero() * base;
        let Some(dir) = edge_direction(v1, v2, tolerance.degenerate_length) else {
            warn!(from = a, to = b, "degenerate boundary edge skipped");
            report.degenerate_edges += 1;
            continue;
        };

        let perp1 = v1.normalize_or_zero().cross(dir).normalize_or_zero();
        let perp2 = v2.normalize_or_zero().cross(dir).normalize_or_zero();
        push_segment(&mut ribbon, [v1, v2], [perp1, perp2], border);
        report.segments += 1;
    }

    (ribbon, report)
}

/// Traces a ribbon around a closed ring of points, lifted by `gap` along
/// the ring's mean direction.
///
/// Used to outline the top face of a marker.
pub fn closing_ribbon(
    ring: &[DVec3],
    border: &BorderParams,
    gap: f64,
    tolerance: &ToleranceConfig,
) -> (Mesh, RibbonReport) {
    let mut ribbon = Mesh::with_capacity(ring.len() * 8, ring.len() * SEGMENT_FACES.len());
    let mut report = RibbonReport::default();

    let n = ring.iter().copied().sum::<DVec3>().normalize_or_zero();
    if ring.len() < 3 || n == DVec3::ZERO {
        return (ribbon, report);
    }

    for i in 0..ring.len() {
        let v1 = ring[i] + n * gap;
        let v2 = ring[(i + 1) % ring.len()] + n * gap;
        let Some(dir) = edge_direction(v1, v2, tolerance.degenerate_length) else {
            warn!(corner = i, "degenerate closing edge skipped");
            report.degenerate_edges += 1;
            continue;
        };
        let perp = n.cross(dir).normalize_or_zero();
        push_segment(&mut ribbon, [v1, v2], [perp, perp], border);
        report.segments += 1;
    }

    (ribbon, report)
}

fn edge_direction(v1: DVec3, v2: DVec3, min_length: f64) -> Option<DVec3> {
    let edge = v2 - v1;
    (edge.length() >= min_length).then(|| edge.normalize())
}

/// Appends one eight-vertex segment.
fn push_segment(ribbon: &mut Mesh, ends: [DVec3; 2], perps: [DVec3; 2], border: &BorderParams) {
    let half = border.width * 0.5;
    let [v1, v2] = ends;
    let [p1, p2] = perps;

    let ring = [v1 - p1 * half, v2 - p2 * half, v2 + p2 * half, v1 + p1 * half];
    let first = ribbon.vertex_count() as u32;
    for p in ring {
        ribbon.add_vertex(p);
    }
    for p in ring {
        ribbon.add_vertex(p + p.normalize_or_zero() * border.height);
    }
    for face in SEGMENT_FACES {
        ribbon.add_face(&face.map(|i| first + i));
    }
}
