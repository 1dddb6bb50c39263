//! # Radial Extrusion
//!
//! Thickens a patch lying on a sphere into a shell. Each vertex moves along
//! its own radial direction, so offset surfaces stay concentric with the
//! globe instead of following a single mesh normal.
//!
//! ## Topology
//!
//! With `F` kept input faces and `W` boundary edges:
//!
//! | offsets        | faces           | output faces |
//! |----------------|-----------------|--------------|
//! | both zero      | input unchanged | `F`          |
//! | `above` only   | top, flipped waist, upper walls | `2F + W` |
//! | `below` only   | waist, reversed bottom, lower walls | `2F + W` |
//! | both           | top, reversed bottom, both walls | `2F + 2W` |
//!
//! When both sides move the waist would sit inside the solid, so it is
//! dropped and its interior vertices are compacted away. Walls are always
//! built from the waist's boundary, so upper and lower walls meet at the
//! original outline.

use super::boundary::boundary_edges;
use crate::mesh::Mesh;
use config::constants::ToleranceConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Counts from one extrusion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtrusionReport {
    /// Input faces carried into the shell
    pub faces_in: usize,
    /// Side wall quads emitted
    pub walls: usize,
    /// Input faces skipped for repeated corners or zero area
    pub degenerate_faces: usize,
    /// Boundary edges skipped for zero length
    pub degenerate_edges: usize,
}

impl ExtrusionReport {
    /// Adds another report's counts to this one.
    pub fn absorb(&mut self, other: ExtrusionReport) {
        self.faces_in += other.faces_in;
        self.walls += other.walls;
        self.degenerate_faces += other.degenerate_faces;
        self.degenerate_edges += other.degenerate_edges;
    }
}

/// Extrudes `patch` outward by `above` and inward by `below`.
///
/// Vertices are first re-projected onto `radius`. Offsets must be
/// non-negative; [`crate::GlobeParams::validate`] guarantees that for
/// pipeline runs. Boundary edges shorter than
/// `tolerance.degenerate_length` get no wall.
///
/// # Example
///
/// ```rust
/// use config::constants::ToleranceConfig;
/// use globe_mesh::{ops::extrude_radial, Mesh};
/// use glam::DVec3;
///
/// let mut patch = Mesh::new();
/// patch.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// patch.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// patch.add_vertex(DVec3::new(0.0, 0.0, 1.0));
/// patch.add_face(&[0, 1, 2]);
///
/// let (shell, report) = extrude_radial(&patch, 1.0, 0.1, 0.0, &ToleranceConfig::default());
/// assert_eq!(shell.face_count(), 2 + 3);
/// assert_eq!(report.walls, 3);
/// ```
pub fn extrude_radial(
    patch: &Mesh,
    radius: f64,
    above: f64,
    below: f64,
    tolerance: &ToleranceConfig,
) -> (Mesh, ExtrusionReport) {
    let mut report = ExtrusionReport::default();
    if above <= 0.0 && below <= 0.0 {
        report.faces_in = patch.face_count();
        return (patch.clone(), report);
    }

    let mut projected = patch.clone();
    projected.project_to_sphere(radius);

    let mut waist = Mesh::with_capacity(projected.vertex_count(), projected.face_count());
    for &v in projected.vertices() {
        waist.add_vertex(v);
    }
    for fi in 0..projected.face_count() {
        if projected.is_face_degenerate(fi) {
            warn!(face = fi, "degenerate face skipped during extrusion");
            report.degenerate_faces += 1;
            continue;
        }
        waist.add_face(projected.face(fi));
    }
    report.faces_in = waist.face_count();

    let mut shell = Mesh::with_capacity(waist.vertex_count() * 3, waist.face_count() * 3);
    for &v in waist.vertices() {
        shell.add_vertex(v);
    }

    let top = (above > 0.0).then(|| {
        let offset = shell.vertex_count() as u32;
        offset_layer(&mut shell, &waist, radius + above);
        offset
    });
    let bottom = (below > 0.0).then(|| {
        let offset = shell.vertex_count() as u32;
        offset_layer(&mut shell, &waist, radius - below);
        offset
    });

    for face in waist.faces() {
        if let Some(t) = top {
            let shifted: Vec<u32> = face.iter().map(|&v| v + t).collect();
            shell.add_face(&shifted);
        }
        if let Some(b) = bottom {
            let shifted: Vec<u32> = face.iter().rev().map(|&v| v + b).collect();
            shell.add_face(&shifted);
        }
        match (top, bottom) {
            (Some(_), None) => shell.add_face(&face.iter().rev().copied().collect::<Vec<_>>()),
            (None, Some(_)) => shell.add_face(face),
            _ => {}
        }
    }

    for [a, b] in boundary_edges(&waist) {
        if waist.vertex(a).distance(waist.vertex(b)) < tolerance.degenerate_length {
            warn!(from = a, to = b, "degenerate boundary edge skipped during extrusion");
            report.degenerate_edges += 1;
            continue;
        }
        if let Some(t) = top {
            shell.add_face(&[a, b, b + t, a + t]);
            report.walls += 1;
        }
        if let Some(l) = bottom {
            shell.add_face(&[b, a, a + l, b + l]);
            report.walls += 1;
        }
    }

    if top.is_some() && bottom.is_some() {
        shell.compact();
    }

    (shell, report)
}

/// Appends a copy of every waist vertex moved to `radius` along its own
/// direction.
fn offset_layer(shell: &mut Mesh, waist: &Mesh, radius: f64) {
    for &v in waist.vertices() {
        shell.add_vertex(v.normalize_or_zero() * radius);
    }
}
