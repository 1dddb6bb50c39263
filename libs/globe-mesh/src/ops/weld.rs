//! # Region Surface Builder
//!
//! Merges a set of tessellation primitives into one patch, welding corners
//! by quantized position.
//!
//! ## Welding
//!
//! Every corner position maps to the key `round(c * 10^d)` per coordinate.
//! The first corner with a key allocates an output vertex, later corners
//! with the same key reuse it. Faces keep their input winding.
//!
//! The tessellation generates a shared corner once and copies the same
//! `f64` into every primitive, so any precision down to the generator's own
//! rounding welds shared corners and leaves distinct ones apart.

use crate::mesh::Mesh;
use crate::tessellation::Tessellation;
use config::constants::ToleranceConfig;
use glam::DVec3;
use std::collections::HashMap;

/// Integer weld key of a position.
pub type WeldKey = (i64, i64, i64);

/// Quantizes a position at `scale` (`10^decimals`).
///
/// # Example
///
/// ```rust
/// use globe_mesh::ops::weld_key;
/// use glam::DVec3;
///
/// let a = weld_key(DVec3::new(0.1234564, 0.0, 1.0), 1e6);
/// let b = weld_key(DVec3::new(0.1234561, 0.0, 1.0), 1e6);
/// assert_eq!(a, b);
/// ```
#[inline]
pub fn weld_key(p: DVec3, scale: f64) -> WeldKey {
    (
        (p.x * scale).round() as i64,
        (p.y * scale).round() as i64,
        (p.z * scale).round() as i64,
    )
}

/// Incremental mesh builder that welds coincident corners.
#[derive(Debug)]
pub struct Welder {
    scale: f64,
    lookup: HashMap<WeldKey, u32>,
    mesh: Mesh,
}

impl Welder {
    /// Creates a welder at the given precision.
    pub fn new(tolerance: &ToleranceConfig) -> Self {
        Self {
            scale: tolerance.weld_scale(),
            lookup: HashMap::new(),
            mesh: Mesh::new(),
        }
    }

    /// Returns the output vertex for a position, allocating it on first use.
    pub fn vertex(&mut self, p: DVec3) -> u32 {
        let mesh = &mut self.mesh;
        *self
            .lookup
            .entry(weld_key(p, self.scale))
            .or_insert_with(|| mesh.add_vertex(p))
    }

    /// Adds a polygon by corner positions.
    pub fn add_polygon(&mut self, corners: impl IntoIterator<Item = DVec3>) {
        let face: Vec<u32> = corners.into_iter().map(|p| self.vertex(p)).collect();
        self.mesh.add_face(&face);
    }

    /// Returns the welded mesh.
    pub fn finish(self) -> Mesh {
        self.mesh
    }
}

/// Welds coincident vertices of an existing mesh.
pub fn weld_mesh(mesh: &Mesh, tolerance: &ToleranceConfig) -> Mesh {
    let mut welder = Welder::new(tolerance);
    for fi in 0..mesh.face_count() {
        welder.add_polygon(mesh.face_positions(fi));
    }
    welder.finish()
}

/// A named merged surface of one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionPatch {
    /// Region name
    pub name: String,
    /// Merged primitives
    pub mesh: Mesh,
}

/// Builds the patch of primitives `ids` from `tess`.
///
/// With `weld` set, shared corners collapse into one vertex. Without it
/// every primitive keeps its own corner copies, which is what per-cell
/// output wants.
///
/// # Example
///
/// ```rust
/// use config::constants::ToleranceConfig;
/// use globe_mesh::ops::build_patch;
/// use globe_mesh::tessellation::{Tessellation, TessellationKind};
///
/// let tess = Tessellation::generate(TessellationKind::Icosphere, 1, 1.0, 8);
/// let ids: Vec<u32> = (0..tess.primitive_count() as u32).collect();
///
/// let welded = build_patch("all", &ids, &tess, Some(&ToleranceConfig::default()));
/// assert_eq!(welded.mesh.vertex_count(), 12);
///
/// let loose = build_patch("all", &ids, &tess, None);
/// assert_eq!(loose.mesh.vertex_count(), 60);
/// ```
pub fn build_patch(
    name: impl Into<String>,
    ids: &[u32],
    tess: &Tessellation,
    weld: Option<&ToleranceConfig>,
) -> RegionPatch {
    let mesh = match weld {
        Some(tolerance) => {
            let mut welder = Welder::new(tolerance);
            for &id in ids {
                welder.add_polygon(tess.corner_positions(id as usize));
            }
            welder.finish()
        }
        None => {
            let corners: usize = ids.iter().map(|&id| tess.primitive(id as usize).sides()).sum();
            let mut mesh = Mesh::with_capacity(corners, ids.len());
            for &id in ids {
                let face: Vec<u32> = tess
                    .corner_positions(id as usize)
                    .into_iter()
                    .map(|p| mesh.add_vertex(p))
                    .collect();
                mesh.add_face(&face);
            }
            mesh
        }
    };

    RegionPatch {
        name: name.into(),
        mesh,
    }
}
