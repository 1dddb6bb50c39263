//! # Goldberg Dual
//!
//! Builds one polygon cell per icosphere vertex from the centroids of the
//! faces around it.
//!
//! ## Algorithm
//!
//! 1. Project every icosphere face centroid onto the sphere: these are the
//!    dual vertices, one per base face, shared between neighbouring cells
//! 2. For each base vertex, walk the incident faces in rotation order
//!    (see [`FaceAdjacency::faces_around`]) and use the visited face ids as
//!    the cell's corner loop
//! 3. A walk that does not close is reported as a [`DualDefect`]; no cell is
//!    fabricated from a partial ring
//!
//! Walks are independent per vertex and run in parallel.

use super::adjacency::{FaceAdjacency, WalkFailure};
use super::icosphere::Icosphere;
use super::Primitive;
use glam::DVec3;
use rayon::prelude::*;
use tracing::warn;

/// A base vertex whose dual cell could not be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualDefect {
    /// Originating icosphere vertex
    pub vertex: u32,
    /// What went wrong during the walk
    pub failure: WalkFailure,
}

/// Outcome of a dual computation.
#[derive(Debug, Clone, Default)]
pub struct DualMesh {
    /// Dual vertices: projected base face centroids, indexed by base face id
    pub vertices: Vec<DVec3>,
    /// Cells in base vertex order, skipping defective vertices
    pub cells: Vec<Primitive>,
    /// Vertices whose walk did not close
    pub defects: Vec<DualDefect>,
}

impl DualMesh {
    /// Computes the Goldberg dual of an icosphere.
    ///
    /// `walk_limit` bounds the faces visited per vertex.
    ///
    /// # Example
    ///
    /// ```rust
    /// use globe_mesh::tessellation::{DualMesh, Icosphere};
    ///
    /// let dual = DualMesh::from_icosphere(&Icosphere::new(2, 1.0), 8);
    /// assert_eq!(dual.cells.len(), 42);
    /// assert!(dual.defects.is_empty());
    /// ```
    pub fn from_icosphere(ico: &Icosphere, walk_limit: usize) -> Self {
        let vertices: Vec<DVec3> = (0..ico.faces.len())
            .map(|f| ico.face_centroid(f).normalize() * ico.radius)
            .collect();

        let adjacency = FaceAdjacency::new(ico.vertices.len(), &ico.faces);

        let results: Vec<Result<Primitive, DualDefect>> = (0..ico.vertices.len() as u32)
            .into_par_iter()
            .map(|v| {
                let ring = adjacency
                    .faces_around(&ico.faces, v, walk_limit)
                    .map_err(|failure| DualDefect { vertex: v, failure })?;
                if ring.len() < 3 {
                    return Err(DualDefect {
                        vertex: v,
                        failure: WalkFailure::Degenerate { sides: ring.len() },
                    });
                }
                Ok(Primitive::new(ring, ico.vertices[v as usize].normalize()))
            })
            .collect();

        let mut cells = Vec::with_capacity(results.len());
        let mut defects = Vec::new();
        for result in results {
            match result {
                Ok(cell) => cells.push(cell),
                Err(defect) => {
                    warn!(vertex = defect.vertex, failure = ?defect.failure, "dual cell walk failed");
                    defects.push(defect);
                }
            }
        }

        Self {
            vertices,
            cells,
            defects,
        }
    }
}
