//! # Face Adjacency
//!
//! Index-based adjacency over a closed triangle mesh, enough to walk the
//! faces around a vertex in rotation order.
//!
//! ## Structure
//!
//! - **Directed edge map**: `(from, to)` → the face whose loop contains that
//!   directed edge. In a consistently wound closed mesh every edge appears
//!   once in each direction, so the map doubles as the twin lookup.
//! - **Vertex seed**: one incident face per vertex to start a walk from.
//!
//! No pointers: faces and vertices are addressed by `u32` ids into the
//! tessellation's flat arrays, which keeps the structure `Sync` for parallel
//! walks.

use std::collections::HashMap;

/// Sentinel for a vertex no face references.
const INVALID: u32 = u32::MAX;

/// Why a walk around a vertex could not produce a closed ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkFailure {
    /// No face references the vertex.
    Isolated,
    /// Crossing an edge led to no face: the mesh is open there.
    OpenEdge {
        /// Vertex on the far end of the missing edge
        towards: u32,
    },
    /// The walk did not come back to its first face within the step limit.
    Unclosed {
        /// Faces visited before giving up
        steps: usize,
    },
    /// The walk closed around fewer than 3 faces.
    Degenerate {
        /// Faces in the closed ring
        sides: usize,
    },
}

/// Directed-edge adjacency for a triangle mesh.
#[derive(Debug, Clone)]
pub struct FaceAdjacency {
    /// (from, to) -> face containing the directed edge
    edge_face: HashMap<(u32, u32), u32>,
    /// One incident face per vertex (INVALID if isolated)
    vertex_face: Vec<u32>,
}

impl FaceAdjacency {
    /// Builds adjacency for `faces` over `vertex_count` vertices.
    ///
    /// # Example
    ///
    /// ```rust
    /// use globe_mesh::tessellation::{FaceAdjacency, Icosphere};
    ///
    /// let ico = Icosphere::new(1, 1.0);
    /// let adjacency = FaceAdjacency::new(ico.vertices.len(), &ico.faces);
    /// let ring = adjacency.faces_around(&ico.faces, 0, 8).unwrap();
    /// assert_eq!(ring.len(), 5);
    /// ```
    pub fn new(vertex_count: usize, faces: &[[u32; 3]]) -> Self {
        let mut edge_face = HashMap::with_capacity(faces.len() * 3);
        let mut vertex_face = vec![INVALID; vertex_count];

        for (fi, face) in faces.iter().enumerate() {
            for i in 0..3 {
                let from = face[i];
                let to = face[(i + 1) % 3];
                edge_face.insert((from, to), fi as u32);
                if vertex_face[from as usize] == INVALID {
                    vertex_face[from as usize] = fi as u32;
                }
            }
        }

        Self {
            edge_face,
            vertex_face,
        }
    }

    /// Returns the face containing the directed edge `from -> to`.
    #[inline]
    pub fn face_of_edge(&self, from: u32, to: u32) -> Option<u32> {
        self.edge_face.get(&(from, to)).copied()
    }

    /// Walks the faces around `vertex` in rotation order.
    ///
    /// From a face `(vertex, next, prev)` the walk crosses the edge shared
    /// with `prev`, i.e. continues in the face owning `vertex -> prev`. With
    /// outward winding this visits the faces counter-clockwise seen from
    /// outside. Stops when the first face comes around again, or fails after
    /// `limit` faces.
    pub fn faces_around(
        &self,
        faces: &[[u32; 3]],
        vertex: u32,
        limit: usize,
    ) -> Result<Vec<u32>, WalkFailure> {
        let start = match self.vertex_face.get(vertex as usize) {
            Some(&f) if f != INVALID => f,
            _ => return Err(WalkFailure::Isolated),
        };

        let mut ring = Vec::with_capacity(limit.min(8));
        let mut face = start;

        for _ in 0..limit {
            ring.push(face);

            let tri = faces[face as usize];
            let Some(corner) = tri.iter().position(|&v| v == vertex) else {
                return Err(WalkFailure::Isolated);
            };
            let prev = tri[(corner + 2) % 3];

            let next = self
                .face_of_edge(vertex, prev)
                .ok_or(WalkFailure::OpenEdge { towards: prev })?;
            if next == start {
                return Ok(ring);
            }
            face = next;
        }

        Err(WalkFailure::Unclosed { steps: ring.len() })
    }
}
