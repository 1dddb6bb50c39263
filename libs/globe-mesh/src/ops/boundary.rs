//! Open boundary of a patch: edges bordered by exactly one face.

use crate::mesh::Mesh;
use std::collections::HashMap;

/// Returns the boundary edges of `mesh`.
///
/// Edges are counted by their undirected vertex pair. Each edge used by
/// exactly one face is returned once, directed as it runs in that face, so
/// the face lies to its left seen from the face's front. Order follows the
/// faces, then the corners within each face.
///
/// The result is empty exactly when every edge is shared by two or more
/// faces.
///
/// # Example
///
/// ```rust
/// use globe_mesh::{ops::boundary_edges, Mesh};
/// use glam::DVec3;
///
/// let mut quad = Mesh::new();
/// quad.add_vertex(DVec3::ZERO);
/// quad.add_vertex(DVec3::X);
/// quad.add_vertex(DVec3::X + DVec3::Y);
/// quad.add_vertex(DVec3::Y);
/// quad.add_face(&[0, 1, 2]);
/// quad.add_face(&[0, 2, 3]);
/// assert_eq!(boundary_edges(&quad), vec![[0, 1], [1, 2], [2, 3], [3, 0]]);
/// ```
pub fn boundary_edges(mesh: &Mesh) -> Vec<[u32; 2]> {
    let mut uses: HashMap<(u32, u32), usize> = HashMap::with_capacity(mesh.face_count() * 3);
    for face in mesh.faces() {
        for (a, b) in face_edges(face) {
            *uses.entry(undirected(a, b)).or_insert(0) += 1;
        }
    }

    let mut edges = Vec::new();
    for face in mesh.faces() {
        for (a, b) in face_edges(face) {
            if uses.get(&undirected(a, b)) == Some(&1) {
                edges.push([a, b]);
            }
        }
    }
    edges
}

/// Returns true if `mesh` has faces and no boundary edge.
pub fn is_closed(mesh: &Mesh) -> bool {
    !mesh.is_empty() && boundary_edges(mesh).is_empty()
}

fn face_edges(face: &[u32]) -> impl Iterator<Item = (u32, u32)> + '_ {
    let n = face.len();
    (0..n).map(move |i| (face[i], face[(i + 1) % n]))
}

#[inline]
fn undirected(a: u32, b: u32) -> (u32, u32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
