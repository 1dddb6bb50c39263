//! # Icosphere
//!
//! Subdivided icosahedron with shared, index-addressed vertices.
//!
//! ## Algorithm
//!
//! - Start from the 12 golden-ratio vertices and 20 outward faces
//! - Each split replaces a triangle by four, reusing one midpoint per edge
//!   through an edge cache so neighbouring faces share the same vertex id
//! - Midpoints are projected back onto the unit sphere, then everything is
//!   scaled to the requested radius once at the end

use glam::DVec3;
use std::collections::HashMap;

/// Number of midpoint splits applied for a subdivision level.
///
/// Level 1 is the bare icosahedron; level 0 is treated as level 1.
///
/// # Example
///
/// ```rust
/// use globe_mesh::tessellation::splits_for_level;
///
/// assert_eq!(splits_for_level(0), 0);
/// assert_eq!(splits_for_level(1), 0);
/// assert_eq!(splits_for_level(3), 2);
/// ```
#[inline]
pub fn splits_for_level(level: u32) -> u32 {
    level.max(1) - 1
}

/// Closed-form vertex count of the icosphere at a subdivision level.
///
/// `10 * 4^splits + 2`, which is also the cell count of its Goldberg dual.
///
/// # Example
///
/// ```rust
/// use globe_mesh::tessellation::icosphere_vertex_count;
///
/// assert_eq!(icosphere_vertex_count(1), 12);
/// assert_eq!(icosphere_vertex_count(2), 42);
/// assert_eq!(icosphere_vertex_count(3), 162);
/// ```
pub fn icosphere_vertex_count(level: u32) -> usize {
    10 * 4usize.pow(splits_for_level(level)) + 2
}

/// Closed-form face count of the icosphere at a subdivision level.
pub fn icosphere_face_count(level: u32) -> usize {
    20 * 4usize.pow(splits_for_level(level))
}

/// Triangulated sphere built by subdividing an icosahedron.
///
/// All faces are wound counter-clockwise seen from outside, and every
/// vertex lies at distance `radius` from the origin.
#[derive(Debug, Clone)]
pub struct Icosphere {
    /// Vertex positions on the sphere
    pub vertices: Vec<DVec3>,
    /// Triangle vertex indices, outward winding
    pub faces: Vec<[u32; 3]>,
    /// Sphere radius
    pub radius: f64,
}

impl Icosphere {
    /// Generates an icosphere at `level` on a sphere of `radius`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use globe_mesh::tessellation::Icosphere;
    ///
    /// let ico = Icosphere::new(2, 1.0);
    /// assert_eq!(ico.vertices.len(), 42);
    /// assert_eq!(ico.faces.len(), 80);
    /// ```
    pub fn new(level: u32, radius: f64) -> Self {
        let (mut vertices, mut faces) = icosahedron();

        for _ in 0..splits_for_level(level) {
            faces = subdivide(&mut vertices, &faces);
        }

        for v in &mut vertices {
            *v *= radius;
        }

        Self {
            vertices,
            faces,
            radius,
        }
    }

    /// Returns the corner positions of a face.
    pub fn face_positions(&self, face: usize) -> [DVec3; 3] {
        let [a, b, c] = self.faces[face];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Returns the arithmetic centroid of a face (inside the sphere).
    pub fn face_centroid(&self, face: usize) -> DVec3 {
        let [a, b, c] = self.face_positions(face);
        (a + b + c) / 3.0
    }
}

/// Unit icosahedron with outward counter-clockwise faces.
fn icosahedron() -> (Vec<DVec3>, Vec<[u32; 3]>) {
    let phi = (1.0 + 5.0_f64.sqrt()) * 0.5;

    let vertices: Vec<DVec3> = [
        DVec3::new(-1.0, phi, 0.0),
        DVec3::new(1.0, phi, 0.0),
        DVec3::new(-1.0, -phi, 0.0),
        DVec3::new(1.0, -phi, 0.0),
        DVec3::new(0.0, -1.0, phi),
        DVec3::new(0.0, 1.0, phi),
        DVec3::new(0.0, -1.0, -phi),
        DVec3::new(0.0, 1.0, -phi),
        DVec3::new(phi, 0.0, -1.0),
        DVec3::new(phi, 0.0, 1.0),
        DVec3::new(-phi, 0.0, -1.0),
        DVec3::new(-phi, 0.0, 1.0),
    ]
    .iter()
    .map(|v| v.normalize())
    .collect();

    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    // Enforce outward winding regardless of the table's convention
    for face in &mut faces {
        let [a, b, c] = (*face).map(|i| vertices[i as usize]);
        if (b - a).cross(c - a).dot(a + b + c) < 0.0 {
            face.swap(1, 2);
        }
    }

    (vertices, faces)
}

/// Splits every triangle into four, sharing edge midpoints.
fn subdivide(vertices: &mut Vec<DVec3>, faces: &[[u32; 3]]) -> Vec<[u32; 3]> {
    let mut midpoints: HashMap<(u32, u32), u32> = HashMap::with_capacity(faces.len() * 3 / 2);
    let mut next = Vec::with_capacity(faces.len() * 4);

    let mut midpoint = |a: u32, b: u32, vertices: &mut Vec<DVec3>| -> u32 {
        let key = if a < b { (a, b) } else { (b, a) };
        *midpoints.entry(key).or_insert_with(|| {
            let p = (vertices[a as usize] + vertices[b as usize]).normalize();
            vertices.push(p);
            (vertices.len() - 1) as u32
        })
    };

    for &[a, b, c] in faces {
        let ab = midpoint(a, b, vertices);
        let bc = midpoint(b, c, vertices);
        let ca = midpoint(c, a, vertices);

        next.push([a, ab, ca]);
        next.push([b, bc, ab]);
        next.push([c, ca, bc]);
        next.push([ab, bc, ca]);
    }

    next
}
