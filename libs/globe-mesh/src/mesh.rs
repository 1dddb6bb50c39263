//! # Mesh Data Structure
//!
//! Polygon mesh shared by every stage: flat vertex array plus faces that are
//! ordered vertex-index loops (triangles from the icosphere, pentagons and
//! hexagons from the Goldberg dual, quads from walls and ribbons).

use config::constants::DEGENERATE_AREA;
use glam::DVec3;

/// A polygon mesh with vertices and face index loops.
///
/// All geometry calculations use f64 internally. Export to f32 only
/// happens in the flat buffer helpers handed to the export collaborator.
///
/// Faces are wound counter-clockwise when seen from the side their normal
/// points to.
///
/// # Example
///
/// ```rust
/// use globe_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 1.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_face(&[0, 1, 2, 3]);
/// assert_eq!(mesh.triangle_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions (f64 for precision)
    vertices: Vec<DVec3>,
    /// Face loops, at least 3 indices each
    faces: Vec<Vec<u32>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the number of triangles after fan triangulation.
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(|f| f.len().saturating_sub(2)).sum()
    }

    /// Returns true if the mesh has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a face by vertex indices.
    pub fn add_face(&mut self, indices: &[u32]) {
        self.faces.push(indices.to_vec());
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the faces.
    #[inline]
    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the face at the given index.
    #[inline]
    pub fn face(&self, index: usize) -> &[u32] {
        &self.faces[index]
    }

    /// Returns the corner positions of a face.
    pub fn face_positions(&self, index: usize) -> Vec<DVec3> {
        self.faces[index].iter().map(|&v| self.vertex(v)).collect()
    }

    /// Returns the arithmetic mean of a face's corners.
    pub fn face_centroid(&self, index: usize) -> DVec3 {
        let face = &self.faces[index];
        let sum: DVec3 = face.iter().map(|&v| self.vertex(v)).sum();
        sum / face.len() as f64
    }

    /// Returns the area-weighted normal of a face.
    ///
    /// Its length is twice the face area; the direction follows the winding.
    /// Computed as a fan around the first corner so that small faces far from
    /// the origin keep their precision.
    pub fn face_normal(&self, index: usize) -> DVec3 {
        let face = &self.faces[index];
        if face.len() < 3 {
            return DVec3::ZERO;
        }
        let origin = self.vertex(face[0]);
        let mut normal = DVec3::ZERO;
        for i in 1..face.len() - 1 {
            let a = self.vertex(face[i]) - origin;
            let b = self.vertex(face[i + 1]) - origin;
            normal += a.cross(b);
        }
        normal
    }

    /// Returns the area of a face.
    pub fn face_area(&self, index: usize) -> f64 {
        self.face_normal(index).length() * 0.5
    }

    /// Returns true if the face repeats a vertex or has (near) zero area.
    pub fn is_face_degenerate(&self, index: usize) -> bool {
        let face = &self.faces[index];
        if face.len() < 3 {
            return true;
        }
        for (i, a) in face.iter().enumerate() {
            if face[i + 1..].contains(a) {
                return true;
            }
        }
        self.face_area(index) < DEGENERATE_AREA
    }

    /// Moves every vertex onto the sphere of `radius` along its own direction.
    ///
    /// Vertices at the origin have no direction and are left in place.
    pub fn project_to_sphere(&mut self, radius: f64) {
        for v in &mut self.vertices {
            let dir = v.normalize_or_zero();
            if dir != DVec3::ZERO {
                *v = dir * radius;
            }
        }
    }

    /// Reverses the winding of every face.
    pub fn flip_faces(&mut self) {
        for face in &mut self.faces {
            face.reverse();
        }
    }

    /// Fan-triangulates every face.
    ///
    /// Faces produced by the pipeline are convex, so a fan from the first
    /// corner preserves winding and covers the face exactly.
    pub fn triangulate(&self) -> Vec<[u32; 3]> {
        let mut triangles = Vec::with_capacity(self.triangle_count());
        for face in &self.faces {
            for i in 1..face.len().saturating_sub(1) {
                triangles.push([face[0], face[i], face[i + 1]]);
            }
        }
        triangles
    }

    /// Computes smooth per-vertex normals from area-weighted face normals.
    pub fn compute_normals(&self) -> Vec<DVec3> {
        let mut normals = vec![DVec3::ZERO; self.vertices.len()];

        for (fi, face) in self.faces.iter().enumerate() {
            let normal = self.face_normal(fi);
            for &v in face {
                normals[v as usize] += normal;
            }
        }

        for normal in &mut normals {
            *normal = normal.normalize_or_zero();
        }

        normals
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Merges another mesh into this one.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&other.vertices);

        for face in &other.faces {
            self.faces.push(face.iter().map(|&v| v + offset).collect());
        }
    }

    /// Drops vertices no face references and renumbers the faces.
    ///
    /// Surviving vertices keep their relative order.
    pub fn compact(&mut self) {
        let mut remap = vec![u32::MAX; self.vertices.len()];
        for face in &self.faces {
            for &v in face {
                remap[v as usize] = 0;
            }
        }

        let mut vertices = Vec::with_capacity(self.vertices.len());
        for (old, slot) in remap.iter_mut().enumerate() {
            if *slot == 0 {
                *slot = vertices.len() as u32;
                vertices.push(self.vertices[old]);
            }
        }

        for face in &mut self.faces {
            for v in face.iter_mut() {
                *v = remap[*v as usize];
            }
        }
        self.vertices = vertices;
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All face indices are valid
    /// - Every face has at least 3 corners
    /// - No degenerate faces (repeated corner, zero area)
    ///
    /// Returns true if valid.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        for (fi, face) in self.faces.iter().enumerate() {
            if face.iter().any(|&v| v >= vertex_count) {
                return false;
            }
            if self.is_face_degenerate(fi) {
                return false;
            }
        }

        true
    }

    /// Exports vertices as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.vertices.len() * 3);
        for v in &self.vertices {
            result.push(v.x as f32);
            result.push(v.y as f32);
            result.push(v.z as f32);
        }
        result
    }

    /// Exports fan-triangulated indices as u32 array for GPU.
    ///
    /// Returns flattened [i0, i1, i2, i0, i1, i2, ...] array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangulate().into_iter().flatten().collect()
    }

    /// Exports smooth vertex normals as f32 array for GPU.
    pub fn normals_f32(&self) -> Vec<f32> {
        let normals = self.compute_normals();
        let mut result = Vec::with_capacity(normals.len() * 3);
        for n in normals {
            result.push(n.x as f32);
            result.push(n.y as f32);
            result.push(n.z as f32);
        }
        result
    }
}
