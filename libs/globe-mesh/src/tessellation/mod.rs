//! # Tessellation Generator
//!
//! Spherical tessellations the rest of the pipeline classifies and merges:
//!
//! - **Icosphere**: subdivided icosahedron, one triangle per primitive
//! - **Goldberg**: its dual, one pentagon or hexagon cell per icosphere vertex
//!
//! Both are exposed through the same arena: a flat vertex array and a list
//! of [`Primitive`]s whose corners index into it. Primitives are immutable
//! once generated.

mod adjacency;
mod dual;
mod icosphere;


pub use adjacency::{FaceAdjacency, WalkFailure};
pub use dual::{DualDefect, DualMesh};
pub use icosphere::{icosphere_face_count, icosphere_vertex_count, splits_for_level, Icosphere};

use config::constants::{HEXAGON_SIDES, PENTAGON_SIDES};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Which tessellation the globe is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TessellationKind {
    /// Triangles of a subdivided icosahedron.
    Icosphere,
    /// Pentagon/hexagon cells of the icosphere's dual.
    #[default]
    Goldberg,
}

/// One tessellation primitive: a triangle or a dual cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    /// Corner vertex ids, counter-clockwise seen from outside
    pub corners: Vec<u32>,
    /// Unit direction of the representative point
    ///
    /// For a triangle this is its normalized centroid; for a dual cell the
    /// normalized position of the originating icosphere vertex.
    pub anchor: DVec3,
}

impl Primitive {
    /// Creates a primitive from its corner loop and anchor direction.
    pub fn new(corners: Vec<u32>, anchor: DVec3) -> Self {
        Self { corners, anchor }
    }

    /// Number of corners (3 for triangles, 5 or 6 for dual cells).
    #[inline]
    pub fn sides(&self) -> usize {
        self.corners.len()
    }

    /// Returns true for a pentagonal cell.
    #[inline]
    pub fn is_pentagon(&self) -> bool {
        self.sides() == PENTAGON_SIDES
    }

    /// Returns true for a hexagonal cell.
    #[inline]
    pub fn is_hexagon(&self) -> bool {
        self.sides() == HEXAGON_SIDES
    }
}

/// A generated spherical tessellation.
///
/// # Example
///
/// ```rust
/// use globe_mesh::tessellation::{Tessellation, TessellationKind};
///
/// let tess = Tessellation::generate(TessellationKind::Goldberg, 2, 1.0, 8);
/// assert_eq!(tess.primitive_count(), 42);
/// assert_eq!(tess.pentagon_count(), 12);
/// assert_eq!(tess.hexagon_count(), 30);
/// ```
#[derive(Debug, Clone)]
pub struct Tessellation {
    /// Kind of primitives
    pub kind: TessellationKind,
    /// Subdivision level it was generated at
    pub level: u32,
    /// Sphere radius
    pub radius: f64,
    /// Shared vertex positions
    pub vertices: Vec<DVec3>,
    /// Primitives, addressed by their index
    pub primitives: Vec<Primitive>,
    /// Base vertices whose dual cell could not be built (Goldberg only)
    pub defects: Vec<DualDefect>,
}

impl Tessellation {
    /// Generates a tessellation.
    ///
    /// `walk_limit` bounds the dual-cell walk and is ignored for icosphere
    /// tessellations.
    pub fn generate(kind: TessellationKind, level: u32, radius: f64, walk_limit: usize) -> Self {
        let ico = Icosphere::new(level, radius);
        let tess = match kind {
            TessellationKind::Icosphere => Self::from_icosphere(ico, level),
            TessellationKind::Goldberg => {
                let dual = DualMesh::from_icosphere(&ico, walk_limit);
                Self {
                    kind,
                    level,
                    radius,
                    vertices: dual.vertices,
                    primitives: dual.cells,
                    defects: dual.defects,
                }
            }
        };

        info!(
            kind = ?tess.kind,
            level,
            primitives = tess.primitive_count(),
            vertices = tess.vertices.len(),
            defects = tess.defects.len(),
            "tessellation generated"
        );
        tess
    }

    fn from_icosphere(ico: Icosphere, level: u32) -> Self {
        let primitives = (0..ico.faces.len())
            .map(|f| Primitive::new(ico.faces[f].to_vec(), ico.face_centroid(f).normalize()))
            .collect();

        Self {
            kind: TessellationKind::Icosphere,
            level,
            radius: ico.radius,
            vertices: ico.vertices,
            primitives,
            defects: Vec::new(),
        }
    }

    /// Number of primitives.
    #[inline]
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Returns a primitive by id.
    #[inline]
    pub fn primitive(&self, id: usize) -> &Primitive {
        &self.primitives[id]
    }

    /// Returns the corner positions of a primitive.
    pub fn corner_positions(&self, id: usize) -> Vec<DVec3> {
        self.primitives[id]
            .corners
            .iter()
            .map(|&v| self.vertices[v as usize])
            .collect()
    }

    /// Number of pentagonal primitives.
    pub fn pentagon_count(&self) -> usize {
        self.primitives.iter().filter(|p| p.is_pentagon()).count()
    }

    /// Number of hexagonal primitives.
    pub fn hexagon_count(&self) -> usize {
        self.primitives.iter().filter(|p| p.is_hexagon()).count()
    }
}
