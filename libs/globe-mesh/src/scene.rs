//! # Scene
//!
//! Flat list of named meshes handed to the export collaborator. Node 0 is
//! the root; every other node records its parent id, so no tree walk is
//! needed to collect the hierarchy.

use crate::mesh::Mesh;
use serde::{Deserialize, Serialize};

/// What a scene node holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Grouping node without geometry.
    Root,
    /// Unassigned primitives (ocean).
    Fill,
    /// Extruded region patch.
    Shell,
    /// Region boundary ribbon.
    Border,
    /// Single primitive of the per-cell layout.
    Cell,
    /// Point marker prism.
    Marker,
    /// Ribbon around a marker's top face.
    Closing,
}

/// One named object of the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Position in the node list
    pub id: usize,
    /// Unique object name
    pub name: String,
    /// Node role
    pub kind: NodeKind,
    /// Parent node id; `None` only for the root
    pub parent: Option<usize>,
    /// Geometry; `None` for the root
    pub mesh: Option<Mesh>,
}

/// Flat scene graph.
///
/// # Example
///
/// ```rust
/// use globe_mesh::scene::{NodeKind, Scene};
/// use globe_mesh::Mesh;
///
/// let mut scene = Scene::new("Atlas");
/// let id = scene.add("GlobeFill", NodeKind::Fill, Mesh::new());
/// assert_eq!(scene.node(id).unwrap().parent, Some(0));
/// assert_eq!(scene.root().name, "Atlas");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

impl Scene {
    /// Creates a scene holding only its root.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            nodes: vec![SceneNode {
                id: 0,
                name: root.into(),
                kind: NodeKind::Root,
                parent: None,
                mesh: None,
            }],
        }
    }

    /// Adds a mesh node under the root and returns its id.
    pub fn add(&mut self, name: impl Into<String>, kind: NodeKind, mesh: Mesh) -> usize {
        let id = self.nodes.len();
        self.nodes.push(SceneNode {
            id,
            name: name.into(),
            kind,
            parent: Some(0),
            mesh: Some(mesh),
        });
        id
    }

    /// The root node.
    pub fn root(&self) -> &SceneNode {
        &self.nodes[0]
    }

    /// All nodes, root first.
    #[inline]
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Node by id.
    #[inline]
    pub fn node(&self, id: usize) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// First node with the given name.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Nodes of one kind, in insertion order.
    pub fn of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// Number of nodes including the root.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a scene has at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Triangle count over all meshes after fan triangulation.
    pub fn triangle_count(&self) -> usize {
        self.nodes
            .iter()
            .filter_map(|n| n.mesh.as_ref())
            .map(Mesh::triangle_count)
            .sum()
    }

    /// Consumes the scene and returns its nodes.
    pub fn into_nodes(self) -> Vec<SceneNode> {
        self.nodes
    }
}
