//! # Globe Mesh
//!
//! Synthesizes a discretized 3D globe from 2D geographic polygons.
//!
//! ## Architecture
//!
//! ```text
//! tessellation → assign → ops::weld → ops::extrude / ops::ribbon → scene
//!                   └──────────────→ ops::marker ─────────────────┘
//! ```
//!
//! ## Stages
//!
//! - **Tessellation**: icosphere or its Goldberg dual, in a flat arena of
//!   vertices and index-loop primitives
//! - **Assignment**: one region per primitive by centroid point-in-polygon,
//!   first match wins
//! - **Region patches**: primitives merged per region, welded by quantized
//!   position
//! - **Shells**: patches extruded along each vertex's radial direction
//! - **Ribbons**: raised strips along patch outlines
//! - **Markers**: small prisms at point features, snapped to a primitive
//!
//! All geometry is `f64`. Defects are skipped and counted, never fatal;
//! only invalid [`GlobeParams`] fail a build.
//!
//! ## Usage
//!
//! ```rust
//! use globe_mesh::geo::{regions_from_multipolygon, InputReport, Place};
//! use globe_mesh::{build_globe, GlobeParams};
//!
//! let mut input = InputReport::default();
//! let polygons = vec![vec![vec![[0.0, 0.0], [40.0, 0.0], [40.0, 40.0], [0.0, 40.0]]]];
//! let regions = regions_from_multipolygon("Square", &polygons, &mut input);
//! let places = vec![Place::new("Center", 20.0, 20.0)];
//!
//! let params = GlobeParams { subdivision: 3, ..Default::default() };
//! let output = build_globe(&params, &regions, &places, input).unwrap();
//!
//! assert_eq!(output.summary.regions, vec!["Square_0"]);
//! assert!(output.scene.find("country_Square_0").is_some());
//! assert!(output.scene.find("city_Center_0").is_some());
//! ```

pub mod assign;
pub mod error;
pub mod geo;
pub mod mesh;
pub mod ops;
pub mod params;
pub mod pipeline;
pub mod scene;
pub mod summary;
pub mod tessellation;

pub use error::{GlobeError, GlobeResult};
pub use mesh::Mesh;
pub use params::{BorderParams, ExtrusionParams, GlobeParams, MarkerParams, SceneLayout};
pub use pipeline::{build_globe, GlobeOutput};
pub use scene::{NodeKind, Scene, SceneNode};
pub use summary::GlobeSummary;
pub use tessellation::{Tessellation, TessellationKind};
