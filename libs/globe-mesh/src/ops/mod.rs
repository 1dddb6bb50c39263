//! # Mesh Operations
//!
//! Geometry stages applied after classification:
//!
//! - [`build_patch`]: merge a region's primitives, welding shared corners
//! - [`boundary_edges`]: find a patch's open outline
//! - [`extrude_radial`]: thicken a patch into a shell
//! - [`build_ribbon`]: raise a strip along a patch outline
//! - [`place_marker`]: stand a prism on a point feature
//!
//! Every stage takes its input mesh by reference and returns a new mesh;
//! skipped elements are counted in the returned report.

pub mod boundary;
pub mod extrude;
pub mod marker;
pub mod ribbon;
pub mod weld;


pub use boundary::{boundary_edges, is_closed};
pub use extrude::{extrude_radial, ExtrusionReport};
pub use marker::{anchored_marker, direct_marker, locate_anchor, place_marker, Marker, MarkerAnchor};
pub use ribbon::{build_ribbon, closing_ribbon, RibbonReport};
pub use weld::{build_patch, weld_key, weld_mesh, RegionPatch, WeldKey, Welder};
