//! # Config Crate
//!
//! Centralized configuration constants for the globe mesh pipeline.
//! Every tolerance, default offset and safety bound used by the synthesis
//! core is defined here so that tessellation, welding, extrusion and ribbon
//! code agree on the same numbers.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_RADIUS, WELD_DECIMALS, weld_scale};
//!
//! assert!(DEFAULT_RADIUS > 0.0);
//! assert_eq!(weld_scale(WELD_DECIMALS), 1e6);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Unit Sphere Defaults**: Offsets are expressed relative to radius 1.0
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
