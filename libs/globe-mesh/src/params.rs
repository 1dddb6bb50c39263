//! # Globe Parameters
//!
//! Numeric configuration for one pipeline run. Every field has a default
//! from [`config::constants`], so a JSON document only needs the values it
//! changes:
//!
//! ```rust
//! use globe_mesh::{GlobeParams, SceneLayout};
//!
//! let params = GlobeParams::from_json(r#"{ "subdivision": 3, "layout": "cells" }"#).unwrap();
//! assert_eq!(params.subdivision, 3);
//! assert_eq!(params.layout, SceneLayout::Cells);
//! assert!(params.validate().is_ok());
//! ```
//!
//! [`GlobeParams::validate`] runs before any geometry is generated; a bad
//! value fails the whole run.

use crate::error::{GlobeError, GlobeResult};
use crate::tessellation::TessellationKind;
use config::constants::{
    ConfigError, ToleranceConfig, DEFAULT_BORDER_HEIGHT, DEFAULT_BORDER_WIDTH,
    DEFAULT_CLOSING_GAP, DEFAULT_EXTRUDE_ABOVE, DEFAULT_EXTRUDE_BELOW, DEFAULT_MARKER_RADIUS,
    DEFAULT_MARKER_SHRINK, DEFAULT_MARKER_SIDES, DEFAULT_RADIUS, DEFAULT_SUBDIVISION,
    DEGENERATE_LENGTH, DUAL_WALK_LIMIT, EMBED_EPSILON, MAX_MARKERS, MAX_SUBDIVISION,
    WELD_DECIMALS,
};
use serde::{Deserialize, Serialize};

/// How the scene groups its meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneLayout {
    /// One welded, extruded shell per region.
    #[default]
    Atlas,
    /// One unwelded node per assigned primitive, plus a cell mapping.
    Cells,
}

/// Radial offsets of a region shell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrusionParams {
    /// Outward offset of the top surface
    pub above: f64,
    /// Inward offset of the bottom surface
    pub below: f64,
}

impl Default for ExtrusionParams {
    fn default() -> Self {
        Self {
            above: DEFAULT_EXTRUDE_ABOVE,
            below: DEFAULT_EXTRUDE_BELOW,
        }
    }
}

/// Cross-section of boundary ribbons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderParams {
    /// Tangential width
    pub width: f64,
    /// Radial height above the base
    pub height: f64,
    /// How far the base sinks below the surface it sits on
    pub embed_epsilon: f64,
}

impl Default for BorderParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_BORDER_WIDTH,
            height: DEFAULT_BORDER_HEIGHT,
            embed_epsilon: EMBED_EPSILON,
        }
    }
}

/// Point marker prisms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerParams {
    /// Radial offset of the base, also the prism height
    pub above: f64,
    /// Depth of the prism below its base
    pub below: f64,
    /// Footprint radius of markers placed without an anchor primitive
    pub radius: f64,
    /// Side count of markers placed without an anchor primitive
    pub sides: usize,
    /// Footprint shrink towards the anchor direction, in `[0, 1)`
    pub shrink: f64,
    /// Places kept after sorting by weight
    pub max_count: usize,
    /// Trace a ribbon around each marker's top face
    pub closing: bool,
    /// Lift of the closing ribbon above the top face
    pub closing_gap: f64,
}

impl Default for MarkerParams {
    fn default() -> Self {
        Self {
            above: DEFAULT_EXTRUDE_ABOVE,
            below: DEFAULT_EXTRUDE_BELOW,
            radius: DEFAULT_MARKER_RADIUS,
            sides: DEFAULT_MARKER_SIDES,
            shrink: DEFAULT_MARKER_SHRINK,
            max_count: MAX_MARKERS,
            closing: false,
            closing_gap: DEFAULT_CLOSING_GAP,
        }
    }
}

/// Configuration of one globe build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeParams {
    /// Subdivision level; 1 is the bare icosahedron
    pub subdivision: u32,
    /// Sphere radius
    pub radius: f64,
    /// Primitive shape
    pub kind: TessellationKind,
    /// Scene grouping
    pub layout: SceneLayout,
    /// Region shell offsets
    pub extrusion: ExtrusionParams,
    /// Boundary ribbon shape
    pub border: BorderParams,
    /// Point marker shape
    pub markers: MarkerParams,
    /// Build boundary ribbons
    pub enable_border: bool,
    /// Extrude region patches into shells
    pub enable_extrusion: bool,
    /// Place point markers
    pub enable_markers: bool,
    /// Decimal places of the vertex weld key
    pub weld_decimals: u32,
    /// Maximum faces visited around a vertex when building dual cells
    pub dual_walk_limit: usize,
}

impl Default for GlobeParams {
    fn default() -> Self {
        Self {
            subdivision: DEFAULT_SUBDIVISION,
            radius: DEFAULT_RADIUS,
            kind: TessellationKind::default(),
            layout: SceneLayout::default(),
            extrusion: ExtrusionParams::default(),
            border: BorderParams::default(),
            markers: MarkerParams::default(),
            enable_border: true,
            enable_extrusion: true,
            enable_markers: true,
            weld_decimals: WELD_DECIMALS,
            dual_walk_limit: DUAL_WALK_LIMIT,
        }
    }
}

impl GlobeParams {
    /// Parses parameters from JSON; missing fields take their defaults.
    ///
    /// The result is not validated.
    pub fn from_json(json: &str) -> GlobeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Renders the parameters as pretty JSON.
    pub fn to_json(&self) -> GlobeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every numeric range.
    ///
    /// # Errors
    ///
    /// [`GlobeError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> GlobeResult<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(GlobeError::invalid_config(
                "radius",
                format!("must be positive and finite, got {}", self.radius),
            ));
        }
        if self.subdivision > MAX_SUBDIVISION {
            return Err(GlobeError::invalid_config(
                "subdivision",
                format!("must be at most {MAX_SUBDIVISION}, got {}", self.subdivision),
            ));
        }

        non_negative("extrusion.above", self.extrusion.above)?;
        non_negative("extrusion.below", self.extrusion.below)?;
        non_negative("border.embed_epsilon", self.border.embed_epsilon)?;
        non_negative("markers.above", self.markers.above)?;
        non_negative("markers.below", self.markers.below)?;
        non_negative("markers.closing_gap", self.markers.closing_gap)?;
        below_radius("extrusion.below", self.extrusion.below, self.radius)?;
        below_radius("markers.below", self.markers.below, self.radius)?;

        if self.enable_border || self.markers.closing {
            positive("border.width", self.border.width)?;
            positive("border.height", self.border.height)?;
        }
        if self.enable_markers {
            positive("markers.radius", self.markers.radius)?;
        }

        if self.markers.sides < 3 {
            return Err(GlobeError::invalid_config(
                "markers.sides",
                format!("must be at least 3, got {}", self.markers.sides),
            ));
        }
        if !(0.0..1.0).contains(&self.markers.shrink) {
            return Err(GlobeError::invalid_config(
                "markers.shrink",
                format!("must be in [0, 1), got {}", self.markers.shrink),
            ));
        }
        if self.dual_walk_limit < 3 {
            return Err(GlobeError::invalid_config(
                "dual_walk_limit",
                format!("must be at least 3, got {}", self.dual_walk_limit),
            ));
        }
        self.tolerance()?;

        Ok(())
    }

    /// Weld tolerance derived from `weld_decimals`.
    pub fn tolerance(&self) -> GlobeResult<ToleranceConfig> {
        ToleranceConfig::new(self.weld_decimals, DEGENERATE_LENGTH).map_err(|e| match e {
            ConfigError::InvalidWeldDecimals(_) => {
                GlobeError::invalid_config("weld_decimals", e.to_string())
            }
            ConfigError::InvalidTolerance(_) => {
                GlobeError::invalid_config("degenerate_length", e.to_string())
            }
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> GlobeResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GlobeError::invalid_config(
            field,
            format!("must be non-negative and finite, got {value}"),
        ))
    }
}

fn positive(field: &'static str, value: f64) -> GlobeResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GlobeError::invalid_config(
            field,
            format!("must be positive and finite, got {value}"),
        ))
    }
}

fn below_radius(field: &'static str, value: f64, radius: f64) -> GlobeResult<()> {
    if value < radius {
        Ok(())
    } else {
        Err(GlobeError::invalid_config(
            field,
            format!("must be smaller than the radius {radius}, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(result: GlobeResult<()>) -> &'static str {
        match result {
            Err(GlobeError::InvalidConfig { field, .. }) => field,
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let params = GlobeParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.kind, TessellationKind::Goldberg);
        assert_eq!(params.layout, SceneLayout::Atlas);
        assert_eq!(params.weld_decimals, 6);
        assert_eq!(params.dual_walk_limit, 8);
    }

    #[test]
    fn test_rejects_bad_radius() {
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let params = GlobeParams {
                radius,
                ..Default::default()
            };
            assert_eq!(field_of(params.validate()), "radius");
        }
    }

    #[test]
    fn test_rejects_negative_offsets() {
        let mut params = GlobeParams::default();
        params.extrusion.above = -0.1;
        assert_eq!(field_of(params.validate()), "extrusion.above");

        let mut params = GlobeParams::default();
        params.markers.below = f64::NAN;
        assert_eq!(field_of(params.validate()), "markers.below");
    }

    #[test]
    fn test_rejects_below_past_center() {
        let mut params = GlobeParams::default();
        params.extrusion.below = 1.0;
        assert_eq!(field_of(params.validate()), "extrusion.below");

        let mut params = GlobeParams::default();
        params.markers.below = 2.0;
        assert_eq!(field_of(params.validate()), "markers.below");
    }

    #[test]
    fn test_border_shape_checked_only_when_used() {
        let mut params = GlobeParams::default();
        params.border.width = 0.0;
        assert_eq!(field_of(params.validate()), "border.width");

        params.enable_border = false;
        assert!(params.validate().is_ok());

        params.markers.closing = true;
        assert_eq!(field_of(params.validate()), "border.width");
    }

    #[test]
    fn test_rejects_marker_shape() {
        let mut params = GlobeParams::default();
        params.markers.sides = 2;
        assert_eq!(field_of(params.validate()), "markers.sides");

        let mut params = GlobeParams::default();
        params.markers.shrink = 1.0;
        assert_eq!(field_of(params.validate()), "markers.shrink");
    }

    #[test]
    fn test_rejects_weld_and_walk_limits() {
        let params = GlobeParams {
            weld_decimals: 0,
            ..Default::default()
        };
        assert_eq!(field_of(params.validate()), "weld_decimals");

        let params = GlobeParams {
            weld_decimals: 13,
            ..Default::default()
        };
        assert_eq!(field_of(params.validate()), "weld_decimals");

        let params = GlobeParams {
            dual_walk_limit: 2,
            ..Default::default()
        };
        assert_eq!(field_of(params.validate()), "dual_walk_limit");
    }

    #[test]
    fn test_from_json_partial() {
        let params = GlobeParams::from_json(
            r#"{ "radius": 2.5, "kind": "icosphere", "extrusion": { "below": 0.1 } }"#,
        )
        .unwrap();
        assert_eq!(params.radius, 2.5);
        assert_eq!(params.kind, TessellationKind::Icosphere);
        assert_eq!(params.extrusion.below, 0.1);
        assert_eq!(params.extrusion.above, DEFAULT_EXTRUDE_ABOVE);
        assert_eq!(params.subdivision, DEFAULT_SUBDIVISION);
    }

    #[test]
    fn test_from_json_malformed() {
        let err = GlobeParams::from_json("{ radius: }").unwrap_err();
        assert!(matches!(err, GlobeError::Json(_)));
    }

    #[test]
    fn test_json_round_trip_keeps_values() {
        let mut params = GlobeParams::default();
        params.markers.closing = true;
        params.layout = SceneLayout::Cells;
        let back = GlobeParams::from_json(&params.to_json().unwrap()).unwrap();
        assert_eq!(back, params);
    }
}
