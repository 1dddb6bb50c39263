//! # Build Summary
//!
//! Machine-readable record of one globe build for downstream cataloguing.
//! Skip counters always reflect what was actually dropped, so a partial
//! result is never reported as complete.

use crate::error::GlobeResult;
use crate::params::{BorderParams, ExtrusionParams, MarkerParams, SceneLayout};
use crate::tessellation::TessellationKind;
use serde::{Deserialize, Serialize};

/// Elements skipped during the build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCounts {
    /// Input rings with fewer than 3 usable points
    pub rings: usize,
    /// Input polygons with no usable ring
    pub features: usize,
    /// Places without finite coordinates
    pub places: usize,
    /// Base vertices whose dual cell did not close
    pub open_cells: usize,
    /// Zero-area faces dropped during extrusion
    pub degenerate_faces: usize,
    /// Zero-length edges dropped from walls and ribbons
    pub degenerate_edges: usize,
    /// Markers placed on their own direction without a primitive
    pub unanchored_markers: usize,
}

/// Where one primitive sits and which region owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellMapping {
    /// Primitive id
    pub idx: usize,
    /// Latitude of the anchor, 4 decimals
    pub lat: f64,
    /// Longitude of the anchor, 4 decimals
    pub lon: f64,
    /// Owning region's display name, `None` for ocean
    pub admin: Option<String>,
    /// Corner count
    pub sides: usize,
}

/// Stage switches as they were applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageFlags {
    /// Borders built
    pub border: bool,
    /// Shells extruded
    pub extrusion: bool,
    /// Markers placed
    pub markers: bool,
    /// Closing ribbons traced around markers
    pub closing: bool,
}

/// Summary of one globe build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobeSummary {
    /// Primitive shape
    pub kind: TessellationKind,
    /// Scene grouping
    pub layout: SceneLayout,
    /// Subdivision level
    pub subdivision: u32,
    /// Sphere radius
    pub radius: f64,
    /// Primitives generated
    pub total_primitives: usize,
    /// Pentagonal cells (Goldberg only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pentagons: Option<usize>,
    /// Hexagonal cells (Goldberg only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hexagons: Option<usize>,
    /// Primitives owned by a region
    pub assigned: usize,
    /// Ocean primitives
    pub unassigned: usize,
    /// Regions that received at least one primitive
    pub region_count: usize,
    /// Their names, sorted
    pub regions: Vec<String>,
    /// Names of the places that received a marker, in placement order
    pub markers: Vec<String>,
    /// Region shell offsets
    pub extrusion: ExtrusionParams,
    /// Ribbon cross-section
    pub border: BorderParams,
    /// Marker shape
    pub marker_params: MarkerParams,
    /// Stage switches
    pub stages: StageFlags,
    /// Skipped elements
    pub skipped: SkippedCounts,
    /// Per-primitive mapping (cells layout only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells: Option<Vec<CellMapping>>,
}

impl GlobeSummary {
    /// Renders the summary as pretty JSON.
    pub fn to_json(&self) -> GlobeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a summary back from JSON.
    pub fn from_json(json: &str) -> GlobeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Rounds to 4 decimal places.
pub(crate) fn round4(value: f64) -> f64 {
    (value * 1e4).round() / 1e4
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GlobeSummary {
        GlobeSummary {
            kind: TessellationKind::Goldberg,
            layout: SceneLayout::Cells,
            subdivision: 2,
            radius: 1.0,
            total_primitives: 42,
            pentagons: Some(12),
            hexagons: Some(30),
            assigned: 3,
            unassigned: 39,
            region_count: 1,
            regions: vec!["Square_0".into()],
            markers: Vec::new(),
            extrusion: ExtrusionParams::default(),
            border: BorderParams::default(),
            marker_params: MarkerParams::default(),
            stages: StageFlags {
                border: true,
                extrusion: true,
                markers: false,
                closing: false,
            },
            skipped: SkippedCounts::default(),
            cells: Some(vec![CellMapping {
                idx: 0,
                lat: 52.6226,
                lon: -31.7175,
                admin: None,
                sides: 5,
            }]),
        }
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(12.345_678), 12.3457);
        assert_eq!(round4(-0.000_04), -0.0);
    }

    #[test]
    fn test_json_layout() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "goldberg");
        assert_eq!(value["layout"], "cells");
        assert_eq!(value["pentagons"], 12);
        assert_eq!(value["skipped"]["open_cells"], 0);
        assert!(value["cells"][0]["admin"].is_null());
    }

    #[test]
    fn test_icosphere_summary_omits_cell_counts() {
        let mut summary = sample();
        summary.kind = TessellationKind::Icosphere;
        summary.pentagons = None;
        summary.hexagons = None;
        summary.cells = None;
        let json = summary.to_json().unwrap();
        assert!(!json.contains("\"pentagons\""));
        assert!(!json.contains("\"cells\""));
        assert_eq!(GlobeSummary::from_json(&json).unwrap(), summary);
    }
}
