//! # Globe Pipeline
//!
//! Runs every stage in order and assembles the scene:
//!
//! ```text
//! params ─ validate ─┐
//!                    ▼
//! Tessellation → Assignment → patches ─┬─ extrude → shells
//!                    │                 └─ ribbon  → borders
//!                    └──────── markers (places)
//!                                   ▼
//!                          Scene + GlobeSummary
//! ```
//!
//! Configuration errors abort before any geometry is generated. Everything
//! after that only skips and counts.

use crate::assign::Assignment;
use crate::error::GlobeResult;
use crate::geo::{lat_lon_of, select_places, InputReport, Place, Region};
use crate::mesh::Mesh;
use crate::ops::{
    build_patch, build_ribbon, closing_ribbon, extrude_radial, place_marker, ExtrusionReport,
    MarkerAnchor, RibbonReport,
};
use crate::params::{GlobeParams, SceneLayout};
use crate::scene::{NodeKind, Scene};
use crate::summary::{round4, CellMapping, GlobeSummary, SkippedCounts, StageFlags};
use crate::tessellation::{Tessellation, TessellationKind};
use config::constants::{ToleranceConfig, PROGRESS_INTERVAL};
use rayon::prelude::*;
use tracing::{debug, info, info_span};

/// Everything a build produces.
#[derive(Debug, Clone)]
pub struct GlobeOutput {
    /// Named meshes under one root
    pub scene: Scene,
    /// Counts and settings of the run
    pub summary: GlobeSummary,
    /// Tessellation the scene was cut from
    pub tessellation: Tessellation,
    /// Primitive → region map
    pub assignment: Assignment,
}

/// Per-region geometry built in parallel.
struct RegionGeometry {
    region: usize,
    shell: Mesh,
    border: Option<Mesh>,
    cells: Vec<Mesh>,
    extrusion: ExtrusionReport,
    ribbon: RibbonReport,
}

/// One placed marker with its optional closing ribbon.
struct PlacedMarker {
    name: String,
    index: usize,
    mesh: Mesh,
    closing: Option<Mesh>,
    anchored: bool,
    ribbon: RibbonReport,
}

/// Builds a globe from regions and places.
///
/// `input` carries the defects absorbed while the regions were decoded,
/// so the summary accounts for them. Places without finite coordinates
/// are added to it as they are dropped.
///
/// # Errors
///
/// [`crate::GlobeError::InvalidConfig`] if `params` fails validation.
///
/// # Example
///
/// ```rust
/// use globe_mesh::{build_globe, geo::InputReport, GlobeParams};
///
/// let params = GlobeParams { subdivision: 2, ..Default::default() };
/// let output = build_globe(&params, &[], &[], InputReport::default()).unwrap();
/// assert_eq!(output.summary.total_primitives, 42);
/// assert_eq!(output.summary.unassigned, 42);
/// assert_eq!(output.scene.root().name, "Atlas");
/// ```
pub fn build_globe(
    params: &GlobeParams,
    regions: &[Region],
    places: &[Place],
    mut input: InputReport,
) -> GlobeResult<GlobeOutput> {
    params.validate()?;
    let tolerance = params.tolerance()?;

    let span = info_span!("build_globe", kind = ?params.kind, level = params.subdivision);
    let _guard = span.enter();
    info!(regions = regions.len(), places = places.len(), "building globe");

    let tessellation = Tessellation::generate(
        params.kind,
        params.subdivision,
        params.radius,
        params.dual_walk_limit,
    );
    let assignment = Assignment::classify(&tessellation, regions);
    let groups = assignment.primitives_by_region();

    let (root, fill) = match params.layout {
        SceneLayout::Atlas => ("Atlas", "GlobeFill"),
        SceneLayout::Cells => ("WeatherGlobe", "WeatherGlobeFill"),
    };
    let mut scene = Scene::new(root);
    let ocean = build_patch(fill, &assignment.unassigned(), &tessellation, Some(&tolerance));
    scene.add(ocean.name, NodeKind::Fill, ocean.mesh);

    let geometry = build_regions(params, regions, &groups, &tessellation, &tolerance);
    let mut extrusion = ExtrusionReport::default();
    let mut ribbons = RibbonReport::default();
    let total = geometry.len();
    let mut region_names = Vec::with_capacity(total);

    for (done, built) in geometry.into_iter().enumerate() {
        let name = &regions[built.region].name;
        match params.layout {
            SceneLayout::Atlas => {
                scene.add(format!("country_{name}"), NodeKind::Shell, built.shell);
            }
            SceneLayout::Cells => {
                for (k, cell) in built.cells.into_iter().enumerate() {
                    scene.add(format!("cell_{name}_{k}"), NodeKind::Cell, cell);
                }
            }
        }
        if let Some(border) = built.border {
            scene.add(format!("border_{name}"), NodeKind::Border, border);
        }
        extrusion.absorb(built.extrusion);
        ribbons.absorb(built.ribbon);
        region_names.push(name.clone());

        if (done + 1) % PROGRESS_INTERVAL == 0 {
            debug!(done = done + 1, total, "regions assembled");
        }
    }
    info!(
        regions = region_names.len(),
        walls = extrusion.walls,
        border_segments = ribbons.segments,
        "regions built"
    );

    let mut marker_names = Vec::new();
    let mut unanchored = 0;
    if params.enable_markers {
        let selected = select_places(places, params.markers.max_count, &mut input);
        let markers = build_markers(
            params,
            &selected,
            regions,
            &tessellation,
            &assignment,
            &tolerance,
        );
        for marker in markers {
            scene.add(
                format!("city_{}_{}", marker.name, marker.index),
                NodeKind::Marker,
                marker.mesh,
            );
            if let Some(closing) = marker.closing {
                scene.add(
                    format!("closing_{}_{}", marker.name, marker.index),
                    NodeKind::Closing,
                    closing,
                );
            }
            if !marker.anchored {
                unanchored += 1;
            }
            ribbons.absorb(marker.ribbon);
            marker_names.push(marker.name);
        }
        info!(markers = marker_names.len(), unanchored, "markers placed");
    }

    region_names.sort();
    let cells = (params.layout == SceneLayout::Cells)
        .then(|| cell_mapping(&tessellation, &assignment, regions));
    let goldberg = tessellation.kind == TessellationKind::Goldberg;

    let summary = GlobeSummary {
        kind: params.kind,
        layout: params.layout,
        subdivision: params.subdivision,
        radius: params.radius,
        total_primitives: tessellation.primitive_count(),
        pentagons: goldberg.then(|| tessellation.pentagon_count()),
        hexagons: goldberg.then(|| tessellation.hexagon_count()),
        assigned: assignment.assigned_count(),
        unassigned: assignment.unassigned_count(),
        region_count: region_names.len(),
        regions: region_names,
        markers: marker_names,
        extrusion: params.extrusion,
        border: params.border,
        marker_params: params.markers,
        stages: StageFlags {
            border: params.enable_border,
            extrusion: params.enable_extrusion && params.layout == SceneLayout::Atlas,
            markers: params.enable_markers,
            closing: params.enable_markers && params.markers.closing,
        },
        skipped: SkippedCounts {
            rings: input.skipped_rings,
            features: input.skipped_features,
            places: input.skipped_places,
            open_cells: tessellation.defects.len(),
            degenerate_faces: extrusion.degenerate_faces,
            degenerate_edges: extrusion.degenerate_edges + ribbons.degenerate_edges,
            unanchored_markers: unanchored,
        },
        cells,
    };

    info!(
        nodes = scene.len(),
        triangles = scene.triangle_count(),
        skipped = ?summary.skipped,
        "globe built"
    );

    Ok(GlobeOutput {
        scene,
        summary,
        tessellation,
        assignment,
    })
}

/// Builds shells, cells and borders for every non-empty region.
fn build_regions(
    params: &GlobeParams,
    regions: &[Region],
    groups: &[Vec<u32>],
    tess: &Tessellation,
    tolerance: &ToleranceConfig,
) -> Vec<RegionGeometry> {
    groups
        .par_iter()
        .enumerate()
        .filter(|(_, ids)| !ids.is_empty())
        .map(|(region, ids)| {
            let name = &regions[region].name;
            let patch = build_patch(name.as_str(), ids, tess, Some(tolerance));

            let mut built = RegionGeometry {
                region,
                shell: Mesh::new(),
                border: None,
                cells: Vec::new(),
                extrusion: ExtrusionReport::default(),
                ribbon: RibbonReport::default(),
            };

            // Ribbons sit on the shell top; cells stay flat on the sphere
            let elevation = match params.layout {
                SceneLayout::Atlas if params.enable_extrusion => params.extrusion.above,
                _ => 0.0,
            };
            if params.enable_border {
                let (border, report) =
                    build_ribbon(&patch.mesh, params.radius, elevation, &params.border, tolerance);
                built.border = Some(border);
                built.ribbon = report;
            }

            match params.layout {
                SceneLayout::Atlas if params.enable_extrusion => {
                    let (shell, report) = extrude_radial(
                        &patch.mesh,
                        params.radius,
                        params.extrusion.above,
                        params.extrusion.below,
                        tolerance,
                    );
                    built.shell = shell;
                    built.extrusion = report;
                }
                SceneLayout::Atlas => built.shell = patch.mesh,
                SceneLayout::Cells => {
                    built.cells = ids
                        .iter()
                        .map(|&id| build_patch(name.as_str(), &[id], tess, None).mesh)
                        .collect();
                }
            }
            built
        })
        .collect()
}

fn build_markers(
    params: &GlobeParams,
    places: &[Place],
    regions: &[Region],
    tess: &Tessellation,
    assignment: &Assignment,
    tolerance: &ToleranceConfig,
) -> Vec<PlacedMarker> {
    places
        .par_iter()
        .enumerate()
        .map(|(index, place)| {
            let marker = place_marker(
                place.lat,
                place.lon,
                tess,
                regions,
                assignment,
                params.radius,
                &params.markers,
                params.border.embed_epsilon,
            );
            let (closing, ribbon) = if params.markers.closing {
                let (mesh, report) = closing_ribbon(
                    &marker.top,
                    &params.border,
                    params.markers.closing_gap,
                    tolerance,
                );
                (Some(mesh), report)
            } else {
                (None, RibbonReport::default())
            };
            PlacedMarker {
                name: place.name.clone(),
                index,
                mesh: marker.mesh,
                closing,
                anchored: marker.anchor != MarkerAnchor::Direct,
                ribbon,
            }
        })
        .collect()
}

fn cell_mapping(
    tess: &Tessellation,
    assignment: &Assignment,
    regions: &[Region],
) -> Vec<CellMapping> {
    tess.primitives
        .iter()
        .enumerate()
        .map(|(idx, primitive)| {
            let (lat, lon) = lat_lon_of(primitive.anchor);
            CellMapping {
                idx,
                lat: round4(lat),
                lon: round4(lon),
                admin: assignment
                    .region_of(idx)
                    .and_then(|r| regions.get(r as usize))
                    .map(|r| r.admin.clone()),
                sides: primitive.sides(),
            }
        })
        .collect()
}
