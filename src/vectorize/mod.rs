//! Vectorization of the occupancy grid into obstacle polygons.
//!
//! Cells above a value threshold are grouped into 4-connected components,
//! each component's boundary is traced into an exterior ring plus interior
//! hole rings, and every polygon is then simplified and buffered outward
//! to compensate for raster blockiness. Simplification does not preserve
//! topology; a shape that collapses to nothing is dropped, logged, and
//! counted rather than silently lost, since over-aggressive tolerances can
//! erase small but safety-critical obstacles.

mod components;
mod trace;

use geo::{Area, LineString, MultiPolygon, Polygon, Simplify};
use geo_buffer::buffer_polygon;

use crate::grid::Grid2d;
use crate::types::{GridError, MapInfo};
use components::label_components;
use trace::{RegionRings, trace_regions};

/// One obstacle region in world coordinates. Holes in the source region
/// are preserved as interior rings. `value` is the raw grid value of the
/// region that produced the geometry.
#[derive(Debug, Clone)]
pub struct ObstaclePolygon {
    pub geometry: MultiPolygon<f64>,
    pub value: u8,
}

/// Result of [`extract_polygons`]: surviving polygons in component scan
/// order, plus the number of shapes lost to simplification or buffering.
#[derive(Debug, Clone, Default)]
pub struct PolygonExtraction {
    pub polygons: Vec<ObstaclePolygon>,
    pub dropped: usize,
}

/// Trace cells with value `> threshold` into simplified, buffered obstacle
/// polygons.
///
/// `simplify_tolerance` and `buffer_margin` are in the raster's native
/// linear units (world units of the grid's [`MapInfo`]). A tolerance or
/// margin of zero skips the respective step exactly.
pub fn extract_polygons(
    grid: &Grid2d<u8>,
    threshold: u8,
    simplify_tolerance: f64,
    buffer_margin: f64,
) -> Result<PolygonExtraction, GridError> {
    if grid.info().is_empty() {
        return Err(GridError::InvalidMetadata(
            "vectorize: grid has no rows or columns".to_string(),
        ));
    }
    if !simplify_tolerance.is_finite() || simplify_tolerance < 0.0 {
        return Err(GridError::InvalidParameter(format!(
            "vectorize: simplify tolerance {simplify_tolerance} must be finite and non-negative"
        )));
    }
    if !buffer_margin.is_finite() || buffer_margin < 0.0 {
        return Err(GridError::InvalidParameter(format!(
            "vectorize: buffer margin {buffer_margin} must be finite and non-negative"
        )));
    }

    let comps = label_components(grid, threshold);
    let regions = trace_regions(&comps, grid.width() as usize, grid.height() as usize);

    let mut out = PolygonExtraction::default();
    for (region, &value) in regions.iter().zip(&comps.values) {
        let Some(region) = region else {
            // Unreachable for a labeled component; counted instead of
            // asserted so a tracing gap can never abort the run.
            log::warn!("shape lost while tracing region boundary");
            out.dropped += 1;
            continue;
        };

        let polygon = region_to_polygon(region, grid.info());

        let simplified = if simplify_tolerance > 0.0 {
            drop_collapsed_holes(polygon.simplify(&simplify_tolerance))
        } else {
            polygon
        };
        if is_collapsed(&simplified) {
            log::warn!("shape lost in simplifying (value {value})");
            out.dropped += 1;
            continue;
        }

        let buffered = if buffer_margin > 0.0 {
            buffer_polygon(&simplified, buffer_margin)
        } else {
            MultiPolygon::new(vec![simplified])
        };
        if buffered.0.is_empty() || buffered.unsigned_area() == 0.0 {
            log::warn!("shape lost in buffering (value {value})");
            out.dropped += 1;
            continue;
        }

        out.polygons.push(ObstaclePolygon {
            geometry: buffered,
            value,
        });
    }

    log::debug!(
        "vectorize: {} polygons, {} dropped",
        out.polygons.len(),
        out.dropped
    );

    Ok(out)
}

/// A ring that lost its interior to simplification no longer bounds any
/// area; buffering such a shape is meaningless, so it is treated as empty.
fn is_collapsed(polygon: &Polygon<f64>) -> bool {
    polygon.exterior().0.len() < 4 || polygon.unsigned_area() == 0.0
}

/// An interior ring can collapse under the same tolerance that leaves the
/// exterior standing; a collapsed hole bounds no area and must not reach
/// the buffering step.
fn drop_collapsed_holes(polygon: Polygon<f64>) -> Polygon<f64> {
    if polygon.interiors().iter().all(|ring| ring.0.len() >= 4) {
        return polygon;
    }
    let (exterior, interiors) = polygon.into_inner();
    Polygon::new(
        exterior,
        interiors
            .into_iter()
            .filter(|ring| ring.0.len() >= 4)
            .collect(),
    )
}

fn region_to_polygon(region: &RegionRings, info: &MapInfo) -> Polygon<f64> {
    let exterior = ring_to_world(&region.exterior, info);
    let holes = region
        .holes
        .iter()
        .map(|ring| ring_to_world(ring, info))
        .collect();
    Polygon::new(exterior, holes)
}

fn ring_to_world(ring: &[(i64, i64)], info: &MapInfo) -> LineString<f64> {
    ring.iter()
        .map(|&(x, y)| {
            (
                info.origin.x as f64 + x as f64 * info.resolution as f64,
                info.origin.y as f64 + y as f64 * info.resolution as f64,
            )
        })
        .collect()
}
