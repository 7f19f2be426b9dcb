//! Pipeline configuration.
//!
//! Every option the derivation and vectorization stages take is collected
//! here and validated once, at pipeline construction, instead of being
//! re-checked ad hoc inside each stage call.

use glam::UVec2;
use serde::{Deserialize, Serialize};

use crate::reachability::Connectivity;
use crate::types::{
    DEFAULT_BUFFER_MARGIN, DEFAULT_DILATE_ITERATIONS, DEFAULT_FLOOD_LO_DIFF,
    DEFAULT_FLOOD_UP_DIFF, DEFAULT_HIGH_BOUND, DEFAULT_KERNEL_SIZE, DEFAULT_LOW_BOUND,
    DEFAULT_POLYGON_THRESHOLD, DEFAULT_SIMPLIFY_TOLERANCE, GridError,
};

/// Band classification bounds. Samples above `high` become occupied,
/// samples below `low` become free, the zone in between stays ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdBounds {
    pub high: u8,
    pub low: u8,
}

impl Default for ThresholdBounds {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_BOUND,
            low: DEFAULT_LOW_BOUND,
        }
    }
}

/// Per-step tolerance band of the reachability flood fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloodTolerance {
    pub lo_diff: u8,
    pub up_diff: u8,
}

impl Default for FloodTolerance {
    fn default() -> Self {
        Self {
            lo_diff: DEFAULT_FLOOD_LO_DIFF,
            up_diff: DEFAULT_FLOOD_UP_DIFF,
        }
    }
}

/// Vectorization parameters, in the raster's native linear units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolygonParams {
    pub threshold: u8,
    pub simplify_tolerance: f64,
    pub buffer_margin: f64,
}

impl Default for PolygonParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_POLYGON_THRESHOLD,
            simplify_tolerance: DEFAULT_SIMPLIFY_TOLERANCE,
            buffer_margin: DEFAULT_BUFFER_MARGIN,
        }
    }
}

/// Full pipeline configuration. `seed: None` skips reachability filtering
/// entirely; the dilated grid then flows straight into vectorization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub threshold: ThresholdBounds,
    #[serde(default = "default_kernel_size")]
    pub kernel_size: u32,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default)]
    pub seed: Option<UVec2>,
    #[serde(default)]
    pub flood: FloodTolerance,
    #[serde(default)]
    pub connectivity: Connectivity,
    #[serde(default)]
    pub polygon: PolygonParams,
}

fn default_kernel_size() -> u32 {
    DEFAULT_KERNEL_SIZE
}

fn default_iterations() -> u32 {
    DEFAULT_DILATE_ITERATIONS
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threshold: ThresholdBounds::default(),
            kernel_size: DEFAULT_KERNEL_SIZE,
            iterations: DEFAULT_DILATE_ITERATIONS,
            seed: None,
            flood: FloodTolerance::default(),
            connectivity: Connectivity::default(),
            polygon: PolygonParams::default(),
        }
    }
}

impl PipelineConfig {
    /// Check every static precondition. The seed's bounds are checked
    /// against the actual grid when the pipeline runs.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.threshold.high < self.threshold.low {
            return Err(GridError::InvalidParameter(format!(
                "config: threshold high bound {} is below low bound {}",
                self.threshold.high, self.threshold.low
            )));
        }
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 {
            return Err(GridError::InvalidParameter(format!(
                "config: structuring element side {} must be odd",
                self.kernel_size
            )));
        }
        if !self.polygon.simplify_tolerance.is_finite() || self.polygon.simplify_tolerance < 0.0 {
            return Err(GridError::InvalidParameter(format!(
                "config: simplify tolerance {} must be finite and non-negative",
                self.polygon.simplify_tolerance
            )));
        }
        if !self.polygon.buffer_margin.is_finite() || self.polygon.buffer_margin < 0.0 {
            return Err(GridError::InvalidParameter(format!(
                "config: buffer margin {} must be finite and non-negative",
                self.polygon.buffer_margin
            )));
        }
        Ok(())
    }
}
