pub mod config;
pub mod dilation;
pub mod grid;
pub mod pipeline;
pub mod reachability;
pub mod threshold;
pub mod types;
pub mod vectorize;

pub use config::{FloodTolerance, PipelineConfig, PolygonParams, ThresholdBounds};
pub use dilation::dilate;
pub use grid::{Grid2d, Raster};
pub use pipeline::{OccupancyPipeline, PipelineOutput};
pub use reachability::{Connectivity, filter_reachable};
pub use threshold::extract_threshold;
pub use types::{GridError, MapInfo};
pub use vectorize::{ObstaclePolygon, PolygonExtraction, extract_polygons};
