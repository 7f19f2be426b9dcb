//! Stage composition: band -> threshold -> dilation -> optional
//! reachability -> polygons.
//!
//! Each stage borrows its input and returns a new grid, so intermediate
//! results stay independently inspectable and the strict sequencing the
//! stages require (reachability must finish before vectorization reads
//! the grid) is inherent in the call structure.

use crate::config::PipelineConfig;
use crate::dilation::dilate;
use crate::grid::{Grid2d, Raster};
use crate::reachability::filter_reachable;
use crate::threshold::extract_threshold;
use crate::types::GridError;
use crate::vectorize::{PolygonExtraction, extract_polygons};

/// Description attached to the occupancy band appended to a raster.
pub const OCCUPANCY_BAND_DESCRIPTION: &str = "Occupancy";

/// Output of a full pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Final occupancy grid (reachability-filtered when a seed was set).
    pub grid: Grid2d<u8>,
    /// Obstacle polygons extracted from `grid`.
    pub polygons: PolygonExtraction,
}

/// Validated pipeline over one raster band.
#[derive(Debug, Clone)]
pub struct OccupancyPipeline {
    config: PipelineConfig,
}

impl OccupancyPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, GridError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Derive the occupancy grid from a single band: threshold, dilate,
    /// then restrict to the seed-reachable region when a seed is set.
    pub fn derive_grid(&self, band: &Grid2d<u8>) -> Result<Grid2d<u8>, GridError> {
        let config = &self.config;
        let thresholded = extract_threshold(band, config.threshold.high, config.threshold.low)?;
        let dilated = dilate(&thresholded, config.kernel_size, config.iterations)?;

        match config.seed {
            Some(seed) => filter_reachable(
                &dilated,
                seed,
                config.flood.lo_diff,
                config.flood.up_diff,
                config.connectivity,
            ),
            None => Ok(dilated),
        }
    }

    /// Vectorize obstacles out of a derived occupancy grid.
    pub fn extract_obstacles(&self, grid: &Grid2d<u8>) -> Result<PolygonExtraction, GridError> {
        let polygon = &self.config.polygon;
        extract_polygons(
            grid,
            polygon.threshold,
            polygon.simplify_tolerance,
            polygon.buffer_margin,
        )
    }

    /// Run the full pipeline on one band.
    pub fn run(&self, band: &Grid2d<u8>) -> Result<PipelineOutput, GridError> {
        let grid = self.derive_grid(band)?;
        let polygons = self.extract_obstacles(&grid)?;
        Ok(PipelineOutput { grid, polygons })
    }

    /// Append a derived occupancy grid to `raster` as its last band,
    /// described [`OCCUPANCY_BAND_DESCRIPTION`]. Writing the raster to a
    /// file stays with the caller.
    pub fn annotate_raster(&self, raster: &mut Raster, grid: Grid2d<u8>) -> Result<(), GridError> {
        raster.push_band(grid, Some(OCCUPANCY_BAND_DESCRIPTION.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use glam::UVec2;

    use super::*;
    use crate::types::{FREE, MapInfo, OCCUPIED};

    #[test]
    fn invalid_config_fails_at_construction() {
        let config = PipelineConfig {
            kernel_size: 2,
            ..Default::default()
        };
        assert!(OccupancyPipeline::new(config).is_err());
    }

    #[test]
    fn unseeded_run_skips_reachability() {
        // A free pocket fenced off by obstacles survives without a seed.
        let mut band = Grid2d::<u8>::empty(MapInfo::square(9, 1.0));
        for i in 0..9 {
            band.set(UVec2::new(i, 4), 255).unwrap();
            band.set(UVec2::new(4, i), 255).unwrap();
        }

        let pipeline = OccupancyPipeline::new(PipelineConfig {
            kernel_size: 3,
            ..Default::default()
        })
        .unwrap();

        let grid = pipeline.derive_grid(&band).unwrap();
        assert_eq!(grid.get(UVec2::new(0, 0)), Some(&FREE));
        assert_eq!(grid.get(UVec2::new(8, 8)), Some(&FREE));
        assert_eq!(grid.get(UVec2::new(4, 0)), Some(&OCCUPIED));
    }

    #[test]
    fn seeded_run_closes_unreachable_pockets() {
        let mut band = Grid2d::<u8>::empty(MapInfo::square(9, 1.0));
        for i in 0..9 {
            band.set(UVec2::new(i, 4), 255).unwrap();
            band.set(UVec2::new(4, i), 255).unwrap();
        }

        let pipeline = OccupancyPipeline::new(PipelineConfig {
            kernel_size: 3,
            seed: Some(UVec2::new(0, 0)),
            ..Default::default()
        })
        .unwrap();

        let grid = pipeline.derive_grid(&band).unwrap();
        // The seed's own quadrant stays free, the other three are closed.
        assert_eq!(grid.get(UVec2::new(0, 0)), Some(&FREE));
        assert_eq!(grid.get(UVec2::new(8, 8)), Some(&OCCUPIED));
        assert_eq!(grid.get(UVec2::new(8, 0)), Some(&OCCUPIED));
        assert_eq!(grid.get(UVec2::new(0, 8)), Some(&OCCUPIED));
    }

    #[test]
    fn seed_out_of_bounds_surfaces_from_run() {
        let band = Grid2d::<u8>::empty(MapInfo::square(4, 1.0));
        let pipeline = OccupancyPipeline::new(PipelineConfig {
            seed: Some(UVec2::new(9, 9)),
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(
            pipeline.run(&band),
            Err(GridError::OutOfBounds(_))
        ));
    }

    #[test]
    fn annotate_raster_appends_described_band() {
        let info = MapInfo::square(4, 1.0);
        let mut raster = Raster::new(info.clone());
        raster
            .push_band(Grid2d::<u8>::empty(info.clone()), Some("NIR".to_string()))
            .unwrap();

        let pipeline = OccupancyPipeline::new(PipelineConfig::default()).unwrap();
        pipeline
            .annotate_raster(&mut raster, Grid2d::<u8>::empty(info))
            .unwrap();

        assert_eq!(raster.band_count(), 2);
        assert_eq!(raster.description(1), Some("Occupancy"));
    }
}
