//! Grid metadata.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Shape and placement of a grid in world coordinates.
///
/// `resolution` is the size of one cell in the raster's native linear
/// units. The default of 1.0 makes world coordinates coincide with pixel
/// coordinates, which is also the unit all vectorization tolerances are
/// expressed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapInfo {
    pub width: u32,
    pub height: u32,
    pub resolution: f32,
    /// Origin of cell (0, 0) in world coordinates.
    pub origin: Vec2,
}

impl Default for MapInfo {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            resolution: 1.0,
            origin: Vec2::ZERO,
        }
    }
}

impl MapInfo {
    pub fn square(width: u32, resolution: f32) -> Self {
        Self {
            width,
            height: width,
            resolution,
            ..Default::default()
        }
    }

    /// Number of cells in the grid.
    #[inline]
    pub fn len(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width of the grid in world units.
    #[inline]
    pub fn world_width(&self) -> f32 {
        self.width as f32 * self.resolution
    }

    /// Height of the grid in world units.
    #[inline]
    pub fn world_height(&self) -> f32 {
        self.height as f32 * self.resolution
    }
}
