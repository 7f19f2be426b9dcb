//! Multi-band raster container.
//!
//! Band order is fixed and meaningful: aerial imagery conventionally
//! carries red, green, blue, near-infrared, and the derived occupancy band
//! is appended last. File I/O stays with the caller; this type only holds
//! the in-memory bands and their descriptions.

use crate::grid::Grid2d;
use crate::types::{GridError, MapInfo};

#[derive(Debug, Clone)]
pub struct Raster {
    info: MapInfo,
    bands: Vec<Grid2d<u8>>,
    descriptions: Vec<Option<String>>,
}

impl Raster {
    /// Conventional 0-based index of the near-infrared band (band 4 of the
    /// source file, which numbers bands from 1).
    pub const NIR_BAND: usize = 3;

    pub fn new(info: MapInfo) -> Self {
        Self {
            info,
            bands: Vec::new(),
            descriptions: Vec::new(),
        }
    }

    pub fn info(&self) -> &MapInfo {
        &self.info
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    pub fn band(&self, index: usize) -> Option<&Grid2d<u8>> {
        self.bands.get(index)
    }

    pub fn description(&self, index: usize) -> Option<&str> {
        self.descriptions.get(index)?.as_deref()
    }

    /// Append a band. All bands share the raster's shape.
    pub fn push_band(
        &mut self,
        band: Grid2d<u8>,
        description: Option<String>,
    ) -> Result<(), GridError> {
        if band.width() != self.info.width || band.height() != self.info.height {
            return Err(GridError::InvalidMetadata(format!(
                "band shape {}x{} does not match raster shape {}x{}",
                band.width(),
                band.height(),
                self.info.width,
                self.info.height
            )));
        }
        self.bands.push(band);
        self.descriptions.push(description);
        Ok(())
    }
}
