//! Fixed-bound thresholding of a single raster band.

use crate::grid::Grid2d;
use crate::types::{FREE, GridError, OCCUPIED};

/// Classify a band into occupied / free / ambiguous cells.
///
/// Every sample `> high_bound` becomes [`OCCUPIED`] (255) and every sample
/// `< low_bound` becomes [`FREE`] (0). Samples between the bounds are left
/// unchanged; callers must not assume the ambiguous zone is resolved to
/// either class.
pub fn extract_threshold(
    band: &Grid2d<u8>,
    high_bound: u8,
    low_bound: u8,
) -> Result<Grid2d<u8>, GridError> {
    if band.info().is_empty() {
        return Err(GridError::InvalidMetadata(
            "threshold: band has no rows or columns".to_string(),
        ));
    }
    if high_bound < low_bound {
        return Err(GridError::InvalidParameter(format!(
            "threshold: high bound {high_bound} is below low bound {low_bound}"
        )));
    }

    let mut out = band.clone();
    for value in out.data_mut() {
        if *value > high_bound {
            *value = OCCUPIED;
        } else if *value < low_bound {
            *value = FREE;
        }
    }
    Ok(out)
}
