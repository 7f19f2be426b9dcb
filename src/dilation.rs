//! Grayscale morphological dilation with an all-ones square kernel.
//!
//! Each output cell is the maximum input value inside the `k x k`
//! neighborhood centered on it, with zero padding outside the grid. The
//! implementation runs a row pass followed by a column pass; for an
//! all-ones rectangular structuring element this is exactly the naive
//! sliding maximum, and since out-of-grid cells contribute 0 the window is
//! simply clamped to the grid.
//!
//! This is the stage that closes 1-2 cell gaps between detected-occupied
//! clusters, trading spatial precision for connectivity.

use crate::grid::Grid2d;
use crate::types::GridError;

/// Dilate `grid` with an all-ones `kernel_size x kernel_size` structuring
/// element, `iterations` times.
///
/// `kernel_size` must be odd; `iterations = 0` returns the input
/// unchanged.
pub fn dilate(
    grid: &Grid2d<u8>,
    kernel_size: u32,
    iterations: u32,
) -> Result<Grid2d<u8>, GridError> {
    if grid.info().is_empty() {
        return Err(GridError::InvalidMetadata(
            "dilation: grid has no rows or columns".to_string(),
        ));
    }
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(GridError::InvalidParameter(format!(
            "dilation: structuring element side {kernel_size} must be odd"
        )));
    }

    let mut out = grid.clone();
    let radius = (kernel_size / 2) as usize;
    if radius == 0 {
        return Ok(out);
    }

    let width = grid.width() as usize;
    let height = grid.height() as usize;
    let mut row_max = vec![0u8; width * height];

    for _ in 0..iterations {
        let src = out.data();

        // Row pass: sliding max along x.
        for y in 0..height {
            let row = &src[y * width..(y + 1) * width];
            for x in 0..width {
                let lo = x.saturating_sub(radius);
                let hi = (x + radius).min(width - 1);
                let mut max = 0u8;
                for &v in &row[lo..=hi] {
                    if v > max {
                        max = v;
                    }
                }
                row_max[y * width + x] = max;
            }
        }

        // Column pass: sliding max along y over the row maxima.
        let dst = out.data_mut();
        for y in 0..height {
            let lo = y.saturating_sub(radius);
            let hi = (y + radius).min(height - 1);
            for x in 0..width {
                let mut max = 0u8;
                for yy in lo..=hi {
                    let v = row_max[yy * width + x];
                    if v > max {
                        max = v;
                    }
                }
                dst[y * width + x] = max;
            }
        }
    }

    Ok(out)
}
