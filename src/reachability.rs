//! Reachability filtering via tolerance-chained region growing.
//!
//! Starting from a seed cell, the filter grows a region over the occupancy
//! grid and then rewrites every cell outside that region to [`OCCUPIED`]:
//! terrain that cannot be reached from the start point is treated as an
//! obstacle regardless of its sensed state.
//!
//! The tolerance is applied against the value of the already-filled
//! neighbor a cell is reached from, NOT against the seed value. Far cells
//! may therefore differ from the seed by much more than the tolerance band
//! as long as every growing step stayed within it. This chained semantics
//! is inherited from the reference behavior and is easy to mistake for the
//! naive "within tolerance of the seed" fill; see the ramp test below.

use std::collections::VecDeque;

use glam::UVec2;

use crate::grid::Grid2d;
use crate::types::{GridError, OCCUPIED, REACHABLE_MARK};

/// Neighborhood used by the region growing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Connectivity {
    Four,
    #[default]
    Eight,
}

impl Connectivity {
    fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Self::Four => &[(1, 0), (-1, 0), (0, 1), (0, -1)],
            Self::Eight => &[
                (1, 0),
                (-1, 0),
                (0, 1),
                (0, -1),
                (1, 1),
                (1, -1),
                (-1, 1),
                (-1, -1),
            ],
        }
    }
}

/// Keep cells reachable from `seed`; rewrite everything else to
/// [`OCCUPIED`].
///
/// A neighbor with value `v` joins the region when
/// `pred - lo_diff <= v <= pred + up_diff`, where `pred` is the value of
/// the already-filled cell it is explored from. Reachable cells keep their
/// input value. The seed may sit on an occupied cell; that is a legal
/// degenerate region, not an error.
pub fn filter_reachable(
    grid: &Grid2d<u8>,
    seed: UVec2,
    lo_diff: u8,
    up_diff: u8,
    connectivity: Connectivity,
) -> Result<Grid2d<u8>, GridError> {
    if !grid.contains(seed) {
        return Err(GridError::OutOfBounds(format!(
            "reachability: seed ({}, {}) outside grid {}x{}",
            seed.x,
            seed.y,
            grid.width(),
            grid.height()
        )));
    }

    let mask = flood_mask(grid, seed, lo_diff, up_diff, connectivity);

    let width = grid.width() as usize;
    let height = grid.height() as usize;
    let mask_width = width + 2;

    let mut out = grid.clone();
    let data = out.data_mut();
    let mut reachable = 0usize;
    for y in 0..height {
        for x in 0..width {
            // Skip the 1-cell border the mask is padded with.
            if mask[(y + 1) * mask_width + (x + 1)] > 0 {
                reachable += 1;
            } else {
                data[y * width + x] = OCCUPIED;
            }
        }
    }

    log::debug!(
        "reachability: {reachable} of {} cells reachable from ({}, {})",
        width * height,
        seed.x,
        seed.y
    );

    Ok(out)
}

/// Grow the reachable region and mark it [`REACHABLE_MARK`] in a mask
/// padded by one cell on every side, so neighbor exploration never needs a
/// border special case in the output pass.
fn flood_mask(
    grid: &Grid2d<u8>,
    seed: UVec2,
    lo_diff: u8,
    up_diff: u8,
    connectivity: Connectivity,
) -> Vec<u8> {
    let width = grid.width() as usize;
    let height = grid.height() as usize;
    let mask_width = width + 2;
    let mut mask = vec![0u8; mask_width * (height + 2)];
    let data = grid.data();

    let mut frontier = VecDeque::new();
    mask[(seed.y as usize + 1) * mask_width + (seed.x as usize + 1)] = REACHABLE_MARK;
    frontier.push_back((seed.x as i32, seed.y as i32));

    while let Some((x, y)) = frontier.pop_front() {
        let pred = data[y as usize * width + x as usize];
        let lo = pred.saturating_sub(lo_diff);
        let up = pred.saturating_add(up_diff);

        for &(dx, dy) in connectivity.offsets() {
            let (nx, ny) = (x + dx, y + dy);
            if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
                continue;
            }
            let mask_idx = (ny as usize + 1) * mask_width + (nx as usize + 1);
            if mask[mask_idx] != 0 {
                continue;
            }
            let value = data[ny as usize * width + nx as usize];
            if value >= lo && value <= up {
                mask[mask_idx] = REACHABLE_MARK;
                frontier.push_back((nx, ny));
            }
        }
    }

    mask
}
