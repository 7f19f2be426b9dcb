//! Connected-component labeling of the obstacle mask.

use crate::grid::Grid2d;

/// Labeling of cells above the obstacle threshold. `labels` is row-major
/// with 0 meaning background; component ids run 1..=count. `values` holds,
/// per component, the raw grid value of the first cell encountered in scan
/// order, kept as the polygon attribute.
pub(crate) struct Components {
    pub labels: Vec<u32>,
    pub count: u32,
    pub values: Vec<u8>,
}

/// Label maximal 4-connected groups of cells with value `> threshold`.
///
/// Foreground uses 4-connectivity; the background (and therefore any hole)
/// is implicitly 8-connected, the usual raster-polygonization duality.
pub(crate) fn label_components(grid: &Grid2d<u8>, threshold: u8) -> Components {
    let width = grid.width() as usize;
    let height = grid.height() as usize;
    let data = grid.data();

    let mut labels = vec![0u32; width * height];
    let mut values = Vec::new();
    let mut count = 0u32;
    let mut stack = Vec::new();

    for start in 0..width * height {
        if data[start] <= threshold || labels[start] != 0 {
            continue;
        }

        count += 1;
        values.push(data[start]);
        labels[start] = count;
        stack.push(start);

        while let Some(idx) = stack.pop() {
            let x = idx % width;
            let y = idx / width;

            let mut visit = |nx: usize, ny: usize| {
                let nidx = ny * width + nx;
                if labels[nidx] == 0 && data[nidx] > threshold {
                    labels[nidx] = count;
                    stack.push(nidx);
                }
            };

            if x > 0 {
                visit(x - 1, y);
            }
            if x + 1 < width {
                visit(x + 1, y);
            }
            if y > 0 {
                visit(x, y - 1);
            }
            if y + 1 < height {
                visit(x, y + 1);
            }
        }
    }

    Components {
        labels,
        count,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MapInfo;

    fn grid(side: u32, values: Vec<u8>) -> Grid2d<u8> {
        Grid2d::new(MapInfo::square(side, 1.0), values).unwrap()
    }

    #[test]
    fn separates_disjoint_blobs() {
        let comps = label_components(
            &grid(
                4,
                vec![
                    255, 255, 0, 0, //
                    255, 255, 0, 0, //
                    0, 0, 0, 0, //
                    0, 0, 0, 255, //
                ],
            ),
            225,
        );
        assert_eq!(comps.count, 2);
        assert_eq!(comps.labels[0], comps.labels[5]);
        assert_ne!(comps.labels[0], comps.labels[15]);
    }

    #[test]
    fn diagonal_touch_is_two_components() {
        let comps = label_components(
            &grid(
                2,
                vec![
                    255, 0, //
                    0, 255, //
                ],
            ),
            225,
        );
        assert_eq!(comps.count, 2);
    }

    #[test]
    fn threshold_is_strict() {
        let comps = label_components(&grid(2, vec![225, 226, 0, 0]), 225);
        assert_eq!(comps.count, 1);
        assert_eq!(comps.labels, vec![0, 1, 0, 0]);
        assert_eq!(comps.values, vec![226]);
    }

    #[test]
    fn representative_value_is_first_in_scan_order() {
        let comps = label_components(&grid(2, vec![230, 255, 255, 255]), 225);
        assert_eq!(comps.count, 1);
        assert_eq!(comps.values, vec![230]);
    }
}
