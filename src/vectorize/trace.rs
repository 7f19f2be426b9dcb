//! Boundary tracing of labeled components into closed lattice rings.
//!
//! Every cell side between a component cell and anything else (another
//! label, background, or the grid border) becomes a directed edge walked
//! with the component on a fixed side, so each component yields one outer
//! ring plus one ring per interior hole. Outer rings come out with
//! positive signed area, holes negative.

use std::collections::BTreeMap;

use super::components::Components;

/// Lattice corner, stored `(y, x)` so the natural tuple order matches the
/// row-major scan order used to pick ring starting points.
type Vertex = (i64, i64);

/// Rings of one component, vertices as `(x, y)` lattice corners. The first
/// vertex implicitly connects to the last.
pub(crate) struct RegionRings {
    pub exterior: Vec<(i64, i64)>,
    pub holes: Vec<Vec<(i64, i64)>>,
}

pub(crate) fn trace_regions(
    components: &Components,
    width: usize,
    height: usize,
) -> Vec<Option<RegionRings>> {
    let mut edges: Vec<BTreeMap<Vertex, Vec<Vertex>>> =
        vec![BTreeMap::new(); components.count as usize];

    let labels = &components.labels;
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let label = labels[y as usize * width + x as usize];
            if label == 0 {
                continue;
            }
            let map = &mut edges[label as usize - 1];
            let differs = |nx: i64, ny: i64| {
                nx < 0
                    || ny < 0
                    || nx >= width as i64
                    || ny >= height as i64
                    || labels[ny as usize * width + nx as usize] != label
            };

            // Directed so the cell lies on a consistent side of the walk.
            if differs(x, y - 1) {
                map.entry((y, x)).or_default().push((y, x + 1));
            }
            if differs(x + 1, y) {
                map.entry((y, x + 1)).or_default().push((y + 1, x + 1));
            }
            if differs(x, y + 1) {
                map.entry((y + 1, x + 1)).or_default().push((y + 1, x));
            }
            if differs(x - 1, y) {
                map.entry((y + 1, x)).or_default().push((y, x));
            }
        }
    }

    edges.into_iter().map(assemble_region).collect()
}

fn assemble_region(mut edges: BTreeMap<Vertex, Vec<Vertex>>) -> Option<RegionRings> {
    let mut exterior: Option<Vec<(i64, i64)>> = None;
    let mut holes = Vec::new();

    while let Some(ring) = walk_ring(&mut edges) {
        if signed_area(&ring) > 0.0 {
            // A 4-connected component has exactly one outer ring.
            debug_assert!(exterior.is_none(), "second outer ring in one component");
            exterior = Some(ring);
        } else {
            holes.push(ring);
        }
    }

    Some(RegionRings {
        exterior: exterior?,
        holes,
    })
}

/// Walk one closed ring, starting from the smallest `(y, x)` vertex that
/// still has an unused outgoing edge. That vertex is always a plain corner
/// (single outgoing edge), so the walk never starts inside an ambiguous
/// self-touching crossing.
fn walk_ring(edges: &mut BTreeMap<Vertex, Vec<Vertex>>) -> Option<Vec<(i64, i64)>> {
    let start = *edges
        .iter()
        .find(|(_, outs)| !outs.is_empty())
        .map(|(vertex, _)| vertex)?;

    let mut current = edges.get_mut(&start).and_then(|outs| outs.pop())?;
    let mut dir = (current.0 - start.0, current.1 - start.1);
    let mut ring = vec![(start.1, start.0)];

    loop {
        let next = match edges.get_mut(&current) {
            Some(outs) if !outs.is_empty() => take_next(outs, current, dir),
            // Out-edges exhausted: the walk is back at `start`.
            _ => break,
        };

        let next_dir = (next.0 - current.0, next.1 - current.1);
        if next_dir != dir {
            ring.push((current.1, current.0));
            dir = next_dir;
        }
        current = next;
    }

    Some(ring)
}

/// Pick the outgoing edge continuing the walk. Where a boundary touches
/// itself at a corner, two edges leave the vertex; taking the sharpest
/// clockwise turn keeps the walk on the side of the cell it arrived along,
/// so self-touching boundaries stay non-crossing.
fn take_next(outs: &mut Vec<Vertex>, at: Vertex, dir: (i64, i64)) -> Vertex {
    if outs.len() == 1 {
        return outs.pop().expect("checked non-empty");
    }

    let clockwise = (dir.1, -dir.0);
    let straight = dir;
    for preferred in [clockwise, straight] {
        let target = (at.0 + preferred.0, at.1 + preferred.1);
        if let Some(idx) = outs.iter().position(|&v| v == target) {
            return outs.swap_remove(idx);
        }
    }
    outs.pop().expect("checked non-empty")
}

/// Shoelace area of a ring of `(x, y)` vertices (implicitly closed).
pub(crate) fn signed_area(ring: &[(i64, i64)]) -> f64 {
    let mut doubled = 0i64;
    for i in 0..ring.len() {
        let (x0, y0) = ring[i];
        let (x1, y1) = ring[(i + 1) % ring.len()];
        doubled += x0 * y1 - x1 * y0;
    }
    doubled as f64 / 2.0
}

#[cfg(test)]
mod tests {
    use super::super::components::label_components;
    use super::*;
    use crate::grid::Grid2d;
    use crate::types::MapInfo;

    fn regions(side: u32, values: Vec<u8>) -> Vec<Option<RegionRings>> {
        let grid = Grid2d::new(MapInfo::square(side, 1.0), values).unwrap();
        let comps = label_components(&grid, 225);
        trace_regions(&comps, side as usize, side as usize)
    }

    #[test]
    fn single_cell_ring() {
        let mut values = vec![0u8; 9];
        values[4] = 255;
        let regions = regions(3, values);
        assert_eq!(regions.len(), 1);

        let region = regions[0].as_ref().unwrap();
        assert!(region.holes.is_empty());
        assert_eq!(signed_area(&region.exterior), 1.0);
        assert_eq!(region.exterior.len(), 4);
        assert!(region.exterior.contains(&(1, 1)));
        assert!(region.exterior.contains(&(2, 2)));
    }

    #[test]
    fn rectangle_merges_collinear_vertices() {
        let regions = regions(
            4,
            vec![
                0, 0, 0, 0, //
                255, 255, 255, 0, //
                255, 255, 255, 0, //
                0, 0, 0, 0, //
            ],
        );
        let region = regions[0].as_ref().unwrap();
        // 3x2 rectangle: four corners only, no intermediate lattice points.
        assert_eq!(region.exterior.len(), 4);
        assert_eq!(signed_area(&region.exterior), 6.0);
    }

    #[test]
    fn ring_shape_preserves_hole() {
        let regions = regions(
            5,
            vec![
                255, 255, 255, 255, 255, //
                255, 0, 0, 255, 255, //
                255, 0, 0, 255, 255, //
                255, 255, 255, 255, 255, //
                255, 255, 255, 255, 255, //
            ],
        );
        assert_eq!(regions.len(), 1);

        let region = regions[0].as_ref().unwrap();
        assert_eq!(signed_area(&region.exterior), 25.0);
        assert_eq!(region.holes.len(), 1);
        assert_eq!(signed_area(&region.holes[0]), -4.0);
    }

    #[test]
    fn diagonal_components_trace_separately() {
        let regions = regions(
            2,
            vec![
                255, 0, //
                0, 255, //
            ],
        );
        assert_eq!(regions.len(), 2);
        for region in &regions {
            let region = region.as_ref().unwrap();
            assert_eq!(signed_area(&region.exterior), 1.0);
        }
    }

    #[test]
    fn diagonal_pinch_stays_one_ring() {
        // Cells (1,1) and (2,2) touch only at a corner but belong to one
        // component through the hook of cells around them, so the outer
        // boundary passes through the lattice point (2,2) twice.
        let regions = regions(
            4,
            vec![
                0, 0, 0, 0, //
                255, 255, 0, 0, //
                255, 0, 255, 0, //
                255, 255, 255, 0, //
            ],
        );
        assert_eq!(regions.len(), 1);
        let region = regions[0].as_ref().unwrap();
        assert_eq!(signed_area(&region.exterior), 7.0);
        // The pocket at (1,2) leaks out diagonally past (2,1); the
        // 8-connected background means it is not a hole.
        assert!(region.holes.is_empty());
    }

    #[test]
    fn diagonal_free_cells_merge_into_one_hole() {
        // Two free cells touching at a corner inside an occupied block:
        // the background is 8-connected, so they form a single hole whose
        // ring passes through the shared corner twice.
        let regions = regions(
            4,
            vec![
                255, 255, 255, 255, //
                255, 0, 255, 255, //
                255, 255, 0, 255, //
                255, 255, 255, 255, //
            ],
        );
        let region = regions[0].as_ref().unwrap();
        assert_eq!(signed_area(&region.exterior), 16.0);
        assert_eq!(region.holes.len(), 1);
        assert_eq!(signed_area(&region.holes[0]), -2.0);
    }
}
