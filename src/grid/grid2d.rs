use glam::{UVec2, Vec2};

use crate::types::{GridError, MapInfo};

/// Rectangular 2-D grid backed by a row-major `Vec`.
///
/// `x` indexes columns and `y` indexes rows, so cell `(x, y)` of a grid
/// with shape `(rows, cols)` lives at `data[y * cols + x]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2d<T> {
    info: MapInfo,
    data: Vec<T>,
}

impl<T> Grid2d<T> {
    pub fn new(info: MapInfo, data: Vec<T>) -> Result<Self, GridError> {
        if data.len() != info.len() {
            return Err(GridError::InvalidMetadata(format!(
                "data length {} does not match grid size {}x{}",
                data.len(),
                info.width,
                info.height
            )));
        }

        Ok(Self { info, data })
    }

    pub fn new_with_value(info: MapInfo, value: T) -> Self
    where
        T: Clone,
    {
        let len = info.len();
        Self {
            info,
            data: vec![value; len],
        }
    }

    pub fn empty(info: MapInfo) -> Self
    where
        T: Clone + Default,
    {
        Self::new_with_value(info, T::default())
    }

    pub fn info(&self) -> &MapInfo {
        &self.info
    }

    pub fn width(&self) -> u32 {
        self.info.width
    }

    pub fn height(&self) -> u32 {
        self.info.height
    }

    #[inline]
    pub fn contains(&self, pos: UVec2) -> bool {
        pos.x < self.info.width && pos.y < self.info.height
    }

    pub fn get(&self, pos: UVec2) -> Option<&T> {
        if !self.contains(pos) {
            return None;
        }
        let idx = self.index(pos);
        Some(&self.data[idx])
    }

    pub fn get_mut(&mut self, pos: UVec2) -> Option<&mut T> {
        if !self.contains(pos) {
            return None;
        }
        let idx = self.index(pos);
        Some(&mut self.data[idx])
    }

    pub fn set(&mut self, pos: UVec2, value: T) -> Result<(), GridError> {
        if !self.contains(pos) {
            return Err(GridError::OutOfBounds(format!(
                "cell ({}, {}) out of bounds for grid {}x{}",
                pos.x, pos.y, self.info.width, self.info.height
            )));
        }
        let idx = self.index(pos);
        self.data[idx] = value;
        Ok(())
    }

    #[inline]
    fn index(&self, pos: UVec2) -> usize {
        (pos.y as usize) * (self.info.width as usize) + (pos.x as usize)
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (UVec2, &T)> {
        let width = self.info.width;
        self.data.iter().enumerate().map(move |(i, value)| {
            let i = i as u32;
            (UVec2::new(i % width, i / width), value)
        })
    }

    pub fn map_to_world(&self, pos: Vec2) -> Vec2 {
        self.info.origin + pos * self.info.resolution
    }

    pub fn world_to_map(&self, pos: Vec2) -> Option<Vec2> {
        let m = (pos - self.info.origin) / self.info.resolution;
        if m.x < 0.0 || m.y < 0.0 || m.x >= self.info.width as f32 || m.y >= self.info.height as f32
        {
            return None;
        }
        Some(m)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_mismatched_data_length() {
        let info = MapInfo::square(4, 1.0);
        assert!(Grid2d::new(info, vec![0u8; 15]).is_err());
    }

    #[test]
    fn get_set_roundtrip_and_bounds() {
        let mut grid = Grid2d::<u8>::empty(MapInfo::square(3, 1.0));
        grid.set(UVec2::new(2, 1), 7).unwrap();
        assert_eq!(grid.get(UVec2::new(2, 1)), Some(&7));
        assert_eq!(grid.get(UVec2::new(3, 0)), None);
        assert!(grid.set(UVec2::new(0, 3), 1).is_err());
    }

    #[test]
    fn world_to_map_to_world() {
        let grid = Grid2d::<u8>::empty(MapInfo {
            width: 10,
            height: 10,
            resolution: 0.5,
            origin: Vec2::new(2.0, -1.0),
        });

        let world = Vec2::new(3.5, 0.5);
        let map = grid.world_to_map(world).unwrap();
        assert_eq!(grid.map_to_world(map), world);
        assert!(grid.world_to_map(Vec2::new(1.0, 0.0)).is_none());
    }

    #[test]
    fn iter_cells_visits_row_major() {
        let grid = Grid2d::new(MapInfo::square(2, 1.0), vec![1u8, 2, 3, 4]).unwrap();
        let cells: Vec<(UVec2, u8)> = grid.iter_cells().map(|(p, v)| (p, *v)).collect();
        assert_eq!(cells[0], (UVec2::new(0, 0), 1));
        assert_eq!(cells[1], (UVec2::new(1, 0), 2));
        assert_eq!(cells[2], (UVec2::new(0, 1), 3));
        assert_eq!(cells[3], (UVec2::new(1, 1), 4));
    }
}
