pub mod grid2d;
pub mod raster;

pub use grid2d::Grid2d;
pub use raster::Raster;
