/// Cell holds no obstacle.
pub const FREE: u8 = 0;
/// Cell is an obstacle (or was rewritten to one by the reachability filter).
pub const OCCUPIED: u8 = 255;
/// Transient label written into the flood-fill mask for reachable cells.
pub const REACHABLE_MARK: u8 = 200;

pub const DEFAULT_HIGH_BOUND: u8 = 70;
pub const DEFAULT_LOW_BOUND: u8 = 50;

pub const DEFAULT_KERNEL_SIZE: u32 = 5;
pub const DEFAULT_DILATE_ITERATIONS: u32 = 1;

pub const DEFAULT_FLOOD_LO_DIFF: u8 = 50;
pub const DEFAULT_FLOOD_UP_DIFF: u8 = 50;

pub const DEFAULT_POLYGON_THRESHOLD: u8 = 225;
pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 0.005;
pub const DEFAULT_BUFFER_MARGIN: f64 = 1.0;
