mod occupancy;
mod rect;

pub use occupancy::OccupancyMask;
pub use rect::{Position, Rect};
