//! Floor plan geometry: grid snapping and bounds

pub mod bounds;
pub mod grid;

pub use bounds::Rect;
pub use grid::{normalize_rotation, snap, snap_point, snap_size, snap_value};
