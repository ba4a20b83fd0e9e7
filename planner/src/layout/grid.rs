//! Grid snapping
//!
//! `snap(v) = round(v / grid) * grid` when snap-to-grid is on, identity
//! otherwise. Applied once at mutation time; stored coordinates are never
//! re-snapped when the room settings change later.

use shared::models::RoomSettings;

/// Round `value` to the nearest multiple of `grid_size`
///
/// Non-positive or non-finite grid sizes leave the value untouched.
pub fn snap_value(value: f64, grid_size: f64) -> f64 {
    if !(grid_size.is_finite() && grid_size > 0.0) {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// Snap according to the room's settings
pub fn snap(value: f64, room: &RoomSettings) -> f64 {
    if room.snap_to_grid {
        snap_value(value, room.grid_size)
    } else {
        value
    }
}

/// Snap a point
pub fn snap_point(x: f64, y: f64, room: &RoomSettings) -> (f64, f64) {
    (snap(x, room), snap(y, room))
}

/// Snap a size; a dimension that would collapse to zero keeps one grid cell
pub fn snap_size(width: f64, height: f64, room: &RoomSettings) -> (f64, f64) {
    if !room.snap_to_grid {
        return (width, height);
    }
    let min = room.grid_size;
    (snap(width, room).max(min), snap(height, room).max(min))
}

/// Normalize a rotation to `[0, 360)`
pub fn normalize_rotation(degrees: f64) -> f64 {
    let r = degrees.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}
