//! Room Settings Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Room settings: coordinate bounds and grid behaviour of the floor plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RoomSettings {
    #[validate(range(exclusive_min = 0.0))]
    pub width: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub height: f64,
    #[validate(length(min = 1, max = 100))]
    pub background_color: String,
    /// Whether the grid is drawn (display only)
    pub grid_enabled: bool,
    #[validate(range(min = 1.0))]
    pub grid_size: f64,
    /// Whether geometry mutations round to the grid
    pub snap_to_grid: bool,
    /// Advisory only: overlapping tables are reported, never refused
    pub allow_overlap: bool,
    /// Pixels per real-world unit
    #[validate(range(exclusive_min = 0.0))]
    pub scale: f64,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background_color: "#ffffff".to_string(),
            grid_enabled: true,
            grid_size: 20.0,
            snap_to_grid: true,
            allow_overlap: false,
            scale: 1.0,
        }
    }
}
