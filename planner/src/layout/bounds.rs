//! Axis-aligned bounds for overlap reports
//!
//! Rotation is ignored: the check is advisory and only has to catch the
//! obvious "two tables on top of each other" case.

use shared::models::{DiningTable, Fixture};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    /// Whether the rect lies fully within `[0, width] x [0, height]`
    pub fn within(&self, width: f64, height: f64) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.x + self.width <= width && self.y + self.height <= height
    }
}

impl From<&DiningTable> for Rect {
    fn from(t: &DiningTable) -> Self {
        Rect::new(t.x, t.y, t.width, t.height)
    }
}

impl From<&Fixture> for Rect {
    fn from(f: &Fixture) -> Self {
        Rect::new(f.x, f.y, f.width, f.height)
    }
}
