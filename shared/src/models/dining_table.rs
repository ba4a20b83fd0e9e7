//! Dining Table Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

/// Table shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TableShape {
    #[default]
    Round,
    Rectangular,
}

/// Dining table entity
///
/// `number` is the display number guests see on escort cards and is unique
/// within a layout. `guests` is kept in lockstep with `Guest::table` by the
/// seating model and must never be edited directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: i64,
    pub number: u32,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub capacity: u32,
    pub shape: TableShape,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub guests: BTreeSet<i64>,
}

impl DiningTable {
    pub fn occupancy(&self) -> usize {
        self.guests.len()
    }

    pub fn is_full(&self) -> bool {
        self.guests.len() >= self.capacity as usize
    }

    pub fn seats_left(&self) -> usize {
        (self.capacity as usize).saturating_sub(self.guests.len())
    }
}

/// Table preset: what the "add table" palette offers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TablePreset {
    /// Palette label; created tables are named `Table n`
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub shape: TableShape,
    #[validate(range(exclusive_min = 0.0))]
    pub width: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub height: f64,
    #[validate(range(min = 1, max = 100))]
    pub capacity: u32,
}

impl TablePreset {
    /// Round table for 8
    pub fn round_8() -> Self {
        Self {
            name: "Round 8".to_string(),
            shape: TableShape::Round,
            width: 120.0,
            height: 120.0,
            capacity: 8,
        }
    }

    /// Round table for 10
    pub fn round_10() -> Self {
        Self {
            name: "Round 10".to_string(),
            shape: TableShape::Round,
            width: 140.0,
            height: 140.0,
            capacity: 10,
        }
    }

    /// Banquet table for 8
    pub fn banquet_8() -> Self {
        Self {
            name: "Banquet 8".to_string(),
            shape: TableShape::Rectangular,
            width: 240.0,
            height: 80.0,
            capacity: 8,
        }
    }

    /// Default preset for a bare shape
    pub fn for_shape(shape: TableShape) -> Self {
        match shape {
            TableShape::Round => Self::round_8(),
            TableShape::Rectangular => Self::banquet_8(),
        }
    }
}

/// Create table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub preset: TablePreset,
    /// Top-left corner; the model's default anchor is used when absent
    pub position: Option<(f64, f64)>,
}

impl From<TablePreset> for DiningTableCreate {
    fn from(preset: TablePreset) -> Self {
        Self {
            preset,
            position: None,
        }
    }
}

impl From<TableShape> for DiningTableCreate {
    fn from(shape: TableShape) -> Self {
        TablePreset::for_shape(shape).into()
    }
}
