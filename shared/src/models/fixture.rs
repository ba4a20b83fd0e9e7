//! Fixture Model
//!
//! Fixtures are spatial/decorative items on the floor plan. They never hold guests.

use serde::{Deserialize, Serialize};

/// Fixture kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureKind {
    Door,
    Window,
    Stage,
    DanceFloor,
    DjBooth,
    Pillar,
    TextLabel,
    SweetheartTable,
    HeadTable,
    Bar,
    Buffet,
    CakeTable,
    GiftTable,
    EscortCardTable,
}

impl FixtureKind {
    /// Default `(width, height)` for a freshly placed fixture
    pub fn default_size(&self) -> (f64, f64) {
        match self {
            Self::Door => (80.0, 20.0),
            Self::Window => (100.0, 10.0),
            Self::Stage => (300.0, 150.0),
            Self::DanceFloor => (240.0, 240.0),
            Self::DjBooth => (120.0, 80.0),
            Self::Pillar => (40.0, 40.0),
            Self::TextLabel => (120.0, 30.0),
            Self::SweetheartTable => (120.0, 60.0),
            Self::HeadTable => (300.0, 80.0),
            Self::Bar => (200.0, 60.0),
            Self::Buffet => (240.0, 60.0),
            Self::CakeTable => (80.0, 80.0),
            Self::GiftTable => (120.0, 60.0),
            Self::EscortCardTable => (160.0, 60.0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Door => "Door",
            Self::Window => "Window",
            Self::Stage => "Stage",
            Self::DanceFloor => "Dance floor",
            Self::DjBooth => "DJ booth",
            Self::Pillar => "Pillar",
            Self::TextLabel => "Label",
            Self::SweetheartTable => "Sweetheart table",
            Self::HeadTable => "Head table",
            Self::Bar => "Bar",
            Self::Buffet => "Buffet",
            Self::CakeTable => "Cake table",
            Self::GiftTable => "Gift table",
            Self::EscortCardTable => "Escort card table",
        }
    }
}

/// Fixture entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: i64,
    pub kind: FixtureKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}
