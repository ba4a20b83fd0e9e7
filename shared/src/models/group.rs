//! Guest Group Model

use serde::{Deserialize, Serialize};

/// Guest group (family, college friends, coworkers, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    /// Display color, e.g. `#f4a261`
    pub color: String,
}

/// Create group payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCreate {
    pub name: String,
    pub color: Option<String>,
}

/// Color used when a group is created without one
pub const DEFAULT_GROUP_COLOR: &str = "#9ca3af";
