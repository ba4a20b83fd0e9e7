//! Shared types for the seating planner
//!
//! Data model (guests, tables, fixtures, groups, room settings), the
//! persisted [`LayoutSnapshot`], and the unified error codes used by the
//! planner core and the UI layer.

pub mod error;
pub mod models;
pub mod snapshot;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
pub use snapshot::LayoutSnapshot;
