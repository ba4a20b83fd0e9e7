//! Data models
//!
//! Shared between the planner core and the UI layer (via snapshots).
//! All IDs are `i64` snowflakes; table numbers are `u32` display numbers.

pub mod dining_table;
pub mod fixture;
pub mod group;
pub mod guest;
pub mod room;

// Re-exports
pub use dining_table::*;
pub use fixture::*;
pub use group::*;
pub use guest::*;
pub use room::*;
