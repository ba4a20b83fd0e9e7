//! Unified error system for the seating planner
//!
//! - [`ErrorCode`]: Standardized numeric error codes
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Guest errors
//! - 2xxx: Table errors
//! - 3xxx: Layout errors
//! - 4xxx: Group errors
//! - 5xxx: Import errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::TableCapacityExceeded)
//!     .with_detail("table_number", 5);
//! assert_eq!(err.code.code(), 2002);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
