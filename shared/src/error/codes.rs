//! Unified error codes for the seating planner
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Guest errors
//! - 2xxx: Table errors
//! - 3xxx: Layout errors (fixtures, room settings, geometry)
//! - 4xxx: Group errors
//! - 5xxx: Import errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the UI layer can match
/// on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Guest ====================
    /// Guest not found
    GuestNotFound = 1001,
    /// Guest name is empty
    GuestNameRequired = 1002,
    /// Partner reference is invalid (self or unknown guest)
    PartnerInvalid = 1003,
    /// Keep-apart reference is invalid (self or unknown guest)
    KeepApartInvalid = 1004,

    // ==================== 2xxx: Table ====================
    /// Table not found
    TableNotFound = 2001,
    /// Table is at capacity
    TableCapacityExceeded = 2002,
    /// Table capacity must be a positive integer
    TableCapacityInvalid = 2003,

    // ==================== 3xxx: Layout ====================
    /// Fixture not found
    FixtureNotFound = 3001,
    /// Width/height/position invalid
    InvalidGeometry = 3002,
    /// Room settings rejected
    RoomSettingsInvalid = 3003,

    // ==================== 4xxx: Group ====================
    /// Group not found
    GroupNotFound = 4001,
    /// Group name is empty
    GroupNameRequired = 4002,

    // ==================== 5xxx: Import ====================
    /// Import line could not be parsed
    ImportLineInvalid = 5001,
    /// `@<table-number>` shorthand is malformed
    TableShorthandInvalid = 5002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Snapshot store error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,

    // ==================== 94xx: Storage ====================
    /// Storage full (disk space insufficient)
    StorageFull = 9401,
    /// Storage corrupted (data file damaged)
    StorageCorrupted = 9403,
    /// System busy (IO error, retry later)
    SystemBusy = 9404,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field missing",
            ErrorCode::ValueOutOfRange => "Value out of range",

            // Guest
            ErrorCode::GuestNotFound => "Guest not found",
            ErrorCode::GuestNameRequired => "Guest name must not be empty",
            ErrorCode::PartnerInvalid => "Partner reference is invalid",
            ErrorCode::KeepApartInvalid => "Keep-apart reference is invalid",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableCapacityExceeded => "Table is at capacity",
            ErrorCode::TableCapacityInvalid => "Table capacity must be positive",

            // Layout
            ErrorCode::FixtureNotFound => "Fixture not found",
            ErrorCode::InvalidGeometry => "Invalid position or size",
            ErrorCode::RoomSettingsInvalid => "Room settings are invalid",

            // Group
            ErrorCode::GroupNotFound => "Group not found",
            ErrorCode::GroupNameRequired => "Group name must not be empty",

            // Import
            ErrorCode::ImportLineInvalid => "Import line is invalid",
            ErrorCode::TableShorthandInvalid => "Table shorthand is invalid",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::DatabaseError => "Snapshot store error",
            ErrorCode::ConfigError => "Configuration error",

            // Storage
            ErrorCode::StorageFull => "Storage full (disk space insufficient)",
            ErrorCode::StorageCorrupted => "Storage corrupted (data file damaged)",
            ErrorCode::SystemBusy => "System busy, please retry later",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Guest
            1001 => Ok(ErrorCode::GuestNotFound),
            1002 => Ok(ErrorCode::GuestNameRequired),
            1003 => Ok(ErrorCode::PartnerInvalid),
            1004 => Ok(ErrorCode::KeepApartInvalid),

            // Table
            2001 => Ok(ErrorCode::TableNotFound),
            2002 => Ok(ErrorCode::TableCapacityExceeded),
            2003 => Ok(ErrorCode::TableCapacityInvalid),

            // Layout
            3001 => Ok(ErrorCode::FixtureNotFound),
            3002 => Ok(ErrorCode::InvalidGeometry),
            3003 => Ok(ErrorCode::RoomSettingsInvalid),

            // Group
            4001 => Ok(ErrorCode::GroupNotFound),
            4002 => Ok(ErrorCode::GroupNameRequired),

            // Import
            5001 => Ok(ErrorCode::ImportLineInvalid),
            5002 => Ok(ErrorCode::TableShorthandInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            // Storage
            9401 => Ok(ErrorCode::StorageFull),
            9403 => Ok(ErrorCode::StorageCorrupted),
            9404 => Ok(ErrorCode::SystemBusy),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
