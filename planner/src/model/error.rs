use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Seating model errors
///
/// None of these are fatal. `CapacityExceeded` and the validation variants
/// are refusals the UI surfaces to the user; the not-found variants mean the
/// caller acted on a stale reference and are treated as no-ops.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeatingError {
    #[error("Table {table_number} is full ({capacity} seats)")]
    CapacityExceeded { table_number: u32, capacity: u32 },

    #[error("Guest not found: {0}")]
    GuestNotFound(i64),

    #[error("Table not found: {0}")]
    TableNotFound(i64),

    #[error("Table number not found: {0}")]
    TableNumberNotFound(u32),

    #[error("Fixture not found: {0}")]
    FixtureNotFound(i64),

    #[error("Group not found: {0}")]
    GroupNotFound(i64),

    #[error("Invalid partner reference: {0}")]
    InvalidPartner(i64),

    #[error("Invalid keep-apart reference: {0}")]
    InvalidKeepApart(i64),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid room settings: {0}")]
    InvalidRoomSettings(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl SeatingError {
    /// Stale-reference errors; callers treat these as no-ops
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SeatingError::GuestNotFound(_)
                | SeatingError::TableNotFound(_)
                | SeatingError::TableNumberNotFound(_)
                | SeatingError::FixtureNotFound(_)
                | SeatingError::GroupNotFound(_)
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SeatingError::CapacityExceeded { .. } => ErrorCode::TableCapacityExceeded,
            SeatingError::GuestNotFound(_) => ErrorCode::GuestNotFound,
            SeatingError::TableNotFound(_) | SeatingError::TableNumberNotFound(_) => {
                ErrorCode::TableNotFound
            }
            SeatingError::FixtureNotFound(_) => ErrorCode::FixtureNotFound,
            SeatingError::GroupNotFound(_) => ErrorCode::GroupNotFound,
            SeatingError::InvalidPartner(_) => ErrorCode::PartnerInvalid,
            SeatingError::InvalidKeepApart(_) => ErrorCode::KeepApartInvalid,
            SeatingError::InvalidGeometry(_) => ErrorCode::InvalidGeometry,
            SeatingError::InvalidRoomSettings(_) => ErrorCode::RoomSettingsInvalid,
            SeatingError::Validation(_) => ErrorCode::ValidationFailed,
        }
    }
}

impl From<validator::ValidationErrors> for SeatingError {
    fn from(err: validator::ValidationErrors) -> Self {
        SeatingError::Validation(err.to_string())
    }
}

impl From<SeatingError> for AppError {
    fn from(err: SeatingError) -> Self {
        let code = err.code();
        let message = err.to_string();
        let app = AppError::with_message(code, message);
        match err {
            SeatingError::CapacityExceeded {
                table_number,
                capacity,
            } => app
                .with_detail("table_number", table_number)
                .with_detail("capacity", capacity),
            SeatingError::GuestNotFound(id)
            | SeatingError::TableNotFound(id)
            | SeatingError::FixtureNotFound(id)
            | SeatingError::GroupNotFound(id)
            | SeatingError::InvalidPartner(id)
            | SeatingError::InvalidKeepApart(id) => app.with_detail("id", id),
            SeatingError::TableNumberNotFound(number) => app.with_detail("table_number", number),
            SeatingError::InvalidGeometry(_)
            | SeatingError::InvalidRoomSettings(_)
            | SeatingError::Validation(_) => app,
        }
    }
}

pub type SeatingResult<T> = Result<T, SeatingError>;
