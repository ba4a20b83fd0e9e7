//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Guest errors
/// - 2xxx: Table errors
/// - 3xxx: Layout errors
/// - 4xxx: Group errors
/// - 5xxx: Import errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Guest errors (1xxx)
    Guest,
    /// Table errors (2xxx)
    Table,
    /// Layout errors (3xxx)
    Layout,
    /// Group errors (4xxx)
    Group,
    /// Import errors (5xxx)
    Import,
    /// System errors (6xxx-9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Guest,
            2000..3000 => Self::Table,
            3000..4000 => Self::Layout,
            4000..5000 => Self::Group,
            5000..6000 => Self::Import,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Guest => "guest",
            Self::Table => "table",
            Self::Layout => "layout",
            Self::Group => "group",
            Self::Import => "import",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1002), ErrorCategory::Guest);
        assert_eq!(ErrorCategory::from_code(2002), ErrorCategory::Table);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Layout);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Group);
        assert_eq!(ErrorCategory::from_code(5002), ErrorCategory::Import);
        assert_eq!(ErrorCategory::from_code(9404), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(
            ErrorCode::TableCapacityExceeded.category(),
            ErrorCategory::Table
        );
        assert_eq!(ErrorCode::GuestNotFound.category().name(), "guest");
    }
}
