//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen based on:
//! - Place cards and escort cards print a name on one or two lines
//! - Reasonable UX limits for names, notes and tags

use crate::model::{SeatingError, SeatingResult};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: guest, table, group, fixture label
pub const MAX_NAME_LEN: usize = 200;

/// Notes on guests and tables
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: tags, color codes
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> SeatingResult<()> {
    if value.trim().is_empty() {
        return Err(SeatingError::Validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(SeatingError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> SeatingResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(SeatingError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Alice", "guest name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("  ", "guest name", MAX_NAME_LEN).is_err());
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "guest name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "notes", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some(String::new()), "notes", MAX_NOTE_LEN).is_ok());
        let long = Some("x".repeat(MAX_NOTE_LEN + 1));
        assert!(validate_optional_text(&long, "notes", MAX_NOTE_LEN).is_err());
    }
}
