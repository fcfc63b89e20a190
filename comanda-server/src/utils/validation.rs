//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Names: server, tenant key, table label, product names
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, item comments
pub const MAX_NOTE_LEN: usize = 500;

/// Items accepted in a single add-items request
pub const MAX_ITEMS_PER_REQUEST: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")).with_detail("field", field));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Ana", "server", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "server", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "server", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "label", MAX_NAME_LEN).is_ok());
        assert!(validate_optional_text(&Some("Terraza".into()), "label", MAX_NAME_LEN).is_ok());
        let err = validate_optional_text(&Some("x".repeat(501)), "comments", MAX_NOTE_LEN)
            .unwrap_err();
        assert_eq!(err.details.unwrap().get("field").unwrap(), "comments");
    }

    #[test]
    fn test_limits_count_characters_not_bytes() {
        let label = "ñ".repeat(MAX_NAME_LEN);
        assert!(validate_required_text(&label, "label", MAX_NAME_LEN).is_ok());
        assert!(validate_optional_text(&Some(label), "label", MAX_NAME_LEN).is_ok());
        let too_long = "á".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&too_long, "label", MAX_NAME_LEN).is_err());
    }
}
