//! Input validation helpers
//!
//! Centralized text length constants and validation functions.

use shared::error::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: restaurant, category, subcategory, dish
pub const MAX_NAME_LEN: usize = 200;

/// Dish descriptions
pub const MAX_NOTE_LEN: usize = 2000;

/// Serving size labels
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Logo paths
pub const MAX_URL_LEN: usize = 2048;

/// Search terms
pub const MAX_QUERY_LEN: usize = 200;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(format!("{field} is required")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
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
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Unwrap a required text field, rejecting absent or blank values.
pub fn require_text(value: Option<String>, field: &str, max_len: usize) -> Result<String, AppError> {
    let value = value.ok_or_else(|| AppError::required(format!("{field} is required")))?;
    validate_required_text(&value, field, max_len)?;
    Ok(value)
}
