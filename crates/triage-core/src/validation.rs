//! Input validation for task descriptions.

use crate::errors::CoreError;

/// Message shown when a description is empty.
pub const EMPTY_DESCRIPTION: &str = "Please enter a task description";

/// Trim `input` and reject it if nothing is left.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] when the description is empty or
/// whitespace only.
pub fn validate_description(input: &str) -> Result<&str, CoreError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(EMPTY_DESCRIPTION.to_string()));
    }
    Ok(trimmed)
}
