//! Input validation for user and habit names.
//!
//! Pure functions: callers render the error messages however they like.

use crate::error::ValidationError;

const MAX_USERNAME_LEN: usize = 30;
const MAX_HABIT_NAME_LEN: usize = 50;

/// Validate a username: non-empty, at most 30 characters, alphanumeric.
pub fn validate_username(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::InvalidName {
            field: "username",
            message: "cannot be empty".to_string(),
        });
    }
    if name.chars().count() > MAX_USERNAME_LEN {
        return Err(ValidationError::InvalidName {
            field: "username",
            message: format!("too long, limit is {MAX_USERNAME_LEN} characters"),
        });
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidName {
            field: "username",
            message: "only letters and numbers are allowed".to_string(),
        });
    }
    Ok(())
}

/// Validate a habit name: non-empty, at most 50 characters, limited to
/// letters, digits, spaces, and dashes.
pub fn validate_habit_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::InvalidName {
            field: "habit name",
            message: "cannot be empty".to_string(),
        });
    }
    if name.chars().count() > MAX_HABIT_NAME_LEN {
        return Err(ValidationError::InvalidName {
            field: "habit name",
            message: format!("too long, limit is {MAX_HABIT_NAME_LEN} characters"),
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-')
    {
        return Err(ValidationError::InvalidName {
            field: "habit name",
            message: "only letters, numbers, spaces, and dashes are allowed".to_string(),
        });
    }
    Ok(())
}
