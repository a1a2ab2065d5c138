//! Input validation utilities

use validator::ValidationError;

use crate::constants::{MAX_USERNAME_LENGTH, MIN_USERNAME_LENGTH};

/// Validate username format
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let len = username.chars().count() as u64;
    if len < MIN_USERNAME_LENGTH {
        return Err("Username must be at least 3 characters");
    }
    if len > MAX_USERNAME_LENGTH {
        return Err("Username must be at most 32 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err("Username can only contain letters, numbers, underscores, and hyphens");
    }
    if !username.chars().next().is_some_and(|c| c.is_alphabetic()) {
        return Err("Username must start with a letter");
    }
    Ok(())
}

/// Names must keep at least one character once trimmed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Canonical form of a user-typed invite code
pub fn normalize_invite_code(code: &str) -> String {
    code.trim().to_uppercase()
}
