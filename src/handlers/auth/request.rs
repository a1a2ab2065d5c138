//! Authentication request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{
        MAX_DISPLAY_NAME_LENGTH, MAX_EMAIL_LENGTH, MAX_PASSWORD_LENGTH, MAX_USERNAME_LENGTH,
        MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH,
    },
    utils::validate_not_blank,
};

/// Player sign-up
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = MIN_USERNAME_LENGTH, max = MAX_USERNAME_LENGTH))]
    pub username: String,

    #[validate(email, length(max = MAX_EMAIL_LENGTH))]
    pub email: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, max = MAX_PASSWORD_LENGTH))]
    pub password: String,

    /// Shown on rosters instead of the username
    #[validate(
        length(min = 1, max = MAX_DISPLAY_NAME_LENGTH),
        custom(function = validate_not_blank)
    )]
    pub display_name: Option<String>,
}

/// Login with a username or an email address
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = MAX_EMAIL_LENGTH))]
    pub identifier: String,

    #[validate(length(min = 1, max = MAX_PASSWORD_LENGTH))]
    pub password: String,
}
