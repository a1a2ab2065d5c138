//! Castaway request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{constants::MAX_CASTAWAY_NAME_LENGTH, utils::validate_not_blank};

/// List castaways query parameters
#[derive(Debug, Deserialize)]
pub struct ListCastawaysQuery {
    pub season: i32,
}

/// Create castaway request (admin)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCastawayRequest {
    #[validate(range(min = 1))]
    pub season: i32,

    #[validate(
        length(min = 1, max = MAX_CASTAWAY_NAME_LENGTH),
        custom(function = validate_not_blank)
    )]
    pub name: String,

    #[validate(length(max = 50))]
    pub tribe: Option<String>,
}
