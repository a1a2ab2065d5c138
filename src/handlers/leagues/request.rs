//! League request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_LEAGUE_NAME_LENGTH, MAX_PICKS_PER_MEMBER},
    utils::validate_not_blank,
};

/// Create league request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLeagueRequest {
    #[validate(
        length(min = 1, max = MAX_LEAGUE_NAME_LENGTH),
        custom(function = validate_not_blank)
    )]
    pub name: String,

    #[validate(range(min = 1))]
    pub season: i32,

    /// Castaways per member; the configured default when omitted
    #[validate(range(min = 1, max = MAX_PICKS_PER_MEMBER))]
    pub picks_per_member: Option<u32>,
}

/// Join league request
#[derive(Debug, Deserialize, Validate)]
pub struct JoinLeagueRequest {
    #[validate(length(min = 1, max = 32))]
    pub invite_code: String,
}
