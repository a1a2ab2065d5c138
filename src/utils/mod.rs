//! Utility functions

pub mod crypto;
pub mod validation;

pub use crypto::generate_invite_code;
pub use validation::{normalize_invite_code, validate_not_blank, validate_username};
