//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod castaway;
pub mod league;
pub mod pick;
pub mod user;

pub use castaway::*;
pub use league::*;
pub use pick::*;
pub use user::*;
