//! Business logic services

pub mod auth_service;
pub mod castaway_service;
pub mod draft_service;
pub mod league_service;

pub use auth_service::AuthService;
pub use castaway_service::CastawayService;
pub use draft_service::{DraftService, FinalizeSummary};
pub use league_service::LeagueService;
