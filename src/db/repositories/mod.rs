//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod castaway_repo;
pub mod league_repo;
pub mod pick_repo;
pub mod user_repo;

pub use castaway_repo::CastawayRepository;
pub use league_repo::LeagueRepository;
pub use pick_repo::PickRepository;
pub use user_repo::{AccountClash, UserRepository};
