//! Castaway handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Castaway routes (authenticated)
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(handler::list_castaways))
}
