//! League handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// League routes (authenticated)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_leagues).post(handler::create_league))
        .route("/join", post(handler::join_league))
        .route("/{id}", get(handler::get_league))
}
