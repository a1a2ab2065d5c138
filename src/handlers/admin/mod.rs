//! Admin handlers

mod handler;

pub use handler::*;

use axum::{Router, routing::post};

use crate::state::AppState;

/// Admin routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/draft/finalize-all", post(handler::finalize_all_drafts))
        .route("/castaways", post(handler::create_castaway))
        .route("/castaways/{id}/eliminate", post(handler::eliminate_castaway))
}
