//! Draft handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{middleware::rate_limit::pick_rate_limit_middleware, state::AppState};

/// Draft routes, nested under a league (authenticated)
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/{id}/draft/state", get(handler::get_draft_state))
        .route("/{id}/draft/order", get(handler::get_draft_order))
        .route(
            "/{id}/draft/pick",
            post(handler::submit_pick).route_layer(middleware::from_fn_with_state(
                state.clone(),
                pick_rate_limit_middleware,
            )),
        )
        .route("/{id}/draft/set-order", post(handler::set_draft_order))
        .route("/{id}/draft/start", post(handler::start_draft))
}
