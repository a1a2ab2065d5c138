//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod castaways;
pub mod draft;
pub mod health;
pub mod leagues;

use axum::{Router, middleware};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Create all API routes
pub fn routes(state: &AppState) -> Router<AppState> {
    let authenticated = || middleware::from_fn_with_state(state.clone(), auth_middleware);

    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes(state))
        .nest(
            "/leagues",
            leagues::routes()
                .merge(draft::routes(state))
                .route_layer(authenticated()),
        )
        .nest("/castaways", castaways::routes().route_layer(authenticated()))
        .nest("/admin", admin::routes().route_layer(authenticated()))
}
