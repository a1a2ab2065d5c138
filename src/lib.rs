//! Castaway Draft - Survivor fantasy league draft service
//!
//! This library provides the backend for Survivor fantasy leagues: members
//! join a league, the commissioner fixes a draft order, and members take
//! turns drafting castaways in a snake draft until every roster is full.
//! Drafts left unfinished at their deadline are completed automatically.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Draft**: The pure draft engine (turn order, pick validation, auto-draft)
//! - **Repositories / DraftStore**: Database access
//! - **Notifications**: Draft events and their delivery worker
//! - **Scheduler**: Cron job that runs the finalize sweep

pub mod config;
pub mod constants;
pub mod db;
pub mod draft;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod notifications;
pub mod scheduler;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

use axum::{Router, middleware as axum_middleware};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::{
    constants::{API_BASE_PATH, MAX_REQUEST_BODY_BYTES},
    middleware::{logging_middleware, rate_limit_middleware},
};

/// Create the application router with all routes and middleware.
///
/// The body limit sits innermost so the request middlewares still see a
/// plain `Request<Body>`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest(API_BASE_PATH, handlers::routes(&state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(CompressionLayer::new())
                .layer(axum_middleware::from_fn(logging_middleware))
                .layer(axum_middleware::from_fn_with_state(
                    state.clone(),
                    rate_limit_middleware,
                ))
                .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES)),
        )
        .with_state(state)
}
