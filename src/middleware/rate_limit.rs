//! Rate limiting middleware
//!
//! Fixed-window counters in Redis keyed by client IP and route bucket. When
//! Redis is unreachable requests are let through rather than rejected.

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;
use std::net::SocketAddr;

use crate::{constants::rate_limits, error::AppError, state::AppState};

/// General API rate limit, applied to every route
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path();
    let (bucket, limit, window) = limit_for_path(path);

    check_limit(&state, &addr, bucket, limit, window).await?;
    Ok(next.run(request).await)
}

/// Tighter limit on pick submission
pub async fn pick_rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    check_limit(
        &state,
        &addr,
        "draft_pick",
        rate_limits::PICK_MAX_REQUESTS,
        rate_limits::PICK_WINDOW_SECS,
    )
    .await?;
    Ok(next.run(request).await)
}

async fn check_limit(
    state: &AppState,
    addr: &SocketAddr,
    bucket: &str,
    limit: i64,
    window: i64,
) -> Result<(), AppError> {
    let key = format!("rate_limit:{}:{}", addr.ip(), bucket);
    let mut redis = state.redis();

    let count: i64 = match redis.incr(&key, 1).await {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!(error = %e, bucket, "Rate limit check skipped, Redis unavailable");
            return Ok(());
        }
    };

    if count == 1 {
        // Set expiry on first request of the window
        let _: Result<(), _> = redis.expire(&key, window).await;
    }

    if count > limit {
        tracing::debug!(ip = %addr.ip(), bucket, count, "Rate limit exceeded");
        return Err(AppError::TooManyRequests);
    }

    Ok(())
}

/// Bucket name, request limit and window for a path
fn limit_for_path(path: &str) -> (&'static str, i64, i64) {
    if path.starts_with("/api/v1/auth") {
        (
            "auth",
            rate_limits::AUTH_MAX_REQUESTS,
            rate_limits::AUTH_WINDOW_SECS,
        )
    } else {
        (
            "general",
            rate_limits::GENERAL_MAX_REQUESTS,
            rate_limits::GENERAL_WINDOW_SECS,
        )
    }
}
