//! League handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::LeagueService,
    state::AppState,
};

use super::{
    request::{CreateLeagueRequest, JoinLeagueRequest},
    response::{LeagueDetailResponse, LeagueResponse, LeaguesListResponse},
};

/// List the caller's leagues
pub async fn list_leagues(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<LeaguesListResponse>> {
    let leagues = LeagueService::list_leagues(state.db(), &auth_user.id).await?;

    Ok(Json(LeaguesListResponse {
        total: leagues.len(),
        leagues,
    }))
}

/// Create a league with the caller as commissioner
pub async fn create_league(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateLeagueRequest>,
) -> AppResult<(StatusCode, Json<LeagueResponse>)> {
    payload.validate()?;

    let league =
        LeagueService::create_league(state.db(), &auth_user.id, &state.config().draft, payload)
            .await?;

    Ok((StatusCode::CREATED, Json(league)))
}

/// Join a league by invite code
pub async fn join_league(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<JoinLeagueRequest>,
) -> AppResult<Json<LeagueResponse>> {
    payload.validate()?;

    let league = LeagueService::join_league(state.db(), &auth_user.id, &payload.invite_code).await?;
    Ok(Json(league))
}

/// League detail with members
pub async fn get_league(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<LeagueDetailResponse>> {
    let league = LeagueService::get_league(state.db(), &id, &auth_user.id, &auth_user.role).await?;
    Ok(Json(league))
}
