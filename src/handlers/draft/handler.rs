//! Draft handler implementations

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    state::AppState,
};

use super::{
    request::{SetDraftOrderRequest, StartDraftRequest, SubmitPickRequest},
    response::{DraftOrderResponse, DraftStartedResponse, DraftStateResponse, PickOutcome},
};

/// Draft board for the caller
pub async fn get_draft_state(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(league_id): Path<Uuid>,
) -> AppResult<Json<DraftStateResponse>> {
    let board = state
        .draft_service()
        .draft_state(&league_id, &auth_user.id, &auth_user.role)
        .await?;
    Ok(Json(board))
}

/// Resolved draft order
pub async fn get_draft_order(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(league_id): Path<Uuid>,
) -> AppResult<Json<DraftOrderResponse>> {
    let order = state
        .draft_service()
        .draft_order(&league_id, &auth_user.id, &auth_user.role)
        .await?;
    Ok(Json(order))
}

/// Submit the caller's pick
pub async fn submit_pick(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(league_id): Path<Uuid>,
    Json(payload): Json<SubmitPickRequest>,
) -> AppResult<Json<PickOutcome>> {
    let outcome = state
        .draft_service()
        .submit_pick(&league_id, &auth_user.id, &payload.castaway_id)
        .await?;
    Ok(Json(outcome))
}

/// Set or randomize the draft order (commissioner)
pub async fn set_draft_order(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(league_id): Path<Uuid>,
    Json(payload): Json<SetDraftOrderRequest>,
) -> AppResult<Json<DraftOrderResponse>> {
    let order = state
        .draft_service()
        .set_draft_order(&league_id, &auth_user.id, &auth_user.role, payload.into())
        .await?;
    Ok(Json(order))
}

/// Open the draft (commissioner)
pub async fn start_draft(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(league_id): Path<Uuid>,
    payload: Option<Json<StartDraftRequest>>,
) -> AppResult<Json<DraftStartedResponse>> {
    let deadline = payload.and_then(|Json(p)| p.deadline);
    let started = state
        .draft_service()
        .start_draft(&league_id, &auth_user.id, &auth_user.role, deadline)
        .await?;
    Ok(Json(started))
}
