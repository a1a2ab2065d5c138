//! Admin handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::roles,
    error::{AppError, AppResult},
    handlers::castaways::{CastawayResponse, CreateCastawayRequest},
    middleware::auth::AuthenticatedUser,
    services::{CastawayService, FinalizeSummary},
    state::AppState,
};

/// Verify user is admin
fn require_admin(auth_user: &AuthenticatedUser) -> AppResult<()> {
    if auth_user.role != roles::ADMIN {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }
    Ok(())
}

/// Run the finalize sweep now
pub async fn finalize_all_drafts(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<FinalizeSummary>> {
    require_admin(&auth_user)?;

    tracing::info!(admin_id = %auth_user.id, "Manual finalize sweep requested");
    let summary = state.draft_service().finalize_expired_drafts().await?;

    Ok(Json(summary))
}

/// Add a castaway to a season
pub async fn create_castaway(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateCastawayRequest>,
) -> AppResult<(StatusCode, Json<CastawayResponse>)> {
    require_admin(&auth_user)?;
    payload.validate()?;

    let castaway = CastawayService::create_castaway(state.db(), payload).await?;
    Ok((StatusCode::CREATED, Json(castaway)))
}

/// Mark a castaway eliminated
pub async fn eliminate_castaway(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CastawayResponse>> {
    require_admin(&auth_user)?;

    let castaway = CastawayService::eliminate_castaway(state.db(), &id).await?;
    Ok(Json(castaway))
}
