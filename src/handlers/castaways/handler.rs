//! Castaway handler implementations

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{error::AppResult, services::CastawayService, state::AppState};

use super::{request::ListCastawaysQuery, response::CastawaysListResponse};

/// List a season's castaways
pub async fn list_castaways(
    State(state): State<AppState>,
    Query(query): Query<ListCastawaysQuery>,
) -> AppResult<Json<CastawaysListResponse>> {
    let castaways = CastawayService::list_castaways(state.db(), query.season).await?;

    Ok(Json(CastawaysListResponse {
        total: castaways.len(),
        castaways,
    }))
}
