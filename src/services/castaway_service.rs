//! Castaway service

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::CastawayRepository,
    error::{AppError, AppResult},
    handlers::castaways::{CastawayResponse, CreateCastawayRequest},
};

/// Castaway service for business logic
pub struct CastawayService;

impl CastawayService {
    /// Castaways of a season, ordered by name
    pub async fn list_castaways(pool: &PgPool, season: i32) -> AppResult<Vec<CastawayResponse>> {
        let castaways = CastawayRepository::list_by_season(pool, season).await?;
        Ok(castaways.into_iter().map(Into::into).collect())
    }

    /// Add a castaway to a season
    pub async fn create_castaway(
        pool: &PgPool,
        payload: CreateCastawayRequest,
    ) -> AppResult<CastawayResponse> {
        let castaway = CastawayRepository::create(
            pool,
            payload.season,
            payload.name.trim(),
            payload.tribe.as_deref(),
        )
        .await?;

        tracing::info!(castaway_id = %castaway.id, season = castaway.season, name = %castaway.name, "Castaway created");
        Ok(castaway.into())
    }

    /// Vote a castaway out. Rosters keep the castaway; it just leaves the undrafted pool.
    pub async fn eliminate_castaway(pool: &PgPool, id: &Uuid) -> AppResult<CastawayResponse> {
        let castaway = CastawayRepository::eliminate(pool, id, Utc::now())
            .await?
            .ok_or_else(|| AppError::NotFound("Castaway not found".to_string()))?;

        tracing::info!(castaway_id = %castaway.id, name = %castaway.name, "Castaway eliminated");
        Ok(castaway.into())
    }
}
