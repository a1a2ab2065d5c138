//! Castaway repository

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::{constants::castaway_status, error::AppResult, models::Castaway};

/// Repository for castaway database operations
pub struct CastawayRepository;

impl CastawayRepository {
    /// Create a new castaway
    pub async fn create(
        pool: &PgPool,
        season: i32,
        name: &str,
        tribe: Option<&str>,
    ) -> AppResult<Castaway> {
        let castaway = sqlx::query_as::<_, Castaway>(
            r#"
            INSERT INTO castaways (season, name, tribe)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(season)
        .bind(name)
        .bind(tribe)
        .fetch_one(pool)
        .await?;

        Ok(castaway)
    }

    /// All castaways of a season, eliminated ones included
    pub async fn list_by_season<'e>(
        executor: impl PgExecutor<'e>,
        season: i32,
    ) -> AppResult<Vec<Castaway>> {
        let castaways = sqlx::query_as::<_, Castaway>(
            r#"SELECT * FROM castaways WHERE season = $1 ORDER BY LOWER(name), id"#,
        )
        .bind(season)
        .fetch_all(executor)
        .await?;

        Ok(castaways)
    }

    /// Whether a castaway can still be drafted. Takes a share lock so an
    /// elimination waits for the surrounding pick transaction.
    pub async fn is_draftable<'e>(executor: impl PgExecutor<'e>, id: &Uuid) -> AppResult<bool> {
        let status: Option<String> =
            sqlx::query_scalar(r#"SELECT status FROM castaways WHERE id = $1 FOR SHARE"#)
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(status.as_deref() == Some(castaway_status::ACTIVE))
    }

    /// Mark a castaway eliminated. Existing picks are untouched.
    pub async fn eliminate(pool: &PgPool, id: &Uuid, at: DateTime<Utc>) -> AppResult<Option<Castaway>> {
        let castaway = sqlx::query_as::<_, Castaway>(
            r#"
            UPDATE castaways
            SET status = $2, eliminated_at = COALESCE(eliminated_at, $3)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(castaway_status::ELIMINATED)
        .bind(at)
        .fetch_optional(pool)
        .await?;

        Ok(castaway)
    }
}
