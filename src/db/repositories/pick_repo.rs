//! Draft pick repository

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{draft::PlannedPick, error::AppResult, models::DraftPick};

/// Repository for draft pick database operations
pub struct PickRepository;

impl PickRepository {
    /// Insert one pick. A taken pick number or castaway surfaces as
    /// `AppError::AlreadyExists` through the unique constraints.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        league_id: &Uuid,
        pick: &PlannedPick,
    ) -> AppResult<DraftPick> {
        let pick = sqlx::query_as::<_, DraftPick>(
            r#"
            INSERT INTO draft_picks (league_id, user_id, castaway_id, round, pick_number, acquired_via)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(league_id)
        .bind(pick.user_id)
        .bind(pick.castaway_id)
        .bind(pick.round as i32)
        .bind(pick.pick_number as i32)
        .bind(pick.acquired_via.as_str())
        .fetch_one(executor)
        .await?;

        Ok(pick)
    }

    /// All picks of a league in pick order
    pub async fn list_for_league<'e>(
        executor: impl PgExecutor<'e>,
        league_id: &Uuid,
    ) -> AppResult<Vec<DraftPick>> {
        let picks = sqlx::query_as::<_, DraftPick>(
            r#"SELECT * FROM draft_picks WHERE league_id = $1 ORDER BY pick_number"#,
        )
        .bind(league_id)
        .fetch_all(executor)
        .await?;

        Ok(picks)
    }

    /// Number of picks made in a league
    pub async fn count_for_league<'e>(executor: impl PgExecutor<'e>, league_id: &Uuid) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM draft_picks WHERE league_id = $1"#)
                .bind(league_id)
                .fetch_one(executor)
                .await?;

        Ok(count)
    }
}
