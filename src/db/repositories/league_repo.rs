//! League and membership repository

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgExecutor, PgPool};
use uuid::Uuid;

use crate::{
    constants::draft_status,
    error::AppResult,
    models::{League, LeagueMember},
};

const MEMBER_COLUMNS: &str = r#"
    lm.league_id,
    lm.user_id,
    u.username,
    u.display_name,
    lm.draft_position,
    lm.joined_at
"#;

/// Repository for league database operations
pub struct LeagueRepository;

impl LeagueRepository {
    /// Create a league and enrol its commissioner as the first member
    pub async fn create(
        pool: &PgPool,
        name: &str,
        season: i32,
        commissioner_id: &Uuid,
        invite_code: &str,
        picks_per_member: i32,
    ) -> AppResult<League> {
        let mut tx = pool.begin().await?;

        let league = sqlx::query_as::<_, League>(
            r#"
            INSERT INTO leagues (name, season, commissioner_id, invite_code, picks_per_member)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(season)
        .bind(commissioner_id)
        .bind(invite_code)
        .bind(picks_per_member)
        .fetch_one(&mut *tx)
        .await?;

        Self::add_member(&mut *tx, &league.id, commissioner_id).await?;

        tx.commit().await?;
        Ok(league)
    }

    /// Find league by ID
    pub async fn find_by_id<'e>(executor: impl PgExecutor<'e>, id: &Uuid) -> AppResult<Option<League>> {
        let league = sqlx::query_as::<_, League>(r#"SELECT * FROM leagues WHERE id = $1"#)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(league)
    }

    /// Find league by invite code
    pub async fn find_by_invite_code(pool: &PgPool, code: &str) -> AppResult<Option<League>> {
        let league = sqlx::query_as::<_, League>(r#"SELECT * FROM leagues WHERE invite_code = $1"#)
            .bind(code)
            .fetch_optional(pool)
            .await?;

        Ok(league)
    }

    /// Leagues the user belongs to, newest first
    pub async fn list_for_user(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<League>> {
        let leagues = sqlx::query_as::<_, League>(
            r#"
            SELECT l.* FROM leagues l
            JOIN league_members lm ON lm.league_id = l.id
            WHERE lm.user_id = $1
            ORDER BY l.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(leagues)
    }

    /// Load a league row and hold its lock until the transaction ends
    pub async fn lock_for_update(conn: &mut PgConnection, id: &Uuid) -> AppResult<Option<League>> {
        let league =
            sqlx::query_as::<_, League>(r#"SELECT * FROM leagues WHERE id = $1 FOR UPDATE"#)
                .bind(id)
                .fetch_optional(conn)
                .await?;

        Ok(league)
    }

    /// Store the draft order array
    pub async fn set_draft_order(conn: &mut PgConnection, id: &Uuid, order: &[Uuid]) -> AppResult<()> {
        sqlx::query(
            r#"UPDATE leagues SET draft_order = $2, updated_at = NOW() WHERE id = $1"#,
        )
        .bind(id)
        .bind(order)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Transition a league to in progress
    pub async fn start_draft(
        conn: &mut PgConnection,
        id: &Uuid,
        deadline: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<League> {
        let league = sqlx::query_as::<_, League>(
            r#"
            UPDATE leagues
            SET draft_status = $2, draft_started_at = $3, draft_deadline = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(draft_status::IN_PROGRESS)
        .bind(now)
        .bind(deadline)
        .fetch_one(conn)
        .await?;

        Ok(league)
    }

    /// Close a draft and stamp its completion time
    pub async fn mark_completed(conn: &mut PgConnection, id: &Uuid, now: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE leagues
            SET draft_status = $2, draft_completed_at = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(draft_status::COMPLETED)
        .bind(now)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// In-progress leagues whose deadline has passed
    pub async fn find_expired_drafts(pool: &PgPool, now: DateTime<Utc>) -> AppResult<Vec<Uuid>> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT id FROM leagues
            WHERE draft_status = $1 AND draft_deadline IS NOT NULL AND draft_deadline <= $2
            ORDER BY draft_deadline
            "#,
        )
        .bind(draft_status::IN_PROGRESS)
        .bind(now)
        .fetch_all(pool)
        .await?;

        Ok(ids)
    }

    // ------------------------------------------------------------------------
    // Membership
    // ------------------------------------------------------------------------

    /// Add a member to a league
    pub async fn add_member<'e>(executor: impl PgExecutor<'e>, league_id: &Uuid, user_id: &Uuid) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO league_members (league_id, user_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Members with their profiles, in draft position order then join order
    pub async fn list_members<'e>(
        executor: impl PgExecutor<'e>,
        league_id: &Uuid,
    ) -> AppResult<Vec<LeagueMember>> {
        let query = format!(
            r#"
            SELECT {MEMBER_COLUMNS}
            FROM league_members lm
            JOIN users u ON u.id = lm.user_id
            WHERE lm.league_id = $1
            ORDER BY lm.draft_position NULLS LAST, lm.joined_at, lm.user_id
            "#
        );

        let members = sqlx::query_as::<_, LeagueMember>(&query)
            .bind(league_id)
            .fetch_all(executor)
            .await?;

        Ok(members)
    }

    /// Assign 1-based draft positions
    pub async fn set_positions(
        conn: &mut PgConnection,
        league_id: &Uuid,
        positions: &[(Uuid, i32)],
    ) -> AppResult<()> {
        // Clear first so a reorder never trips the (league_id, draft_position) constraint
        sqlx::query(r#"UPDATE league_members SET draft_position = NULL WHERE league_id = $1"#)
            .bind(league_id)
            .execute(&mut *conn)
            .await?;

        for (user_id, position) in positions {
            sqlx::query(
                r#"
                UPDATE league_members SET draft_position = $3
                WHERE league_id = $1 AND user_id = $2
                "#,
            )
            .bind(league_id)
            .bind(user_id)
            .bind(position)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }
}
