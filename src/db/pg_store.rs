//! Postgres-backed draft store
//!
//! Guarded writes run in a transaction that holds `SELECT ... FOR UPDATE`
//! on the league row, so concurrent writers for one league queue up behind
//! each other and each re-checks what the previous one committed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    repositories::{CastawayRepository, LeagueRepository, PickRepository},
    store::{Commit, DraftStore},
};
use crate::{
    draft::{DraftSnapshot, PlannedPick, order},
    error::{AppError, AppResult},
    models::{DraftPick, DraftStatus, League},
};

/// [`DraftStore`] over the application's Postgres pool
#[derive(Clone)]
pub struct PgDraftStore {
    pool: PgPool,
}

impl PgDraftStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DraftStore for PgDraftStore {
    async fn snapshot(&self, league_id: Uuid) -> AppResult<Option<DraftSnapshot>> {
        let Some(league) = LeagueRepository::find_by_id(&self.pool, &league_id).await? else {
            return Ok(None);
        };

        let (members, picks, castaways) = tokio::try_join!(
            LeagueRepository::list_members(&self.pool, &league_id),
            PickRepository::list_for_league(&self.pool, &league_id),
            CastawayRepository::list_by_season(&self.pool, league.season),
        )?;

        Ok(Some(DraftSnapshot {
            league,
            members,
            picks,
            castaways,
        }))
    }

    async fn save_order(&self, league_id: Uuid, order: &[Uuid]) -> AppResult<Commit<()>> {
        let mut tx = self.pool.begin().await?;

        let Some(league) = LeagueRepository::lock_for_update(&mut tx, &league_id).await? else {
            return Ok(Commit::Stale);
        };
        if league.status() != DraftStatus::Pending {
            return Ok(Commit::Stale);
        }

        let members: Vec<Uuid> = LeagueRepository::list_members(&mut *tx, &league_id)
            .await?
            .into_iter()
            .map(|m| m.user_id)
            .collect();
        if !order::is_permutation(order, &members) {
            return Ok(Commit::Stale);
        }

        LeagueRepository::set_draft_order(&mut tx, &league_id, order).await?;
        LeagueRepository::set_positions(&mut tx, &league_id, &order::draft_positions(order))
            .await?;

        tx.commit().await?;
        Ok(Commit::Applied(()))
    }

    async fn start_draft(
        &self,
        league_id: Uuid,
        expected_order: &[Uuid],
        deadline: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<Commit<League>> {
        let mut tx = self.pool.begin().await?;

        let Some(league) = LeagueRepository::lock_for_update(&mut tx, &league_id).await? else {
            return Ok(Commit::Stale);
        };
        if league.status() != DraftStatus::Pending || league.draft_order != expected_order {
            return Ok(Commit::Stale);
        }

        let members: Vec<Uuid> = LeagueRepository::list_members(&mut *tx, &league_id)
            .await?
            .into_iter()
            .map(|m| m.user_id)
            .collect();
        if !order::is_permutation(&league.draft_order, &members) {
            return Ok(Commit::Stale);
        }

        let league = LeagueRepository::start_draft(&mut tx, &league_id, deadline, now).await?;

        tx.commit().await?;
        Ok(Commit::Applied(league))
    }

    async fn commit_picks(
        &self,
        league_id: Uuid,
        expected_pick_count: usize,
        picks: &[PlannedPick],
        complete: bool,
        now: DateTime<Utc>,
    ) -> AppResult<Commit<Vec<DraftPick>>> {
        let mut tx = self.pool.begin().await?;

        let Some(league) = LeagueRepository::lock_for_update(&mut tx, &league_id).await? else {
            return Ok(Commit::Stale);
        };
        if league.status() != DraftStatus::InProgress {
            return Ok(Commit::Stale);
        }

        let count = PickRepository::count_for_league(&mut *tx, &league_id).await?;
        if count != expected_pick_count as i64 {
            return Ok(Commit::Stale);
        }

        let mut inserted = Vec::with_capacity(picks.len());
        for pick in picks {
            // Eliminated since the snapshot was read
            if !CastawayRepository::is_draftable(&mut *tx, &pick.castaway_id).await? {
                return Ok(Commit::Stale);
            }
            match PickRepository::insert(&mut *tx, &league_id, pick).await {
                Ok(row) => inserted.push(row),
                // Dropping the transaction rolls back the picks inserted so far
                Err(AppError::AlreadyExists(_)) => return Ok(Commit::Stale),
                Err(e) => return Err(e),
            }
        }

        if complete {
            LeagueRepository::mark_completed(&mut tx, &league_id, now).await?;
        }

        tx.commit().await?;
        Ok(Commit::Applied(inserted))
    }

    async fn expired_drafts(&self, now: DateTime<Utc>) -> AppResult<Vec<Uuid>> {
        LeagueRepository::find_expired_drafts(&self.pool, now).await
    }
}
