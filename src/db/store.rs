//! Persistence seam for the draft engine
//!
//! Every mutating call re-checks the league under a per-league lock and
//! reports [`Commit::Stale`] instead of writing when the league no longer
//! matches what the caller planned against.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    draft::{DraftSnapshot, PlannedPick},
    error::AppResult,
    models::{DraftPick, League},
};

/// Outcome of a guarded write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit<T> {
    Applied(T),
    /// The league changed since the snapshot; reload and re-validate
    Stale,
}

impl<T> Commit<T> {
    pub fn is_stale(&self) -> bool {
        matches!(self, Commit::Stale)
    }
}

/// Storage operations used by the draft service
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// League, members, picks and the season's castaways, or `None` for an unknown league
    async fn snapshot(&self, league_id: Uuid) -> AppResult<Option<DraftSnapshot>>;

    /// Persist a draft order and member positions.
    ///
    /// Stale unless the league is still pending and `order` still covers
    /// exactly the current members.
    async fn save_order(&self, league_id: Uuid, order: &[Uuid]) -> AppResult<Commit<()>>;

    /// Move a pending league to in progress.
    ///
    /// Stale unless the league is pending and its stored order equals
    /// `expected_order`.
    async fn start_draft(
        &self,
        league_id: Uuid,
        expected_order: &[Uuid],
        deadline: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<Commit<League>>;

    /// Insert `picks` in order and optionally close the draft, atomically.
    ///
    /// Stale unless the league is in progress with exactly
    /// `expected_pick_count` picks, or when an insert hits a uniqueness
    /// constraint (pick number or castaway already taken).
    async fn commit_picks(
        &self,
        league_id: Uuid,
        expected_pick_count: usize,
        picks: &[PlannedPick],
        complete: bool,
        now: DateTime<Utc>,
    ) -> AppResult<Commit<Vec<DraftPick>>>;

    /// In-progress leagues whose deadline is at or before `now`
    async fn expired_drafts(&self, now: DateTime<Utc>) -> AppResult<Vec<Uuid>>;
}
