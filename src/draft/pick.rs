//! Pick validation and planning

use serde::Serialize;
use uuid::Uuid;

use super::DraftSnapshot;
use crate::{
    error::{AppError, AppResult},
    models::{AcquiredVia, DraftStatus},
};

/// A validated pick, ready to be committed against the snapshot it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPick {
    pub user_id: Uuid,
    pub castaway_id: Uuid,
    pub round: usize,
    pub pick_number: usize,
    pub acquired_via: AcquiredVia,
    /// This pick fills the last slot of the draft
    pub completes_draft: bool,
}

impl PlannedPick {
    /// Pick count the league must still have when this pick is committed
    pub fn expected_pick_count(&self) -> usize {
        self.pick_number - 1
    }
}

/// The turn after a committed pick, for client display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextPick {
    pub round: usize,
    pub pick_number: usize,
    pub user_id: Uuid,
}

/// Validate a manual pick. Checks run in a fixed order and the first failure wins:
/// draft phase, turn, castaway existence, duplicate, elimination, quota.
pub fn plan_pick(
    snapshot: &DraftSnapshot,
    user_id: Uuid,
    castaway_id: Uuid,
) -> AppResult<PlannedPick> {
    if snapshot.status() != DraftStatus::InProgress || snapshot.is_full() {
        return Err(AppError::InvalidState("draft not in progress".to_string()));
    }

    let (turn, picker) = snapshot.current_turn().ok_or_else(|| {
        AppError::InvalidState("draft order not set".to_string())
    })?;
    if picker != user_id {
        return Err(AppError::Forbidden("not your turn".to_string()));
    }

    let castaway = snapshot
        .castaway(&castaway_id)
        .ok_or_else(|| AppError::NotFound("Castaway not found".to_string()))?;

    if snapshot.is_drafted(&castaway_id) {
        return Err(AppError::Conflict("already drafted".to_string()));
    }

    if !castaway.is_active() {
        return Err(AppError::Conflict("castaway eliminated".to_string()));
    }

    if snapshot.picks_for(&user_id).len() >= snapshot.quota() {
        return Err(AppError::Conflict("quota reached".to_string()));
    }

    let new_count = snapshot.pick_count() + 1;
    Ok(PlannedPick {
        user_id,
        castaway_id,
        round: turn.round,
        pick_number: turn.pick_number(),
        acquired_via: AcquiredVia::Draft,
        completes_draft: new_count >= snapshot.total_picks(),
    })
}

/// The turn following `pick_count` committed picks, `None` once the draft is full
pub fn next_pick(snapshot: &DraftSnapshot, pick_count: usize) -> Option<NextPick> {
    if pick_count >= snapshot.total_picks() {
        return None;
    }
    snapshot.turn_at(pick_count).map(|(turn, user_id)| NextPick {
        round: turn.round,
        pick_number: turn.pick_number(),
        user_id,
    })
}
