//! Snake draft engine
//!
//! Everything in this module is pure: it works on a [`DraftSnapshot`] read
//! from the store and returns plans for the store to commit. The service
//! layer owns loading, committing and retrying.

pub mod auto;
pub mod order;
pub mod pick;
pub mod turn;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Castaway, DraftPick, DraftStatus, League, LeagueMember};

pub use auto::{AutoDraftPlan, plan_auto_draft};
pub use order::{OrderRequest, resolve_order};
pub use pick::{NextPick, PlannedPick, plan_pick};
pub use turn::{Turn, compute_turn, total_picks, try_compute_turn};

/// Everything the engine needs to know about one league's draft
#[derive(Debug, Clone)]
pub struct DraftSnapshot {
    pub league: League,
    pub members: Vec<LeagueMember>,
    /// Ordered by pick number
    pub picks: Vec<DraftPick>,
    /// Every castaway of the league's season, eliminated ones included
    pub castaways: Vec<Castaway>,
}

impl DraftSnapshot {
    pub fn status(&self) -> DraftStatus {
        self.league.status()
    }

    pub fn pick_count(&self) -> usize {
        self.picks.len()
    }

    /// Members taking part in the draft, as fixed by the draft order
    pub fn member_count(&self) -> usize {
        self.league.draft_order.len()
    }

    pub fn quota(&self) -> usize {
        self.league.quota()
    }

    pub fn total_picks(&self) -> usize {
        total_picks(self.member_count(), self.quota())
    }

    pub fn is_full(&self) -> bool {
        self.pick_count() >= self.total_picks()
    }

    /// The turn at `pick_index` and the member who owns it
    pub fn turn_at(&self, pick_index: usize) -> Option<(Turn, Uuid)> {
        let turn = try_compute_turn(pick_index, self.member_count())?;
        let user_id = *self.league.draft_order.get(turn.picker_index)?;
        Some((turn, user_id))
    }

    /// The turn that the next pick belongs to, if the draft still has picks left
    pub fn current_turn(&self) -> Option<(Turn, Uuid)> {
        if self.is_full() {
            return None;
        }
        self.turn_at(self.pick_count())
    }

    pub fn member(&self, user_id: &Uuid) -> Option<&LeagueMember> {
        self.members.iter().find(|m| m.user_id == *user_id)
    }

    pub fn is_member(&self, user_id: &Uuid) -> bool {
        self.member(user_id).is_some()
    }

    pub fn castaway(&self, castaway_id: &Uuid) -> Option<&Castaway> {
        self.castaways.iter().find(|c| c.id == *castaway_id)
    }

    pub fn is_drafted(&self, castaway_id: &Uuid) -> bool {
        self.picks.iter().any(|p| p.castaway_id == *castaway_id)
    }

    pub fn picks_for(&self, user_id: &Uuid) -> Vec<&DraftPick> {
        self.picks.iter().filter(|p| p.user_id == *user_id).collect()
    }

    /// Active, undrafted castaways ordered by name (case-insensitive), then id
    pub fn available_castaways(&self) -> Vec<&Castaway> {
        let drafted: HashSet<Uuid> = self.picks.iter().map(|p| p.castaway_id).collect();
        let mut pool: Vec<&Castaway> = self
            .castaways
            .iter()
            .filter(|c| c.is_active() && !drafted.contains(&c.id))
            .collect();
        pool.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        pool
    }

    /// Whether the stored order covers exactly the current members
    pub fn order_matches_members(&self) -> bool {
        let members: Vec<Uuid> = self.members.iter().map(|m| m.user_id).collect();
        order::is_permutation(&self.league.draft_order, &members)
    }

    pub fn is_past_deadline(&self, now: DateTime<Utc>) -> bool {
        self.league.is_past_deadline(now)
    }
}
