//! Auto-draft planning for drafts past their deadline

use uuid::Uuid;

use super::{DraftSnapshot, PlannedPick};
use crate::models::AcquiredVia;

/// Picks the sweep will insert for one league
#[derive(Debug, Clone, Default)]
pub struct AutoDraftPlan {
    pub picks: Vec<PlannedPick>,
    /// The undrafted pool ran out before every slot was filled
    pub short_pool: bool,
    /// Slots left empty when the pool ran short
    pub unfilled_slots: usize,
}

/// Fill every remaining slot from the available pool in its documented order
/// (name, then id), following the snake turn sequence.
pub fn plan_auto_draft(snapshot: &DraftSnapshot) -> AutoDraftPlan {
    let total = snapshot.total_picks();
    let mut pool = snapshot.available_castaways().into_iter();
    let mut picks = Vec::new();
    let mut count = snapshot.pick_count();

    while count < total {
        let Some((turn, user_id)) = snapshot.turn_at(count) else {
            break;
        };
        let Some(castaway) = pool.next() else {
            break;
        };

        count += 1;
        picks.push(PlannedPick {
            user_id,
            castaway_id: castaway.id,
            round: turn.round,
            pick_number: turn.pick_number(),
            acquired_via: AcquiredVia::AutoDraft,
            completes_draft: count >= total,
        });
    }

    let unfilled_slots = total.saturating_sub(count);
    AutoDraftPlan {
        picks,
        short_pool: unfilled_slots > 0,
        unfilled_slots,
    }
}

/// Members who receive at least one auto-drafted castaway
pub fn affected_members(plan: &AutoDraftPlan) -> Vec<Uuid> {
    let mut users: Vec<Uuid> = Vec::new();
    for pick in &plan.picks {
        if !users.contains(&pick.user_id) {
            users.push(pick.user_id);
        }
    }
    users
}
