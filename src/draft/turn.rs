//! Snake draft turn arithmetic
//!
//! Round 1 runs forward through the draft order, round 2 runs backward,
//! and the direction keeps alternating from there.

use serde::Serialize;

/// Whose turn a given pick index belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Turn {
    /// 1-based round
    pub round: usize,
    /// Index into the draft order, in `[0, member_count)`
    pub picker_index: usize,
    /// 0-based absolute pick index this turn was computed for
    pub pick_index: usize,
}

impl Turn {
    /// 1-based absolute pick number
    pub fn pick_number(&self) -> usize {
        self.pick_index + 1
    }
}

/// Compute the turn for `pick_index`.
///
/// `member_count` must be at least one; use [`try_compute_turn`] when the
/// count comes from untrusted state.
pub fn compute_turn(pick_index: usize, member_count: usize) -> Turn {
    debug_assert!(member_count > 0, "member_count must be positive");

    let round = pick_index / member_count + 1;
    let position = pick_index % member_count;
    let picker_index = if round % 2 == 1 {
        position
    } else {
        member_count - 1 - position
    };

    Turn {
        round,
        picker_index,
        pick_index,
    }
}

/// Checked variant of [`compute_turn`], `None` for an empty draft order.
pub fn try_compute_turn(pick_index: usize, member_count: usize) -> Option<Turn> {
    (member_count > 0).then(|| compute_turn(pick_index, member_count))
}

/// Picks needed to complete a draft
pub fn total_picks(member_count: usize, picks_per_member: usize) -> usize {
    member_count * picks_per_member
}

/// Picker indices for every pick of a `rounds`-round draft
pub fn snake_sequence(member_count: usize, rounds: usize) -> Vec<usize> {
    if member_count == 0 {
        return Vec::new();
    }
    (0..total_picks(member_count, rounds))
        .map(|index| compute_turn(index, member_count).picker_index)
        .collect()
}
