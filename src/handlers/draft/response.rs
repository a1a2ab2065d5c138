//! Draft response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{draft::NextPick, handlers::castaways::CastawayResponse, models::DraftStatus};

/// One committed pick with display names resolved
#[derive(Debug, Clone, Serialize)]
pub struct PickResponse {
    pub id: Uuid,
    pub round: i32,
    pub pick_number: i32,
    pub user_id: Uuid,
    pub user_name: String,
    pub castaway_id: Uuid,
    pub castaway_name: String,
    pub acquired_via: String,
    pub created_at: DateTime<Utc>,
}

/// Whose turn it is right now
#[derive(Debug, Clone, Serialize)]
pub struct CurrentTurnResponse {
    pub round: usize,
    pub pick_number: usize,
    pub user_id: Uuid,
    pub user_name: String,
}

/// Full draft board as seen by one member
#[derive(Debug, Serialize)]
pub struct DraftStateResponse {
    pub league_id: Uuid,
    pub league_name: String,
    pub status: DraftStatus,
    pub picks_per_member: i32,
    pub total_picks: usize,
    pub picks_made: usize,
    pub draft_deadline: Option<DateTime<Utc>>,
    pub current_turn: Option<CurrentTurnResponse>,
    pub is_my_turn: bool,
    pub picks: Vec<PickResponse>,
    pub my_picks: Vec<PickResponse>,
    pub available_castaways: Vec<CastawayResponse>,
}

/// A member's slot in the draft order
#[derive(Debug, Clone, Serialize)]
pub struct DraftOrderEntry {
    pub position: i32,
    pub user_id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
}

/// Resolved draft order
#[derive(Debug, Serialize)]
pub struct DraftOrderResponse {
    pub league_id: Uuid,
    pub status: DraftStatus,
    pub order: Vec<DraftOrderEntry>,
}

/// Result of a successful pick
#[derive(Debug, Serialize)]
pub struct PickOutcome {
    pub pick: PickResponse,
    pub draft_complete: bool,
    pub next_pick: Option<NextPick>,
}

/// League state after the draft opens
#[derive(Debug, Serialize)]
pub struct DraftStartedResponse {
    pub league_id: Uuid,
    pub status: DraftStatus,
    pub draft_order: Vec<Uuid>,
    pub draft_started_at: Option<DateTime<Utc>>,
    pub draft_deadline: Option<DateTime<Utc>>,
}
