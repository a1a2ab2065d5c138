//! League response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{DraftStatus, League, LeagueMember};

/// League summary
#[derive(Debug, Serialize)]
pub struct LeagueResponse {
    pub id: Uuid,
    pub name: String,
    pub season: i32,
    pub commissioner_id: Uuid,
    pub invite_code: String,
    pub picks_per_member: i32,
    pub draft_status: DraftStatus,
    pub draft_deadline: Option<DateTime<Utc>>,
    pub draft_started_at: Option<DateTime<Utc>>,
    pub draft_completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<League> for LeagueResponse {
    fn from(league: League) -> Self {
        Self {
            draft_status: league.status(),
            id: league.id,
            name: league.name,
            season: league.season,
            commissioner_id: league.commissioner_id,
            invite_code: league.invite_code,
            picks_per_member: league.picks_per_member,
            draft_deadline: league.draft_deadline,
            draft_started_at: league.draft_started_at,
            draft_completed_at: league.draft_completed_at,
            created_at: league.created_at,
        }
    }
}

/// League member entry
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub user_id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub draft_position: Option<i32>,
    pub joined_at: DateTime<Utc>,
}

impl From<LeagueMember> for MemberResponse {
    fn from(m: LeagueMember) -> Self {
        Self {
            user_id: m.user_id,
            username: m.username,
            display_name: m.display_name,
            draft_position: m.draft_position,
            joined_at: m.joined_at,
        }
    }
}

/// League with its members
#[derive(Debug, Serialize)]
pub struct LeagueDetailResponse {
    #[serde(flatten)]
    pub league: LeagueResponse,
    pub members: Vec<MemberResponse>,
}

/// Leagues the caller belongs to
#[derive(Debug, Serialize)]
pub struct LeaguesListResponse {
    pub leagues: Vec<LeagueResponse>,
    pub total: usize,
}
