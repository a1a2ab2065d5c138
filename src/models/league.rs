//! League model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::draft_status;

/// League database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct League {
    pub id: Uuid,
    pub name: String,
    pub season: i32,
    pub commissioner_id: Uuid,
    pub invite_code: String,
    pub picks_per_member: i32,
    /// Member ids in first-round pick order; empty until the commissioner sets it
    pub draft_order: Vec<Uuid>,
    pub draft_status: String,
    pub draft_deadline: Option<DateTime<Utc>>,
    pub draft_started_at: Option<DateTime<Utc>>,
    pub draft_completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl League {
    /// Parsed draft phase. Unknown values are treated as pending.
    pub fn status(&self) -> DraftStatus {
        DraftStatus::from_str(&self.draft_status).unwrap_or(DraftStatus::Pending)
    }

    /// Per-member quota as an index-friendly count
    pub fn quota(&self) -> usize {
        self.picks_per_member.max(0) as usize
    }

    pub fn is_commissioner(&self, user_id: &Uuid) -> bool {
        self.commissioner_id == *user_id
    }

    /// Whether the auto-draft deadline has passed at `now`
    pub fn is_past_deadline(&self, now: DateTime<Utc>) -> bool {
        self.draft_deadline.is_some_and(|deadline| deadline <= now)
    }
}

/// Draft lifecycle of a league
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    Pending,
    InProgress,
    Completed,
}

impl DraftStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            draft_status::PENDING => Some(Self::Pending),
            draft_status::IN_PROGRESS => Some(Self::InProgress),
            draft_status::COMPLETED => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => draft_status::PENDING,
            Self::InProgress => draft_status::IN_PROGRESS,
            Self::Completed => draft_status::COMPLETED,
        }
    }
}

impl std::fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// League membership joined with the member's user profile
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LeagueMember {
    pub league_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    /// 1-based position in the draft order
    pub draft_position: Option<i32>,
    pub joined_at: DateTime<Utc>,
}

impl LeagueMember {
    pub fn public_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}
