//! Draft pick model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::acquired_via;

/// A roster entry created by the draft. Never updated or deleted.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DraftPick {
    pub id: Uuid,
    pub league_id: Uuid,
    pub user_id: Uuid,
    pub castaway_id: Uuid,
    pub round: i32,
    /// 1-based absolute pick number within the league
    pub pick_number: i32,
    pub acquired_via: String,
    pub created_at: DateTime<Utc>,
}

impl DraftPick {
    pub fn is_auto_drafted(&self) -> bool {
        self.acquired_via == acquired_via::AUTO_DRAFT
    }
}

/// How a pick entered the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquiredVia {
    Draft,
    AutoDraft,
}

impl AcquiredVia {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => acquired_via::DRAFT,
            Self::AutoDraft => acquired_via::AUTO_DRAFT,
        }
    }
}
