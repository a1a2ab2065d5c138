//! Castaway model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::castaway_status;

/// Castaway database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Castaway {
    pub id: Uuid,
    pub season: i32,
    pub name: String,
    pub tribe: Option<String>,
    pub status: String,
    pub eliminated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Castaway {
    /// Active castaways are still draftable
    pub fn is_active(&self) -> bool {
        self.status == castaway_status::ACTIVE
    }
}
