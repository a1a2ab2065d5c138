//! Castaway response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Castaway;

/// Castaway information
#[derive(Debug, Clone, Serialize)]
pub struct CastawayResponse {
    pub id: Uuid,
    pub season: i32,
    pub name: String,
    pub tribe: Option<String>,
    pub status: String,
    pub eliminated_at: Option<DateTime<Utc>>,
}

impl From<&Castaway> for CastawayResponse {
    fn from(c: &Castaway) -> Self {
        Self {
            id: c.id,
            season: c.season,
            name: c.name.clone(),
            tribe: c.tribe.clone(),
            status: c.status.clone(),
            eliminated_at: c.eliminated_at,
        }
    }
}

impl From<Castaway> for CastawayResponse {
    fn from(c: Castaway) -> Self {
        Self::from(&c)
    }
}

/// Castaways of one season
#[derive(Debug, Serialize)]
pub struct CastawaysListResponse {
    pub castaways: Vec<CastawayResponse>,
    pub total: usize,
}
