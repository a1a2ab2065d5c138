//! Draft request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::draft::OrderRequest;

/// Pick submission
#[derive(Debug, Deserialize)]
pub struct SubmitPickRequest {
    pub castaway_id: Uuid,
}

/// Explicit order or shuffle; exactly one must be given
#[derive(Debug, Deserialize)]
pub struct SetDraftOrderRequest {
    pub order: Option<Vec<Uuid>>,
    #[serde(default)]
    pub randomize: bool,
}

impl From<SetDraftOrderRequest> for OrderRequest {
    fn from(req: SetDraftOrderRequest) -> Self {
        OrderRequest {
            order: req.order,
            randomize: req.randomize,
        }
    }
}

/// Draft start options
#[derive(Debug, Default, Deserialize)]
pub struct StartDraftRequest {
    /// Auto-draft deadline; defaults to the configured window from now
    pub deadline: Option<DateTime<Utc>>,
}
