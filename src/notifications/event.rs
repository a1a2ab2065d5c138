//! Draft events and the sink the engine emits them through

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Something league members should hear about
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DraftEvent {
    DraftStarted {
        league_id: Uuid,
        league_name: String,
        deadline: DateTime<Utc>,
        members: Vec<Uuid>,
        first_picker: Option<Uuid>,
    },
    PickMade {
        league_id: Uuid,
        league_name: String,
        user_id: Uuid,
        castaway_name: String,
        round: usize,
        pick_number: usize,
        next_picker: Option<Uuid>,
    },
    DraftCompleted {
        league_id: Uuid,
        league_name: String,
        auto_drafted: bool,
        rosters: Vec<RosterSummary>,
    },
}

impl DraftEvent {
    pub fn league_id(&self) -> Uuid {
        match self {
            Self::DraftStarted { league_id, .. }
            | Self::PickMade { league_id, .. }
            | Self::DraftCompleted { league_id, .. } => *league_id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::DraftStarted { .. } => "draft_started",
            Self::PickMade { .. } => "pick_made",
            Self::DraftCompleted { .. } => "draft_completed",
        }
    }
}

/// One member's final roster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterSummary {
    pub user_id: Uuid,
    pub castaways: Vec<String>,
}

/// Non-blocking handle for publishing draft events.
///
/// Emitting never fails the caller: a full or closed channel is logged and
/// the event is dropped.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::Sender<DraftEvent>,
}

impl EventSink {
    /// Bounded channel pair; the receiver belongs to the notification worker
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<DraftEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    pub fn emit(&self, event: DraftEvent) {
        let league_id = event.league_id();
        let kind = event.kind();

        match self.tx.try_send(event) {
            Ok(()) => tracing::debug!(%league_id, kind, "Draft event queued"),
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(%league_id, kind, "Notification queue full, dropping draft event")
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::warn!(%league_id, kind, "Notification worker stopped, dropping draft event")
            }
        }
    }
}
