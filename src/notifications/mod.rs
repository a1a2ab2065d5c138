//! Draft notifications
//!
//! The draft service publishes [`DraftEvent`]s through an [`EventSink`];
//! a separate [`NotificationWorker`] delivers them. A pick never fails
//! because a notification could not be sent.

pub mod event;
pub mod worker;

pub use event::{DraftEvent, EventSink, RosterSummary};
pub use worker::{LogNotificationSender, Notification, NotificationSender, NotificationWorker};
