//! Notification worker
//!
//! Drains the draft event channel, fans each event out into per-member
//! notifications and hands them to a [`NotificationSender`]. Delivery
//! failures are logged and never reach the code that emitted the event.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::event::DraftEvent;

/// A message for one league member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub recipient: Uuid,
    pub subject: String,
    pub body: String,
}

/// Outbound delivery channel (email, SMS, push...)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, notification: &Notification) -> anyhow::Result<()>;
}

/// Sender that records notifications in the log instead of delivering them
#[derive(Debug, Default, Clone)]
pub struct LogNotificationSender;

#[async_trait]
impl NotificationSender for LogNotificationSender {
    async fn send(&self, notification: &Notification) -> anyhow::Result<()> {
        tracing::info!(
            recipient = %notification.recipient,
            subject = %notification.subject,
            "Notification: {}",
            notification.body
        );
        Ok(())
    }
}

/// Expand an event into the notifications it produces
pub fn notifications_for(event: &DraftEvent) -> Vec<Notification> {
    match event {
        DraftEvent::DraftStarted {
            league_name,
            deadline,
            members,
            first_picker,
            ..
        } => {
            let mut out: Vec<Notification> = members
                .iter()
                .map(|member| Notification {
                    recipient: *member,
                    subject: format!("{league_name}: the draft has started"),
                    body: format!(
                        "The draft is open. Unmade picks will be auto-drafted after {}.",
                        deadline.format("%Y-%m-%d %H:%M UTC")
                    ),
                })
                .collect();
            if let Some(picker) = first_picker {
                out.push(on_the_clock(*picker, league_name, 1));
            }
            out
        }
        DraftEvent::PickMade {
            league_name,
            user_id,
            castaway_name,
            round,
            pick_number,
            next_picker,
            ..
        } => {
            let mut out = vec![Notification {
                recipient: *user_id,
                subject: format!("{league_name}: pick confirmed"),
                body: format!("You drafted {castaway_name} (round {round}, pick {pick_number})."),
            }];
            if let Some(next) = next_picker {
                out.push(on_the_clock(*next, league_name, pick_number + 1));
            }
            out
        }
        DraftEvent::DraftCompleted {
            league_name,
            auto_drafted,
            rosters,
            ..
        } => rosters
            .iter()
            .map(|roster| {
                let names = if roster.castaways.is_empty() {
                    "no castaways".to_string()
                } else {
                    roster.castaways.join(", ")
                };
                let suffix = if *auto_drafted {
                    " Remaining picks were auto-drafted after the deadline."
                } else {
                    ""
                };
                Notification {
                    recipient: roster.user_id,
                    subject: format!("{league_name}: draft complete"),
                    body: format!("Your roster: {names}.{suffix}"),
                }
            })
            .collect(),
    }
}

fn on_the_clock(recipient: Uuid, league_name: &str, pick_number: usize) -> Notification {
    Notification {
        recipient,
        subject: format!("{league_name}: you're on the clock"),
        body: format!("It's your turn to make pick {pick_number}."),
    }
}

/// Background consumer of draft events
pub struct NotificationWorker {
    rx: mpsc::Receiver<DraftEvent>,
    sender: Arc<dyn NotificationSender>,
}

impl NotificationWorker {
    pub fn new(rx: mpsc::Receiver<DraftEvent>, sender: Arc<dyn NotificationSender>) -> Self {
        Self { rx, sender }
    }

    /// Run until every [`EventSink`](super::EventSink) has been dropped
    pub async fn run(mut self) {
        tracing::info!("Notification worker started");

        while let Some(event) = self.rx.recv().await {
            let failed = self.dispatch(&event).await;
            if failed > 0 {
                tracing::warn!(
                    league_id = %event.league_id(),
                    kind = event.kind(),
                    failed,
                    "Some notifications could not be delivered"
                );
            }
        }

        tracing::info!("Notification worker stopped");
    }

    /// Deliver every notification for `event`, returning how many failed
    pub async fn dispatch(&self, event: &DraftEvent) -> usize {
        let notifications = notifications_for(event);
        let results = join_all(notifications.iter().map(|n| self.sender.send(n))).await;

        let mut failed = 0;
        for (notification, result) in notifications.iter().zip(results) {
            if let Err(e) = result {
                failed += 1;
                tracing::error!(
                    recipient = %notification.recipient,
                    subject = %notification.subject,
                    error = %e,
                    "Notification delivery failed"
                );
            }
        }
        failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{EventSink, RosterSummary};

    fn completed(rosters: Vec<RosterSummary>) -> DraftEvent {
        DraftEvent::DraftCompleted {
            league_id: Uuid::new_v4(),
            league_name: "Tribal Council".to_string(),
            auto_drafted: true,
            rosters,
        }
    }

    #[test]
    fn test_pick_made_notifies_picker_and_next() {
        let (picker, next) = (Uuid::new_v4(), Uuid::new_v4());
        let event = DraftEvent::PickMade {
            league_id: Uuid::new_v4(),
            league_name: "Tribal Council".to_string(),
            user_id: picker,
            castaway_name: "Kenzie".to_string(),
            round: 1,
            pick_number: 3,
            next_picker: Some(next),
        };

        let out = notifications_for(&event);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].recipient, picker);
        assert!(out[0].body.contains("Kenzie"));
        assert_eq!(out[1].recipient, next);
        assert!(out[1].body.contains("pick 4"));
    }

    #[test]
    fn test_completed_sends_each_roster() {
        let rosters = vec![
            RosterSummary {
                user_id: Uuid::new_v4(),
                castaways: vec!["Rachel".into(), "Sam".into()],
            },
            RosterSummary {
                user_id: Uuid::new_v4(),
                castaways: vec![],
            },
        ];

        let out = notifications_for(&completed(rosters.clone()));
        assert_eq!(out.len(), 2);
        assert!(out[0].body.contains("Rachel, Sam"));
        assert!(out[0].body.contains("auto-drafted"));
        assert!(out[1].body.contains("no castaways"));
    }

    #[tokio::test]
    async fn test_delivery_failures_are_counted_not_raised() {
        let mut sender = MockNotificationSender::new();
        sender
            .expect_send()
            .times(2)
            .returning(|_| Err(anyhow::anyhow!("smtp unavailable")));

        let (_sink, rx) = EventSink::channel(1);
        let worker = NotificationWorker::new(rx, Arc::new(sender));
        let rosters = (0..2)
            .map(|_| RosterSummary {
                user_id: Uuid::new_v4(),
                castaways: vec!["Sue".into()],
            })
            .collect();

        assert_eq!(worker.dispatch(&completed(rosters)).await, 2);
    }

    #[tokio::test]
    async fn test_worker_drains_until_sinks_dropped() {
        let mut sender = MockNotificationSender::new();
        sender.expect_send().times(1).returning(|_| Ok(()));

        let (sink, rx) = EventSink::channel(4);
        let handle = tokio::spawn(NotificationWorker::new(rx, Arc::new(sender)).run());

        sink.emit(completed(vec![RosterSummary {
            user_id: Uuid::new_v4(),
            castaways: vec!["Andy".into()],
        }]));
        drop(sink);

        handle.await.unwrap();
    }
}
