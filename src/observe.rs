//! Observation scheduler - retry discovery while the page keeps rendering
//!
//! Many sites render their print link (or their back link) after the initial
//! parse. Each re-rendering arrives as a [`DocumentChange`] on a channel; the
//! receiver is the subscription and closing it unsubscribes. A deadline bounds
//! the subscription so it never outlives the page's initial rendering.

use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{timeout_at, Instant};
use tracing::debug;

/// One re-rendering of the document after the initial load
#[derive(Debug, Clone)]
pub struct DocumentChange {
    pub markup: String,
}

impl DocumentChange {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }
}

/// Receiving end of a change subscription
pub type ChangeFeed = mpsc::UnboundedReceiver<DocumentChange>;

/// Create a change subscription; the sender side is the notification source.
pub fn change_feed() -> (mpsc::UnboundedSender<DocumentChange>, ChangeFeed) {
    mpsc::unbounded_channel()
}

/// How an observation window ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "ended", rename_all = "snake_case")]
pub enum ObservationOutcome {
    /// The predicate held after this many notifications
    Satisfied { notifications: usize },
    /// The window elapsed first
    TimedOut { notifications: usize },
    /// The notification source went away (page torn down)
    SourceClosed { notifications: usize },
}

impl ObservationOutcome {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, ObservationOutcome::Satisfied { .. })
    }

    pub fn notifications(&self) -> usize {
        match *self {
            ObservationOutcome::Satisfied { notifications }
            | ObservationOutcome::TimedOut { notifications }
            | ObservationOutcome::SourceClosed { notifications } => notifications,
        }
    }
}

/// Re-run `predicate` on every change until it returns true or
/// `max_duration` elapses.
///
/// Either way the subscription is closed before returning, so the source can
/// no longer deliver and the predicate never runs again.
pub async fn retry_until<F>(
    changes: &mut ChangeFeed,
    max_duration: Duration,
    mut predicate: F,
) -> ObservationOutcome
where
    F: FnMut(&DocumentChange) -> bool,
{
    let deadline = Instant::now() + max_duration;
    let mut notifications = 0usize;

    let outcome = loop {
        match timeout_at(deadline, changes.recv()).await {
            Ok(Some(change)) => {
                notifications += 1;
                if predicate(&change) {
                    break ObservationOutcome::Satisfied { notifications };
                }
            }
            Ok(None) => break ObservationOutcome::SourceClosed { notifications },
            Err(_) => break ObservationOutcome::TimedOut { notifications },
        }
    };

    changes.close();
    debug!(?outcome, "observation finished");
    outcome
}
