//! Session expiration broadcast.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

/// Events published by the session controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The session expired or was invalidated by the backend.
    ///
    /// The timestamp is advisory; consumers should re-check the session
    /// rather than rely on any payload guarantee.
    Expired { at: DateTime<Utc> },
}

/// Fire-and-forget broadcast channel for session events.
///
/// Subscribing returns a receiver; dropping it unsubscribes. Publishing
/// to zero receivers is not an error, and no delivery ordering across
/// consumers is guaranteed.
#[derive(Clone)]
pub struct ExpirationBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl ExpirationBus {
    /// Create a new bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Get a receiver subscribed to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        trace!("new subscriber registered on expiration bus");
        self.sender.subscribe()
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of receivers the event reached; zero when
    /// nobody is listening.
    pub fn publish(&self, event: SessionEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => {
                trace!(receivers, "session event published");
                receivers
            }
            Err(_) => {
                trace!("no receivers for session event, dropped");
                0
            }
        }
    }

    /// Current number of subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ExpirationBus {
    fn default() -> Self {
        Self::new(16)
    }
}
