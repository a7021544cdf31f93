//! In-process broadcast bus for registry notifications.

use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::Notification;
use crate::domain::ports::NotificationSink;

/// Fans notifications out to any number of subscribers.
///
/// Publishing without subscribers is not an error. Subscribers that fall more
/// than `capacity` notifications behind skip the oldest ones and observe
/// [`broadcast::error::RecvError::Lagged`].
#[derive(Debug, Clone)]
pub struct BroadcastNotificationSink {
    sender: broadcast::Sender<Notification>,
}

impl BroadcastNotificationSink {
    /// Create a bus retaining up to `capacity` undelivered notifications per
    /// subscriber. A zero capacity is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to notifications published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl NotificationSink for BroadcastNotificationSink {
    fn publish(&self, notification: &Notification) {
        if self.sender.send(notification.clone()).is_err() {
            debug!(
                sequence = notification.sequence,
                "no notification subscribers"
            );
        }
    }
}
