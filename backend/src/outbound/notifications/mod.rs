//! Outbound adapters for delivering registry notifications.
//!
//! Every adapter implements [`NotificationSink`]. They are thin translators
//! from committed notifications to an observer-facing channel and contain no
//! business logic.

mod broadcast;
mod memory_log;
mod trace_sink;

use std::sync::Arc;

pub use broadcast::BroadcastNotificationSink;
pub use memory_log::NotificationLog;
pub use trace_sink::TracingNotificationSink;

use crate::domain::Notification;
use crate::domain::ports::NotificationSink;

/// Forwards each notification to several sinks, in registration order.
#[derive(Clone, Default)]
pub struct FanoutNotificationSink {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl FanoutNotificationSink {
    /// Create a fan-out over the given sinks.
    pub fn new(sinks: Vec<Arc<dyn NotificationSink>>) -> Self {
        Self { sinks }
    }

    /// Append another sink to the fan-out.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Number of sinks notified per publish.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether the fan-out has no sinks.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl std::fmt::Debug for FanoutNotificationSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutNotificationSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl NotificationSink for FanoutNotificationSink {
    fn publish(&self, notification: &Notification) {
        for sink in &self.sinks {
            sink.publish(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use crate::domain::ports::MockNotificationSink;
    use crate::domain::{Identity, RegistryEvent, UserFollowedEvent};
    use rstest::rstest;

    fn notification(sequence: u64) -> Notification {
        Notification {
            sequence,
            event: RegistryEvent::UserFollowed(UserFollowedEvent {
                caller: Identity::from_bytes([1; 20]),
                target: Identity::from_bytes([2; 20]),
            }),
        }
    }

    #[rstest]
    fn forwards_to_every_sink() {
        let mut first = MockNotificationSink::new();
        first
            .expect_publish()
            .withf(|n| n.sequence == 7)
            .times(1)
            .return_const(());
        let log = Arc::new(NotificationLog::new());

        let fanout =
            FanoutNotificationSink::new(vec![Arc::new(first) as Arc<dyn NotificationSink>])
                .with_sink(Arc::clone(&log) as Arc<dyn NotificationSink>);
        assert_eq!(fanout.len(), 2);

        fanout.publish(&notification(7));
        assert_eq!(log.entries(), vec![notification(7)]);
    }

    #[rstest]
    fn empty_fanout_is_a_no_op() {
        let fanout = FanoutNotificationSink::default();
        assert!(fanout.is_empty());
        fanout.publish(&notification(1));
    }
}
