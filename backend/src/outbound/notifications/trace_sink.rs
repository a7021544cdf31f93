//! Notification sink that writes structured log events.

use tracing::info;

use crate::domain::ports::NotificationSink;
use crate::domain::{Notification, RegistryEvent};

/// Logs each notification at `info` with its sequence, kind and caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn publish(&self, notification: &Notification) {
        let event = &notification.event;
        match event {
            RegistryEvent::UserWritten(written) => info!(
                sequence = notification.sequence,
                kind = event.kind(),
                caller = %written.caller,
                name = %written.name,
                age = written.age,
                state = %written.state,
                "notification"
            ),
            RegistryEvent::SongAdded(added) => info!(
                sequence = notification.sequence,
                kind = event.kind(),
                caller = %added.caller,
                song_name = %added.song_name,
                "notification"
            ),
            RegistryEvent::UserFollowed(followed) => info!(
                sequence = notification.sequence,
                kind = event.kind(),
                caller = %followed.caller,
                target = %followed.target,
                "notification"
            ),
        }
    }
}
