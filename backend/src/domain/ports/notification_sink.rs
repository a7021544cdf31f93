//! Driven port for publishing committed registry notifications.
//!
//! Sinks are called while the registry write lock is held, so publication
//! order matches commit order. Implementations must not call back into the
//! registry service.

use crate::domain::Notification;

/// Port for delivering notifications to external observers.
///
/// Delivery is fire-and-forget: a sink that cannot reach its observers drops
/// the notification rather than failing the committed write.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send + Sync {
    /// Hand a committed notification to observers.
    fn publish(&self, notification: &Notification);
}

/// Fixture implementation for callers that do not observe notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotificationSink;

impl NotificationSink for FixtureNotificationSink {
    fn publish(&self, _notification: &Notification) {}
}
