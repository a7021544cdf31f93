//! Append-only in-memory notification record.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::Notification;
use crate::domain::ports::NotificationSink;

/// Keeps every published notification for later inspection.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded notifications in publication order.
    pub fn entries(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Notifications with a sequence number greater than `sequence`.
    pub fn since(&self, sequence: u64) -> Vec<Notification> {
        self.lock()
            .iter()
            .filter(|notification| notification.sequence > sequence)
            .cloned()
            .collect()
    }

    /// Number of recorded notifications.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationSink for NotificationLog {
    fn publish(&self, notification: &Notification) {
        self.lock().push(notification.clone());
    }
}
