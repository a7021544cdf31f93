//! Registry domain service.
//!
//! Serialises calls against a single [`Registry`], stamps each committed
//! write with a sequence number and hands the resulting notification to a
//! [`NotificationSink`]. Implements both registry driving ports.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::domain::ports::{NotificationSink, RegistryCommand, RegistryQuery};
use crate::domain::{
    DomainError, Identity, Notification, ProfileDraft, Registry, RegistryEvent, SongName,
    UserProfile,
};

#[derive(Debug)]
struct RegistryState {
    registry: Registry,
    last_sequence: u64,
}

/// Registry service implementing [`RegistryCommand`] and [`RegistryQuery`].
pub struct RegistryService<S> {
    state: Arc<Mutex<RegistryState>>,
    sink: Arc<S>,
}

impl<S> Clone for RegistryService<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<S> RegistryService<S> {
    /// Create a service around an initial registry and a notification sink.
    pub fn new(registry: Registry, sink: Arc<S>) -> Self {
        Self {
            state: Arc::new(Mutex::new(RegistryState {
                registry,
                last_sequence: 0,
            })),
            sink,
        }
    }

    /// Copy of the current registry state.
    pub fn snapshot(&self) -> Registry {
        self.lock().registry.clone()
    }

    /// Sequence number of the most recent committed write; zero before any.
    pub fn last_sequence(&self) -> u64 {
        self.lock().last_sequence
    }

    // Writes validate before mutating, so a poisoned lock never guards
    // half-applied state.
    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read<T>(&self, query: impl FnOnce(&Registry) -> T) -> T {
        query(&self.lock().registry)
    }
}

impl<S> RegistryService<S>
where
    S: NotificationSink,
{
    fn commit(
        &self,
        operation: &'static str,
        caller: Identity,
        write: impl FnOnce(&mut Registry) -> Result<RegistryEvent, DomainError>,
    ) -> Result<Notification, DomainError> {
        let mut state = self.lock();
        let event = write(&mut state.registry).inspect_err(|error| {
            debug!(
                operation,
                caller = %caller,
                code = error.code().as_str(),
                error = %error,
                "registry write rejected"
            );
        })?;

        state.last_sequence += 1;
        let notification = Notification {
            sequence: state.last_sequence,
            event,
        };
        info!(
            operation,
            caller = %caller,
            sequence = notification.sequence,
            "registry write committed"
        );
        self.sink.publish(&notification);

        Ok(notification)
    }
}

impl<S> RegistryCommand for RegistryService<S>
where
    S: NotificationSink,
{
    fn register_user(
        &self,
        caller: Identity,
        draft: ProfileDraft,
    ) -> Result<Notification, DomainError> {
        self.commit("register_user", caller, |registry| {
            registry.register_user(caller, draft)
        })
    }

    fn add_song(&self, caller: Identity, song_name: String) -> Result<Notification, DomainError> {
        self.commit("add_song", caller, |registry| {
            registry.add_song(caller, song_name)
        })
    }

    fn follow(&self, caller: Identity, target: Identity) -> Result<Notification, DomainError> {
        self.commit("follow", caller, |registry| registry.follow(caller, target))
    }
}

impl<S> RegistryQuery for RegistryService<S>
where
    S: NotificationSink,
{
    fn list_users(&self) -> Vec<Identity> {
        self.read(|registry| registry.list_users().to_vec())
    }

    fn user_count(&self) -> usize {
        self.read(Registry::user_count)
    }

    fn profile_of(&self, identity: &Identity) -> Result<UserProfile, DomainError> {
        self.read(|registry| registry.profile_of(identity).cloned())
    }

    fn recommendation_count(&self, identity: &Identity) -> usize {
        self.read(|registry| registry.recommendation_count(identity))
    }

    fn recommendation_at(
        &self,
        identity: &Identity,
        index: usize,
    ) -> Result<SongName, DomainError> {
        self.read(|registry| registry.recommendation_at(identity, index).cloned())
    }

    fn following_of(&self, identity: &Identity) -> Vec<Identity> {
        self.read(|registry| registry.following_of(identity).to_vec())
    }
}

#[cfg(test)]
#[path = "registry_service_tests.rs"]
mod tests;
