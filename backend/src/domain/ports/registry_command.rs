//! Driving port for registry writes.
//!
//! The caller identity is supplied by the execution environment and is passed
//! explicitly on every call; the registry never authenticates it. A
//! synchronous interface is intentional: writes are CPU-only and must not
//! perform I/O.

use crate::domain::{DomainError, Identity, Notification, ProfileDraft};

/// Domain use-case port for registry writes.
///
/// Each call is one atomic unit: it either commits and yields the single
/// notification it published, or fails and leaves the registry untouched.
pub trait RegistryCommand: Send + Sync {
    /// Create or overwrite the caller's profile.
    fn register_user(
        &self,
        caller: Identity,
        draft: ProfileDraft,
    ) -> Result<Notification, DomainError>;

    /// Append a song to the caller's recommendation list.
    fn add_song(&self, caller: Identity, song_name: String) -> Result<Notification, DomainError>;

    /// Append `target` to the caller's follow list.
    fn follow(&self, caller: Identity, target: Identity) -> Result<Notification, DomainError>;
}
