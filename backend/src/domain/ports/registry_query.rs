//! Driving port for registry reads.

use crate::domain::{DomainError, Identity, SongName, UserProfile};

/// Domain use-case port for registry reads.
///
/// Reads observe the state left by the most recently committed write and
/// return owned snapshots.
pub trait RegistryQuery: Send + Sync {
    /// Registered identities in first-registration order.
    fn list_users(&self) -> Vec<Identity>;

    /// Number of registered users.
    fn user_count(&self) -> usize;

    /// Profile of a registered user.
    fn profile_of(&self, identity: &Identity) -> Result<UserProfile, DomainError>;

    /// Number of recommendations; zero for unknown identities.
    fn recommendation_count(&self, identity: &Identity) -> usize;

    /// Recommendation at a 0-based insertion index.
    fn recommendation_at(&self, identity: &Identity, index: usize) -> Result<SongName, DomainError>;

    /// Follow list; empty for unknown identities.
    fn following_of(&self, identity: &Identity) -> Vec<Identity>;
}
