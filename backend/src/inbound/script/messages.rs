//! Wire-level definitions for call scripts.
//!
//! Calls are deserialised from JSON, dispatched to the registry driving
//! ports, and their outcomes serialised back out one per line.

use serde::{Deserialize, Serialize};

use crate::domain::ports::{RegistryCommand, RegistryQuery};
use crate::domain::{DomainError, Identity, Notification, ProfileDraft, SongName};

/// One registry write, carrying the caller identity the host assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum RegistryCall {
    /// Create or overwrite the caller's profile.
    RegisterUser {
        caller: Identity,
        name: String,
        age: u32,
        state: String,
    },
    /// Append a song to the caller's recommendations.
    AddSong {
        caller: Identity,
        #[serde(rename = "songName", alias = "song_name")]
        song_name: String,
    },
    /// Append `target` to the caller's follow list.
    Follow { caller: Identity, target: Identity },
}

impl RegistryCall {
    /// Identity the call is made on behalf of.
    #[must_use]
    pub const fn caller(&self) -> Identity {
        match self {
            Self::RegisterUser { caller, .. }
            | Self::AddSong { caller, .. }
            | Self::Follow { caller, .. } => *caller,
        }
    }

    /// Execute the call against a registry command port.
    ///
    /// # Errors
    ///
    /// Propagates the domain [`DomainError`] of a rejected write.
    pub fn dispatch<C>(self, command: &C) -> Result<Notification, DomainError>
    where
        C: RegistryCommand + ?Sized,
    {
        match self {
            Self::RegisterUser {
                caller,
                name,
                age,
                state,
            } => command.register_user(caller, ProfileDraft { name, age, state }),
            Self::AddSong { caller, song_name } => command.add_song(caller, song_name),
            Self::Follow { caller, target } => command.follow(caller, target),
        }
    }
}

/// Result of replaying a single call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CallOutcome {
    /// The write committed and published this notification.
    Ok { notification: Notification },
    /// The write was rejected and left the registry unchanged.
    Rejected { error: DomainError },
}

impl CallOutcome {
    /// Whether the call committed.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

impl From<Result<Notification, DomainError>> for CallOutcome {
    fn from(value: Result<Notification, DomainError>) -> Self {
        match value {
            Ok(notification) => Self::Ok { notification },
            Err(error) => Self::Rejected { error },
        }
    }
}

/// Read-side view of one registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub identity: Identity,
    pub name: String,
    pub age: u32,
    pub state: String,
    pub recommendations: Vec<SongName>,
    pub following: Vec<Identity>,
}

/// Read-side view of the whole registry, in first-registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySummary {
    pub users: Vec<UserSummary>,
}

impl RegistrySummary {
    /// Collect a summary through the query port.
    ///
    /// # Errors
    ///
    /// Returns the query's [`DomainError`] if a listed user cannot be read back,
    /// which only happens if the registry changes between reads.
    pub fn collect<Q>(query: &Q) -> Result<Self, DomainError>
    where
        Q: RegistryQuery + ?Sized,
    {
        let users = query
            .list_users()
            .into_iter()
            .map(|identity| -> Result<UserSummary, DomainError> {
                let profile = query.profile_of(&identity)?;
                let recommendations = (0..query.recommendation_count(&identity))
                    .map(|index| query.recommendation_at(&identity, index))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(UserSummary {
                    identity,
                    name: profile.name().to_string(),
                    age: profile.age(),
                    state: profile.state().to_owned(),
                    recommendations,
                    following: query.following_of(&identity),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { users })
    }
}
