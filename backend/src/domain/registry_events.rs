//! Domain events emitted by successful registry writes.
//!
//! These events stay transport agnostic so outbound adapters can map them to
//! log records, broadcast frames, or any other envelope without re-encoding
//! domain logic.

use serde::{Deserialize, Serialize};

use crate::domain::identity::Identity;
use crate::domain::user::{SongName, UserName};

/// Event emitted when a profile is created or overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWrittenEvent {
    /// Identity that registered.
    pub caller: Identity,
    /// Profile name after the write.
    pub name: UserName,
    /// Age in years after the write.
    pub age: u32,
    /// Free-form location or status text after the write.
    pub state: String,
}

/// Event emitted when a song is appended to a recommendation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongAddedEvent {
    /// Owner of the recommendation list.
    pub caller: Identity,
    /// Song appended to the end of the list.
    pub song_name: SongName,
}

/// Event emitted when a follow edge is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFollowedEvent {
    /// Identity doing the following.
    pub caller: Identity,
    /// Identity being followed.
    pub target: Identity,
}

/// Registry write events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RegistryEvent {
    /// A profile was written.
    UserWritten(UserWrittenEvent),
    /// A song was added.
    SongAdded(SongAddedEvent),
    /// A follow edge was added.
    UserFollowed(UserFollowedEvent),
}

impl RegistryEvent {
    /// Machine-readable event kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UserWritten(_) => "userWritten",
            Self::SongAdded(_) => "songAdded",
            Self::UserFollowed(_) => "userFollowed",
        }
    }

    /// Identity whose write produced the event.
    #[must_use]
    pub const fn caller(&self) -> Identity {
        match self {
            Self::UserWritten(event) => event.caller,
            Self::SongAdded(event) => event.caller,
            Self::UserFollowed(event) => event.caller,
        }
    }
}

/// A committed event stamped with its position in commit order.
///
/// ## Invariants
/// - `sequence` starts at 1 and increases by exactly one per committed write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Position of the write in commit order.
    pub sequence: u64,
    /// What the write changed.
    pub event: RegistryEvent,
}
