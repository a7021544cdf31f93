//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::identity::Identity;

/// Maximum allowed length for a song name, in characters.
pub const SONG_NAME_MAX: usize = 100;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    EmptySongName,
    SongNameTooLong { max: usize, actual: usize },
}

impl UserValidationError {
    /// Input field the error refers to, as named in call payloads.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptySongName | Self::SongNameTooLong { .. } => "songName",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptySongName => write!(f, "song name must not be empty"),
            Self::SongNameTooLong { max, actual } => {
                write!(f, "song name must be at most {max} characters (got {actual})")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Profile name chosen by the user. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`] from owned input.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, UserValidationError> {
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// A single recommendation entry: between 1 and [`SONG_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SongName(String);

impl SongName {
    /// Validate and construct a [`SongName`] from owned input.
    pub fn new(song_name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(song_name.into())
    }

    fn from_owned(song_name: String) -> Result<Self, UserValidationError> {
        if song_name.is_empty() {
            return Err(UserValidationError::EmptySongName);
        }

        let length = song_name.chars().count();
        if length > SONG_NAME_MAX {
            return Err(UserValidationError::SongNameTooLong {
                max: SONG_NAME_MAX,
                actual: length,
            });
        }

        Ok(Self(song_name))
    }
}

impl AsRef<str> for SongName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SongName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<SongName> for String {
    fn from(value: SongName) -> Self {
        value.0
    }
}

impl TryFrom<String> for SongName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Unvalidated profile fields as submitted by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    pub name: String,
    pub age: u32,
    pub state: String,
}

/// Mutable part of a user record, replaced wholesale on re-registration.
///
/// ## Invariants
/// - `name` is non-empty.
/// - `state` is free-form and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    name: UserName,
    age: u32,
    state: String,
}

impl UserProfile {
    /// Build a profile from validated components.
    pub fn new(name: UserName, age: u32, state: impl Into<String>) -> Self {
        Self {
            name,
            age,
            state: state.into(),
        }
    }

    /// Profile name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Age in years.
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Free-form location or status text.
    pub fn state(&self) -> &str {
        self.state.as_str()
    }
}

impl TryFrom<ProfileDraft> for UserProfile {
    type Error = UserValidationError;

    fn try_from(value: ProfileDraft) -> Result<Self, Self::Error> {
        let ProfileDraft { name, age, state } = value;
        Ok(Self::new(UserName::new(name)?, age, state))
    }
}

/// Registered participant.
///
/// `songs` and `following` are append-only logs owned by this user; the
/// registry is the only writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    identity: Identity,
    profile: UserProfile,
    songs: Vec<SongName>,
    following: Vec<Identity>,
}

impl User {
    pub(crate) fn new(identity: Identity, profile: UserProfile) -> Self {
        Self {
            identity,
            profile,
            songs: Vec::new(),
            following: Vec::new(),
        }
    }

    /// Identity this user registered under.
    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// Current profile.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Recommendations in insertion order.
    pub fn songs(&self) -> &[SongName] {
        self.songs.as_slice()
    }

    /// Followed identities in insertion order.
    pub fn following(&self) -> &[Identity] {
        self.following.as_slice()
    }

    /// Whether `target` already appears in the follow list.
    pub fn is_following(&self, target: &Identity) -> bool {
        self.following.contains(target)
    }

    pub(crate) fn replace_profile(&mut self, profile: UserProfile) {
        self.profile = profile;
    }

    pub(crate) fn push_song(&mut self, song: SongName) {
        self.songs.push(song);
    }

    pub(crate) fn push_following(&mut self, target: Identity) {
        self.following.push(target);
    }
}
