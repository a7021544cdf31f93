//! Registry state machine.
//!
//! The registry owns every profile, recommendation list and follow edge.
//! Each write validates its inputs before touching state, so a rejected call
//! leaves the registry exactly as it was and produces no event.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde_json::json;

use crate::domain::DomainError;
use crate::domain::identity::Identity;
use crate::domain::registry_events::{
    RegistryEvent, SongAddedEvent, UserFollowedEvent, UserWrittenEvent,
};
use crate::domain::user::{ProfileDraft, SongName, User, UserProfile, UserValidationError};

/// How [`Registry::follow`] treats a target the caller already follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FollowPolicy {
    /// Append the edge again; follow lists are plain append-only logs.
    #[default]
    AllowDuplicates,
    /// Reject the call with [`crate::domain::ErrorCode::InvalidArgument`].
    RejectDuplicates,
}

/// In-memory registry of users, their recommendations and follow edges.
///
/// ## Invariants
/// - A user exists in `users` iff its identity appears exactly once in
///   `user_order`.
/// - No user follows itself and nobody follows [`Identity::ZERO`].
///
/// # Examples
/// ```
/// use social_music::domain::{Identity, ProfileDraft, Registry};
///
/// let alice = Identity::from_bytes([1; 20]);
/// let mut registry = Registry::default();
/// registry
///     .register_user(
///         alice,
///         ProfileDraft { name: "Alice".into(), age: 30, state: "CA".into() },
///     )
///     .expect("valid registration");
/// registry.add_song(alice, "Song1").expect("valid song");
///
/// assert_eq!(registry.list_users(), &[alice]);
/// assert_eq!(registry.recommendation_count(&alice), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    users: HashMap<Identity, User>,
    user_order: Vec<Identity>,
    follow_policy: FollowPolicy,
}

impl Registry {
    /// Create an empty registry with the given duplicate-follow policy.
    #[must_use]
    pub fn with_follow_policy(follow_policy: FollowPolicy) -> Self {
        Self {
            follow_policy,
            ..Self::default()
        }
    }

    /// Duplicate-follow policy in force.
    pub fn follow_policy(&self) -> FollowPolicy {
        self.follow_policy
    }

    /// Create or overwrite the caller's profile.
    ///
    /// Re-registration replaces name, age and state but keeps the caller's
    /// recommendations, follow list and position in [`Self::list_users`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::InvalidArgument`] when the name is
    /// empty or the caller is [`Identity::ZERO`].
    pub fn register_user(
        &mut self,
        caller: Identity,
        draft: ProfileDraft,
    ) -> Result<RegistryEvent, DomainError> {
        if caller.is_zero() {
            return Err(
                DomainError::invalid_argument("the zero identity cannot register")
                    .with_details(json!({ "field": "caller" })),
            );
        }
        let profile = UserProfile::try_from(draft).map_err(validation_error)?;

        let event = UserWrittenEvent {
            caller,
            name: profile.name().clone(),
            age: profile.age(),
            state: profile.state().to_owned(),
        };

        match self.users.entry(caller) {
            Entry::Occupied(mut existing) => existing.get_mut().replace_profile(profile),
            Entry::Vacant(slot) => {
                slot.insert(User::new(caller, profile));
                self.user_order.push(caller);
            }
        }

        Ok(RegistryEvent::UserWritten(event))
    }

    /// Append a recommendation to the caller's list.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::InvalidArgument`] for an empty or
    /// over-long song name and [`crate::domain::ErrorCode::NotFound`] when the
    /// caller has not registered.
    pub fn add_song(
        &mut self,
        caller: Identity,
        song_name: impl Into<String>,
    ) -> Result<RegistryEvent, DomainError> {
        let song_name = SongName::new(song_name).map_err(validation_error)?;
        let user = self
            .users
            .get_mut(&caller)
            .ok_or_else(|| unregistered(caller))?;

        user.push_song(song_name.clone());

        Ok(RegistryEvent::SongAdded(SongAddedEvent { caller, song_name }))
    }

    /// Append `target` to the caller's follow list.
    ///
    /// The target does not have to be registered.
    ///
    /// # Errors
    ///
    /// Checked in order:
    /// 1. [`crate::domain::ErrorCode::InvalidArgument`] when `target` is
    ///    [`Identity::ZERO`];
    /// 2. [`crate::domain::ErrorCode::InvalidArgument`] when `target` equals
    ///    `caller`;
    /// 3. [`crate::domain::ErrorCode::NotFound`] when the caller has not
    ///    registered;
    /// 4. [`crate::domain::ErrorCode::InvalidArgument`] when the caller already
    ///    follows `target` under [`FollowPolicy::RejectDuplicates`].
    pub fn follow(
        &mut self,
        caller: Identity,
        target: Identity,
    ) -> Result<RegistryEvent, DomainError> {
        if target.is_zero() {
            return Err(DomainError::invalid_argument("cannot follow the zero identity")
                .with_details(json!({ "field": "target" })));
        }
        if target == caller {
            return Err(DomainError::invalid_argument("users cannot follow themselves")
                .with_details(json!({ "field": "target" })));
        }

        let follow_policy = self.follow_policy;
        let user = self
            .users
            .get_mut(&caller)
            .ok_or_else(|| unregistered(caller))?;
        if follow_policy == FollowPolicy::RejectDuplicates && user.is_following(&target) {
            return Err(DomainError::invalid_argument(format!("already following {target}"))
                .with_details(json!({ "field": "target" })));
        }

        user.push_following(target);

        Ok(RegistryEvent::UserFollowed(UserFollowedEvent { caller, target }))
    }

    /// Registered identities in first-registration order.
    pub fn list_users(&self) -> &[Identity] {
        self.user_order.as_slice()
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        self.user_order.len()
    }

    /// Full user record, if registered.
    pub fn user(&self, identity: &Identity) -> Option<&User> {
        self.users.get(identity)
    }

    /// Profile of a registered user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::NotFound`] for unregistered
    /// identities.
    pub fn profile_of(&self, identity: &Identity) -> Result<&UserProfile, DomainError> {
        self.user(identity)
            .map(User::profile)
            .ok_or_else(|| unregistered(*identity))
    }

    /// Number of recommendations; zero for unknown identities.
    pub fn recommendation_count(&self, identity: &Identity) -> usize {
        self.songs_of(identity).len()
    }

    /// Recommendation at a 0-based insertion index.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::OutOfRange`] when `index` is not
    /// below [`Self::recommendation_count`], including for identities that
    /// never added a song.
    pub fn recommendation_at(
        &self,
        identity: &Identity,
        index: usize,
    ) -> Result<&SongName, DomainError> {
        let songs = self.songs_of(identity);
        songs.get(index).ok_or_else(|| {
            DomainError::out_of_range(format!(
                "recommendation index {index} out of range for {identity}"
            ))
            .with_details(json!({ "index": index, "count": songs.len() }))
        })
    }

    /// Follow list in insertion order; empty for unknown identities.
    pub fn following_of(&self, identity: &Identity) -> &[Identity] {
        self.user(identity)
            .map(User::following)
            .unwrap_or_default()
    }

    fn songs_of(&self, identity: &Identity) -> &[SongName] {
        self.user(identity).map(User::songs).unwrap_or_default()
    }
}

fn validation_error(error: UserValidationError) -> DomainError {
    let details = match &error {
        UserValidationError::SongNameTooLong { max, actual } => {
            json!({ "field": error.field(), "max": max, "actual": actual })
        }
        UserValidationError::EmptyName | UserValidationError::EmptySongName => {
            json!({ "field": error.field() })
        }
    };
    DomainError::invalid_argument(error.to_string()).with_details(details)
}

fn unregistered(identity: Identity) -> DomainError {
    DomainError::not_found(format!("{identity} is not registered"))
        .with_details(json!({ "identity": identity }))
}
