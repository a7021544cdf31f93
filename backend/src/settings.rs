//! Registry configuration loaded via OrthoConfig.
//!
//! Values layer defaults, configuration files, `SOCIAL_MUSIC_*` environment
//! variables and command-line flags, in increasing precedence.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{FollowPolicy, Registry};

/// Default number of undelivered notifications retained per subscriber.
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 256;

/// Configuration values controlling registry behaviour and notification
/// delivery.
///
/// Fields are optional; the accessors apply defaults.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SOCIAL_MUSIC")]
pub struct RegistrySettings {
    /// Undelivered notifications retained per broadcast subscriber.
    pub notification_capacity: Option<usize>,
    /// Reject follow calls whose target the caller already follows.
    pub reject_duplicate_follows: Option<bool>,
}

impl RegistrySettings {
    /// Whether duplicate follows are rejected, falling back to `false`.
    pub fn rejects_duplicate_follows(&self) -> bool {
        self.reject_duplicate_follows.unwrap_or(false)
    }

    /// Duplicate-follow policy selected by these settings.
    pub fn follow_policy(&self) -> FollowPolicy {
        if self.rejects_duplicate_follows() {
            FollowPolicy::RejectDuplicates
        } else {
            FollowPolicy::AllowDuplicates
        }
    }

    /// Broadcast capacity, falling back to
    /// [`DEFAULT_NOTIFICATION_CAPACITY`] and never below one.
    pub fn notification_capacity(&self) -> usize {
        self.notification_capacity
            .unwrap_or(DEFAULT_NOTIFICATION_CAPACITY)
            .max(1)
    }

    /// Build an empty registry configured by these settings.
    pub fn build_registry(&self) -> Registry {
        Registry::with_follow_policy(self.follow_policy())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for registry settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> RegistrySettings {
        RegistrySettings::load_from_iter([OsString::from("registry-replay")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("SOCIAL_MUSIC_NOTIFICATION_CAPACITY", None::<String>),
            ("SOCIAL_MUSIC_REJECT_DUPLICATE_FOLLOWS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.notification_capacity.is_none());
        assert!(settings.reject_duplicate_follows.is_none());
        assert_eq!(
            settings.notification_capacity(),
            DEFAULT_NOTIFICATION_CAPACITY
        );
        assert!(!settings.rejects_duplicate_follows());
        assert_eq!(settings.follow_policy(), FollowPolicy::AllowDuplicates);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SOCIAL_MUSIC_NOTIFICATION_CAPACITY", Some("8".to_owned())),
            (
                "SOCIAL_MUSIC_REJECT_DUPLICATE_FOLLOWS",
                Some("true".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.notification_capacity, Some(8));
        assert_eq!(settings.reject_duplicate_follows, Some(true));
        assert_eq!(settings.notification_capacity(), 8);
        assert_eq!(settings.follow_policy(), FollowPolicy::RejectDuplicates);
        assert_eq!(
            settings.build_registry().follow_policy(),
            FollowPolicy::RejectDuplicates
        );
    }

    #[rstest]
    fn zero_capacity_is_raised_to_one() {
        let settings = RegistrySettings {
            notification_capacity: Some(0),
            reject_duplicate_follows: None,
        };
        assert_eq!(settings.notification_capacity(), 1);
    }
}
