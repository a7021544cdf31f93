//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed registry entities and the state machine
//! that enforces their invariants at write time. Keep types transport
//! agnostic and document invariants and serialisation contracts (serde) in
//! each type's Rustdoc.
//!
//! Public surface:
//! - DomainError (alias to `error::DomainError`): domain error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Identity (alias to `identity::Identity`): opaque caller token.
//! - Registry (alias to `registry::Registry`): users, songs and follows.
//! - RegistryService (alias to `registry_service::RegistryService`):
//!   serialised, notifying front for the registry.

pub mod error;
pub mod identity;
pub mod ports;
pub mod registry;
pub mod registry_events;
pub mod registry_service;
pub mod user;

pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::identity::{IDENTITY_LEN, Identity, IdentityParseError};
pub use self::registry::{FollowPolicy, Registry};
pub use self::registry_events::{
    Notification, RegistryEvent, SongAddedEvent, UserFollowedEvent, UserWrittenEvent,
};
pub use self::registry_service::RegistryService;
pub use self::user::{
    ProfileDraft, SONG_NAME_MAX, SongName, User, UserName, UserProfile, UserValidationError,
};

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use social_music::domain::{DomainError, DomainResult};
///
/// fn lookup() -> DomainResult<usize> {
///     Err(DomainError::not_found("nope"))
/// }
/// ```
pub type DomainResult<T> = Result<T, DomainError>;
