//! Social music registry.
//!
//! Participants, identified by an opaque caller identity supplied by the
//! host, register a profile, publish songs to their own recommendation list
//! and follow one another. The [`domain::Registry`] enforces every write-time
//! rule; [`domain::RegistryService`] serialises calls and publishes one
//! notification per committed write through an outbound sink.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;
pub mod telemetry;

pub use domain::{DomainError, ErrorCode, Identity, Registry, RegistryService};
pub use settings::RegistrySettings;
