//! Outbound adapters implementing domain ports.
//!
//! - **notifications**: observers of committed registry writes (broadcast
//!   channel, in-memory log, structured tracing, and fan-out)
//!
//! Adapters are thin translators from domain types to an external
//! representation. They contain no business logic.

pub mod notifications;
