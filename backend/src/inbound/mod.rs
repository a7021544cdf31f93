//! Inbound adapters that translate external call descriptions into domain
//! service calls while keeping format details at the edge.
//!
//! The call-script adapter lives under [`script`]; a host runtime that
//! dispatches calls directly would sit alongside it.

pub mod script;
