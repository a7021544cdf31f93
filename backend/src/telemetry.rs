//! Structured logging bootstrap.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Install a JSON `tracing` subscriber filtered by `RUST_LOG`.
///
/// A subscriber that is already installed (for example by a test harness) is
/// left in place and a warning is logged through it.
pub fn init() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}
