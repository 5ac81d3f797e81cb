//! Diagnostic logging setup.
//!
//! The library only emits `tracing` events. Binaries call [`init`] once to
//! print them to stderr. `RUST_LOG` takes precedence over the configured
//! filter.

use tracing_subscriber::EnvFilter;

/// Build the event filter from `RUST_LOG`, falling back to `directive`.
#[must_use]
pub fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER))
}

/// Install the global stderr subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(directive: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}
