//! This module installs a global subscriber that prints diagnostics to
//! standard error.
use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Installs a `tracing_subscriber` fmt subscriber writing to stderr.
///
/// The filter comes from `RUST_LOG`; if it is unset or invalid,
/// `default_directives` is used instead (for example `"jsonlog=warn"`).
///
/// # Errors
///
/// Returns an error if the directives cannot be parsed or a global default
/// subscriber has already been set.
pub fn init_stderr(default_directives: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives)
            .map_err(|e| anyhow!("Invalid filter '{}': {}", default_directives, e))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to install diagnostic subscriber: {}", e))
}
