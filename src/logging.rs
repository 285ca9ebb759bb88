//! Process-wide diagnostics setup.
//!
//! Installs a `tracing_subscriber` fmt subscriber writing to stderr, so the
//! JSON-RPC channel on stdout stays clean. `TABGEN_LOG` takes precedence over
//! the configured filter.

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "TABGEN_LOG";

/// Builds the filter from `TABGEN_LOG`, then `default_filter`, then `info`.
pub fn build_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Returns `false` if one was already set.
pub fn init(default_filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(default_filter))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}
