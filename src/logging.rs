//! Diagnostic logging setup
//!
//! Logs go to stderr so they never mix with the balance CSV on stdout.
//! `RUST_LOG` takes precedence over the level passed on the command line.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Level used when neither `RUST_LOG` nor the requested level is usable
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Build the filter for `level`, preferring `RUST_LOG` when it is set and valid
pub fn build_filter(level: &str) -> EnvFilter {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    resolve_filter(from_env.as_deref(), level)
}

/// Pick the first usable directive: the environment, then `level`, then the default
fn resolve_filter(from_env: Option<&str>, level: &str) -> EnvFilter {
    from_env
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Install the global subscriber
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(level: &str) -> Result<(), String> {
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(stderr_layer)
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))
}
