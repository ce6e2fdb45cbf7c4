//! # Logging
//!
//! Tracing subscriber setup for the binaries.
//!
//! `RUST_LOG` takes precedence; otherwise the filter is derived from
//! `LOG_LEVEL`. `LOG_FORMAT=json` switches to one JSON object per line.

use crate::config::OperatorConfig;
use crate::constants::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, falling back to the configured level
pub fn env_filter(config: &OperatorConfig, verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if verbose {
        "debug".to_string()
    } else {
        config.log_level.to_lowercase()
    };
    match level.as_str() {
        "info" => EnvFilter::new(DEFAULT_LOG_FILTER),
        other => EnvFilter::new(format!("mimir_writer={other},charmctl={other}")),
    }
}

/// Install the global tracing subscriber
///
/// Logs go to stderr so command output on stdout stays machine readable.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_tracing(config: &OperatorConfig, verbose: bool) {
    let filter = env_filter(config, verbose);
    let result = if config.log_format.eq_ignore_ascii_case("json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(config.log_enable_color)
            .with_writer(std::io::stderr)
            .try_init()
    };

    if let Err(e) = result {
        tracing::debug!("Tracing subscriber already initialized: {}", e);
    }
}
