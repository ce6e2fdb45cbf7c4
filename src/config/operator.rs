//! # Operator Configuration
//!
//! Settings for the charm tooling itself, loaded from environment variables.

use crate::constants::{
    DEFAULT_ALERTMANAGER_HOST, DEFAULT_ALERTMANAGER_TIMEOUT_SECS, DEFAULT_TENANT, MIMIR_PORT,
    MIMIR_PUSH_PATH,
};
use std::path::PathBuf;
use std::time::Duration;

/// Tooling-level configuration
///
/// All settings have defaults and can be overridden via environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorConfig {
    /// Host running the Mimir Alertmanager and ruler APIs
    pub alertmanager_host: String,
    /// Mimir tenant rule groups are written for
    pub alertmanager_tenant: String,
    /// Alertmanager request timeout (seconds)
    pub alertmanager_timeout_secs: u64,
    /// Charm directory holding metadata.yaml and config.yaml
    pub charm_dir: PathBuf,
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE)
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: String,
    /// Enable color in text format logs
    pub log_enable_color: bool,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            alertmanager_host: DEFAULT_ALERTMANAGER_HOST.to_string(),
            alertmanager_tenant: DEFAULT_TENANT.to_string(),
            alertmanager_timeout_secs: DEFAULT_ALERTMANAGER_TIMEOUT_SECS,
            charm_dir: PathBuf::from("."),
            log_level: "INFO".to_string(),
            log_format: "text".to_string(),
            log_enable_color: true,
        }
    }
}

impl OperatorConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            alertmanager_host: env_var_or_default_str(
                "ALERTMANAGER_HOST",
                DEFAULT_ALERTMANAGER_HOST,
            ),
            alertmanager_tenant: env_var_or_default_str("ALERTMANAGER_TENANT", DEFAULT_TENANT),
            alertmanager_timeout_secs: env_var_or_default(
                "ALERTMANAGER_TIMEOUT_SECS",
                DEFAULT_ALERTMANAGER_TIMEOUT_SECS,
            ),
            charm_dir: PathBuf::from(env_var_or_default_str("CHARM_DIR", ".")),
            log_level: env_var_or_default_str("LOG_LEVEL", "INFO"),
            log_format: env_var_or_default_str("LOG_FORMAT", "text"),
            log_enable_color: env_var_or_default_bool("LOG_ENABLE_COLOR", true),
        }
    }

    /// Get Alertmanager request timeout duration
    pub fn alertmanager_timeout(&self) -> Duration {
        Duration::from_secs(self.alertmanager_timeout_secs)
    }

    /// Base URL of the Mimir HTTP API on the configured host
    pub fn mimir_base_url(&self) -> String {
        format!("http://{}:{MIMIR_PORT}", self.alertmanager_host)
    }

    /// URL remote-write clients push samples to
    pub fn remote_write_url(&self) -> String {
        format!("{}{MIMIR_PUSH_PATH}", self.mimir_base_url())
    }
}

/// Parsed variable, or the default when unset or unparseable
fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Boolean flag; any value other than true/1/yes/on reads as false
fn env_var_or_default_bool(key: &str, default: bool) -> bool {
    std::env::var(key).map_or(default, |v| {
        matches!(v.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
    })
}

fn env_var_or_default_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
