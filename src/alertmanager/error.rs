//! # Alertmanager Errors

use thiserror::Error;

/// Error type for Alertmanager API calls
#[derive(Debug, Error)]
pub enum AlertmanagerError {
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_yaml::Error),

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("invalid request URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

impl AlertmanagerError {
    /// Whether retrying the same request may succeed
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            AlertmanagerError::Timeout { .. } | AlertmanagerError::Transport { .. } => true,
            AlertmanagerError::Status { status, .. } => *status == 429 || *status >= 500,
            AlertmanagerError::Client(_)
            | AlertmanagerError::Encode(_)
            | AlertmanagerError::Decode { .. }
            | AlertmanagerError::InvalidUrl { .. } => false,
        }
    }

    /// HTTP status, if the server answered
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            AlertmanagerError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
