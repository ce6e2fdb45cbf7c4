//! # Storage
//!
//! Named volumes the orchestration runtime provisions for each unit.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StorageType {
    Filesystem,
}

/// A storage declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Storage {
    #[serde(rename = "type")]
    pub storage_type: StorageType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Default mount location on the charm container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Minimum size, e.g. `1G`. Without a suffix, megabytes are implied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_size: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub shared: bool,
}

impl Storage {
    #[must_use]
    pub fn filesystem() -> Self {
        Self {
            storage_type: StorageType::Filesystem,
            description: None,
            location: None,
            minimum_size: None,
            read_only: false,
            shared: false,
        }
    }
}
