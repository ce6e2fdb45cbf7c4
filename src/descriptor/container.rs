//! # Containers
//!
//! Workload containers created next to the charm in the same pod.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A storage mount inside a workload container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Mount {
    /// Name of an entry in the charm's `storage` map
    pub storage: String,

    /// Absolute path the storage is mounted at
    pub location: String,
}

impl Mount {
    #[must_use]
    pub fn new(storage: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            storage: storage.into(),
            location: location.into(),
        }
    }
}

/// A workload container backed by an OCI image resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Container {
    /// Name of an `oci-image` entry in the charm's `resources` map
    pub resource: String,

    /// Mounts in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mounts: Vec<Mount>,
}
