//! # Resources
//!
//! External artifacts (container images, files) that accompany the charm.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceType {
    OciImage,
    File,
}

impl ResourceType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::OciImage => "oci-image",
            ResourceType::File => "file",
        }
    }
}

/// A resource declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Resource {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Image reference tools use when no revision has been attached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_source: Option<String>,

    /// File name on disk (file resources only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl Resource {
    #[must_use]
    pub fn oci_image(upstream_source: impl Into<String>) -> Self {
        Self {
            resource_type: ResourceType::OciImage,
            description: None,
            upstream_source: Some(upstream_source.into()),
            filename: None,
        }
    }
}
