//! # Charm Descriptor
//!
//! The top-level descriptor: identity, relation surface, container and
//! storage topology, and the option schema.
//!
//! A descriptor is loaded either from a single unified document (options under
//! `config.options`) or from a charm directory holding `metadata.yaml` and an
//! optional `config.yaml`. Loading is all-or-nothing: the document is parsed,
//! validated, and only then returned.

use super::container::Container;
use super::options::{CharmConfig, OptionValue};
use super::relation::{Endpoint, Relation, RelationRole};
use super::resource::Resource;
use super::storage::Storage;
use super::validation::validate_descriptor;
use crate::constants::{CONFIG_FILE_NAME, METADATA_FILE_NAME};
use crate::error::DescriptorError;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// A charm deployment descriptor
///
/// # Example
///
/// ```yaml
/// name: mimir-writer-k8s
/// summary: Write path of Mimir
/// description: Ingests metrics into long term storage.
/// containers:
///   mimir-writer:
///     resource: mimir-writer-image
///     mounts:
///       - storage: config
///         location: /etc/mimir
/// storage:
///   config:
///     type: filesystem
/// resources:
///   mimir-writer-image:
///     type: oci-image
///     upstream-source: grafana/mimir:2.0.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct CharmDescriptor {
    /// Charm name, used as the default application name at deploy time
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// One-line summary
    pub summary: String,

    pub description: String,

    /// Maintainers in the form "Name <email>"
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maintainers: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Terms a user must accept before deploying
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub terms: Vec<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub subordinate: bool,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub provides: BTreeMap<String, Relation>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub requires: BTreeMap<String, Relation>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub peers: BTreeMap<String, Relation>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub containers: BTreeMap<String, Container>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub storage: BTreeMap<String, Storage>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, Resource>,

    /// Option schema. In a charm directory this comes from `config.yaml`.
    #[serde(default, skip_serializing_if = "CharmConfig::is_empty")]
    pub config: CharmConfig,
}

impl CharmDescriptor {
    /// Parse and validate a unified descriptor document
    ///
    /// # Errors
    /// Returns a schema error for malformed YAML, unknown or missing fields and
    /// wrong types, or a validation error if the document is inconsistent.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DescriptorError> {
        let descriptor = Self::parse(yaml)?;
        validate_descriptor(&descriptor)?;
        Ok(descriptor)
    }

    /// Read, parse and validate a unified descriptor file
    ///
    /// # Errors
    /// Fails if the file cannot be read or the document does not load.
    pub fn from_path(path: &Path) -> Result<Self, DescriptorError> {
        debug!("Loading charm descriptor from {}", path.display());
        let contents = read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Load a packaged charm directory
    ///
    /// Reads `metadata.yaml` and, if present, `config.yaml`. Declaring options
    /// in both places is rejected.
    ///
    /// # Errors
    /// Fails if `metadata.yaml` is missing, either file does not parse, or the
    /// merged descriptor does not validate.
    pub fn from_charm_dir(dir: &Path) -> Result<Self, DescriptorError> {
        let metadata_path = dir.join(METADATA_FILE_NAME);
        let config_path = dir.join(CONFIG_FILE_NAME);

        let mut descriptor = Self::parse(&read_to_string(&metadata_path)?)?;

        if config_path.is_file() {
            if !descriptor.config.is_empty() {
                return Err(DescriptorError::validation(
                    "config",
                    format!("options are declared in both {METADATA_FILE_NAME} and {CONFIG_FILE_NAME}"),
                ));
            }
            let contents = read_to_string(&config_path)?;
            descriptor.config = parse_document::<CharmConfig>(&contents)
                .map_err(|e| e.nested_under("config"))?;
        } else {
            debug!("No {} in {}, charm has no options", CONFIG_FILE_NAME, dir.display());
        }

        validate_descriptor(&descriptor)?;
        info!(
            charm = %descriptor.name,
            endpoints = descriptor.endpoints().count(),
            options = descriptor.config.options.len(),
            "Loaded charm descriptor from {}",
            dir.display()
        );
        Ok(descriptor)
    }

    fn parse(yaml: &str) -> Result<Self, DescriptorError> {
        parse_document(yaml)
    }

    /// Serialize back to YAML in unified form
    ///
    /// # Errors
    /// Only fails if serialization itself fails.
    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Endpoint map for a role
    #[must_use]
    pub fn relations(&self, role: RelationRole) -> &BTreeMap<String, Relation> {
        match role {
            RelationRole::Provides => &self.provides,
            RelationRole::Requires => &self.requires,
            RelationRole::Peers => &self.peers,
        }
    }

    /// Every relation endpoint, grouped by role in declaration-key order
    pub fn endpoints(&self) -> impl Iterator<Item = Endpoint<'_>> {
        RelationRole::ALL.into_iter().flat_map(move |role| {
            self.relations(role)
                .iter()
                .map(move |(name, relation)| Endpoint {
                    role,
                    name,
                    relation,
                })
        })
    }

    /// Look up an endpoint by name regardless of role
    #[must_use]
    pub fn endpoint(&self, name: &str) -> Option<Endpoint<'_>> {
        self.endpoints().find(|endpoint| endpoint.name == name)
    }

    /// Default value of every option, keyed by option name
    #[must_use]
    pub fn option_defaults(&self) -> BTreeMap<String, OptionValue> {
        self.config.defaults()
    }

    /// Human-facing name, falling back to the charm name
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Deserialize a YAML document, rejecting duplicate mapping keys
///
/// Typed maps keep the last of two equal keys, so the document is first read
/// as an untyped value, which does not.
pub(crate) fn parse_document<T: DeserializeOwned>(yaml: &str) -> Result<T, DescriptorError> {
    serde_yaml::from_str::<serde_yaml::Value>(yaml).map_err(|e| DescriptorError::from_yaml(&e))?;
    serde_yaml::from_str(yaml).map_err(|e| DescriptorError::from_yaml(&e))
}

fn read_to_string(path: &Path) -> Result<String, DescriptorError> {
    std::fs::read_to_string(path).map_err(|source| DescriptorError::Io {
        path: path.to_path_buf(),
        source,
    })
}
