//! # Relations
//!
//! Relation endpoints a charm provides, requires, or shares with its peers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a relation an endpoint sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelationRole {
    Provides,
    Requires,
    Peers,
}

impl RelationRole {
    pub const ALL: [RelationRole; 3] = [
        RelationRole::Provides,
        RelationRole::Requires,
        RelationRole::Peers,
    ];

    /// Key under which endpoints of this role are declared
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationRole::Provides => "provides",
            RelationRole::Requires => "requires",
            RelationRole::Peers => "peers",
        }
    }
}

impl fmt::Display for RelationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scope of a relation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RelationScope {
    #[default]
    Global,
    Container,
}

impl RelationScope {
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, RelationScope::Global)
    }
}

/// A relation endpoint declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Relation {
    /// Interface name both ends of the relation must agree on
    pub interface: String,

    /// Maximum number of connections to this endpoint (requires only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Informational: whether the charm can run without this relation
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,

    /// Unset reads as `global` and is left out when serialized
    #[serde(default, skip_serializing_if = "RelationScope::is_global")]
    pub scope: RelationScope,
}

impl Relation {
    #[must_use]
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            limit: None,
            optional: false,
            scope: RelationScope::Global,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// An endpoint together with the role and name it was declared under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint<'a> {
    pub role: RelationRole,
    pub name: &'a str,
    pub relation: &'a Relation,
}
