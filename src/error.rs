//! # Descriptor Errors
//!
//! Structured errors raised while loading, validating and resolving a charm
//! descriptor. Every variant carries the dotted path of the offending field
//! (for example `containers.mimir-writer.mounts[1].storage`) so operators can
//! go straight to the broken line.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// What went wrong while deserializing a descriptor document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaErrorKind {
    /// A required field was absent
    MissingField(String),
    /// A field the schema does not know about
    UnknownField(String),
    /// A mapping declared the same key twice
    DuplicateKey(String),
    /// Value had the wrong type or an unknown enum variant
    InvalidType(String),
    /// Anything else reported by the YAML parser (syntax errors, etc.)
    Other(String),
}

impl fmt::Display for SchemaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaErrorKind::MissingField(field) => write!(f, "missing required field `{field}`"),
            SchemaErrorKind::UnknownField(field) => write!(f, "unknown field `{field}`"),
            SchemaErrorKind::DuplicateKey(key) => write!(f, "duplicate key `{key}`"),
            SchemaErrorKind::InvalidType(message) | SchemaErrorKind::Other(message) => {
                f.write_str(message)
            }
        }
    }
}

/// Error type for descriptor loading and option resolution
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {kind}{}", display_path(path), display_location(*line, *column))]
    Schema {
        path: String,
        kind: SchemaErrorKind,
        line: Option<usize>,
        column: Option<usize>,
    },

    #[error("{path}: {message}")]
    Validation { path: String, message: String },

    #[error("{path}: references undeclared {kind} `{target}`")]
    UnresolvedReference {
        path: String,
        kind: &'static str,
        target: String,
    },

    #[error("{path}: no such option is declared")]
    UnknownOption { path: String },

    #[error("{path}: expected {expected}, found {found}")]
    InvalidValue {
        path: String,
        expected: String,
        found: String,
    },
}

impl DescriptorError {
    /// Dotted path of the offending field, if the error is tied to one
    pub fn path(&self) -> Option<&str> {
        match self {
            DescriptorError::Io { .. } => None,
            DescriptorError::Schema { path, .. }
            | DescriptorError::Validation { path, .. }
            | DescriptorError::UnresolvedReference { path, .. }
            | DescriptorError::UnknownOption { path }
            | DescriptorError::InvalidValue { path, .. } => Some(path),
        }
    }

    pub(crate) fn validation(path: impl Into<String>, message: impl Into<String>) -> Self {
        DescriptorError::Validation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Prefix the field path, used when a sub-document (such as `config.yaml`)
    /// is merged into a larger descriptor
    #[must_use]
    pub fn nested_under(self, prefix: &str) -> Self {
        let join = |path: String| {
            if path.is_empty() {
                prefix.to_string()
            } else {
                format!("{prefix}.{path}")
            }
        };
        match self {
            DescriptorError::Schema {
                path,
                kind,
                line,
                column,
            } => DescriptorError::Schema {
                path: join(path),
                kind,
                line,
                column,
            },
            DescriptorError::Validation { path, message } => DescriptorError::Validation {
                path: join(path),
                message,
            },
            DescriptorError::UnresolvedReference { path, kind, target } => {
                DescriptorError::UnresolvedReference {
                    path: join(path),
                    kind,
                    target,
                }
            }
            DescriptorError::UnknownOption { path } => {
                DescriptorError::UnknownOption { path: join(path) }
            }
            DescriptorError::InvalidValue {
                path,
                expected,
                found,
            } => DescriptorError::InvalidValue {
                path: join(path),
                expected,
                found,
            },
            other @ DescriptorError::Io { .. } => other,
        }
    }

    /// Convert a `serde_yaml` error into a schema error with a field path
    ///
    /// `serde_yaml` renders errors as `<path>: <message> at line L column C`,
    /// where the path is omitted at the document root. The path names the
    /// mapping being deserialized, so for missing and unknown fields the field
    /// itself is appended.
    pub fn from_yaml(err: &serde_yaml::Error) -> Self {
        let (line, column) = err
            .location()
            .map_or((None, None), |loc| (Some(loc.line()), Some(loc.column())));

        let rendered = err.to_string();
        let without_location = match rendered.rsplit_once(" at line ") {
            Some((head, _)) => head.to_string(),
            None => rendered,
        };
        let (parent, message) = split_path(&without_location);

        let kind = classify(message);
        let path = match &kind {
            SchemaErrorKind::MissingField(field)
            | SchemaErrorKind::UnknownField(field)
            | SchemaErrorKind::DuplicateKey(field) => join_field(parent, field),
            SchemaErrorKind::InvalidType(_) | SchemaErrorKind::Other(_) => parent.to_string(),
        };

        DescriptorError::Schema {
            path,
            kind,
            line,
            column,
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<document>"
    } else {
        path
    }
}

fn display_location(line: Option<usize>, column: Option<usize>) -> String {
    match (line, column) {
        (Some(line), Some(column)) => format!(" (line {line}, column {column})"),
        _ => String::new(),
    }
}

/// Split `containers.x: missing field ...` into the path and the message.
/// A prefix containing whitespace is part of the message, not a path.
fn split_path(rendered: &str) -> (&str, &str) {
    match rendered.split_once(": ") {
        Some((prefix, rest)) if !prefix.is_empty() && !prefix.contains(char::is_whitespace) => {
            let prefix = if prefix == "." { "" } else { prefix };
            (prefix, rest)
        }
        _ => ("", rendered),
    }
}

/// Field-level errors are reported at the enclosing mapping's path
fn join_field(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

fn backticked(message: &str) -> Option<&str> {
    let start = message.find('`')? + 1;
    let len = message[start..].find('`')?;
    Some(&message[start..start + len])
}

fn classify(message: &str) -> SchemaErrorKind {
    if message.starts_with("missing field") {
        if let Some(field) = backticked(message) {
            return SchemaErrorKind::MissingField(field.to_string());
        }
    }
    if message.starts_with("unknown field") {
        if let Some(field) = backticked(message) {
            return SchemaErrorKind::UnknownField(field.to_string());
        }
    }
    if message.starts_with("duplicate field") {
        if let Some(field) = backticked(message) {
            return SchemaErrorKind::DuplicateKey(field.to_string());
        }
    }
    if let Some(rest) = message.strip_prefix("duplicate entry with key ") {
        return SchemaErrorKind::DuplicateKey(rest.trim_matches('"').to_string());
    }
    if message.starts_with("invalid type")
        || message.starts_with("invalid value")
        || message.starts_with("unknown variant")
    {
        return SchemaErrorKind::InvalidType(message.to_string());
    }
    SchemaErrorKind::Other(message.to_string())
}
