//! # Configuration Options
//!
//! Typed option declarations (`config.yaml` / the `config` block of a unified
//! descriptor) and the values they can hold.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Declared type of a configuration option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    String,
    Int,
    Float,
    Boolean,
}

impl OptionType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::String => "string",
            OptionType::Int => "int",
            OptionType::Float => "float",
            OptionType::Boolean => "boolean",
        }
    }

    /// Value an option of this type takes when no default is declared
    #[must_use]
    pub fn zero_value(&self) -> OptionValue {
        match self {
            OptionType::String => OptionValue::String(String::new()),
            OptionType::Int => OptionValue::Int(0),
            OptionType::Float => OptionValue::Float(0.0),
            OptionType::Boolean => OptionValue::Boolean(false),
        }
    }

    /// Check a value against this type, widening where the conversion is lossless
    ///
    /// Integers are accepted for float options and converted. Everything else
    /// must match exactly.
    #[must_use]
    pub fn accept(&self, value: &OptionValue) -> Option<OptionValue> {
        match (self, value) {
            (OptionType::String, OptionValue::String(_))
            | (OptionType::Int, OptionValue::Int(_))
            | (OptionType::Float, OptionValue::Float(_))
            | (OptionType::Boolean, OptionValue::Boolean(_)) => Some(value.clone()),
            #[allow(clippy::cast_precision_loss, reason = "option ints are small")]
            (OptionType::Float, OptionValue::Int(i)) => Some(OptionValue::Float(*i as f64)),
            _ => None,
        }
    }

    /// Parse the textual form used on the command line (`key=value`)
    #[must_use]
    pub fn coerce_str(&self, raw: &str) -> Option<OptionValue> {
        let trimmed = raw.trim();
        match self {
            OptionType::String => Some(OptionValue::String(raw.to_string())),
            OptionType::Int => trimmed.parse().ok().map(OptionValue::Int),
            OptionType::Float => trimmed.parse().ok().map(OptionValue::Float),
            OptionType::Boolean => match trimmed.to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(OptionValue::Boolean(true)),
                "false" | "no" | "off" | "0" => Some(OptionValue::Boolean(false)),
                _ => None,
            },
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configuration value as written in YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum OptionValue {
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl OptionValue {
    /// Name of the type this value was parsed as
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Boolean(_) => "boolean",
            OptionValue::Int(_) => "int",
            OptionValue::Float(_) => "float",
            OptionValue::String(_) => "string",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Boolean(b) => write!(f, "{b}"),
            OptionValue::Int(i) => write!(f, "{i}"),
            OptionValue::Float(x) => write!(f, "{x}"),
            OptionValue::String(s) => write!(f, "{s:?}"),
        }
    }
}

/// A single user-tunable option
///
/// An option declared without a `default` takes the zero value of its type,
/// so after loading `default` is always populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(from = "RawConfigOption")]
pub struct ConfigOption {
    #[serde(rename = "type")]
    pub option_type: OptionType,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub default: OptionValue,
}

/// Wire form of [`ConfigOption`], where `default` may be absent
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RawConfigOption {
    #[serde(rename = "type")]
    option_type: OptionType,
    #[serde(default)]
    description: String,
    #[serde(default)]
    default: Option<OptionValue>,
}

impl From<RawConfigOption> for ConfigOption {
    fn from(raw: RawConfigOption) -> Self {
        // A mistyped default is kept as written so validation can report it
        let default = match raw.default {
            Some(value) => raw.option_type.accept(&value).unwrap_or(value),
            None => raw.option_type.zero_value(),
        };
        Self {
            option_type: raw.option_type,
            description: raw.description,
            default,
        }
    }
}

impl ConfigOption {
    #[must_use]
    pub fn new(option_type: OptionType, description: impl Into<String>) -> Self {
        Self {
            option_type,
            description: description.into(),
            default: option_type.zero_value(),
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: OptionValue) -> Self {
        self.default = default;
        self
    }

    /// Whether the declared default matches the declared type
    #[must_use]
    pub fn default_is_consistent(&self) -> bool {
        matches!(
            (self.option_type, &self.default),
            (OptionType::String, OptionValue::String(_))
                | (OptionType::Int, OptionValue::Int(_))
                | (OptionType::Float, OptionValue::Float(_))
                | (OptionType::Boolean, OptionValue::Boolean(_))
        )
    }
}

/// The option schema of a charm, as found in `config.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CharmConfig {
    #[serde(default)]
    pub options: BTreeMap<String, ConfigOption>,
}

impl CharmConfig {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ConfigOption> {
        self.options.get(name)
    }

    /// Default value of every declared option
    #[must_use]
    pub fn defaults(&self) -> BTreeMap<String, OptionValue> {
        self.options
            .iter()
            .map(|(name, option)| (name.clone(), option.default.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_default_takes_zero_value() {
        let config: CharmConfig = serde_yaml::from_str(
            "options:\n  a: {type: string}\n  b: {type: int}\n  c: {type: float}\n  d: {type: boolean}\n",
        )
        .expect("config should parse");

        assert_eq!(config.options["a"].default, OptionValue::String(String::new()));
        assert_eq!(config.options["b"].default, OptionValue::Int(0));
        assert_eq!(config.options["c"].default, OptionValue::Float(0.0));
        assert_eq!(config.options["d"].default, OptionValue::Boolean(false));
    }

    #[test]
    fn test_int_default_widens_for_float_option() {
        let config: CharmConfig =
            serde_yaml::from_str("options:\n  ratio: {type: float, default: 2}\n")
                .expect("config should parse");
        assert_eq!(config.options["ratio"].default, OptionValue::Float(2.0));
        assert!(config.options["ratio"].default_is_consistent());
    }

    #[test]
    fn test_mistyped_default_is_preserved_for_validation() {
        let config: CharmConfig =
            serde_yaml::from_str("options:\n  retries: {type: int, default: many}\n")
                .expect("config should parse");
        let option = &config.options["retries"];
        assert_eq!(option.default, OptionValue::String("many".to_string()));
        assert!(!option.default_is_consistent());
    }

    #[test]
    fn test_coerce_str() {
        assert_eq!(OptionType::Int.coerce_str(" 42 "), Some(OptionValue::Int(42)));
        assert_eq!(
            OptionType::Boolean.coerce_str("Yes"),
            Some(OptionValue::Boolean(true))
        );
        assert_eq!(OptionType::Float.coerce_str("abc"), None);
        assert_eq!(
            OptionType::String.coerce_str(" keep "),
            Some(OptionValue::String(" keep ".to_string()))
        );
    }
}
