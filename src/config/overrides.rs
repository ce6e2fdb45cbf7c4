//! # Option Overrides
//!
//! Merges operator-supplied values over the option defaults declared by the
//! charm. Overrides for undeclared options and values of the wrong type are
//! rejected; nothing is partially applied.

use crate::descriptor::{parse_document, CharmConfig, OptionType, OptionValue};
use crate::error::DescriptorError;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Operator-supplied option values, keyed by option name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    values: BTreeMap<String, OptionValue>,
}

impl Overrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single override, replacing any earlier value for the same option
    pub fn set(&mut self, name: impl Into<String>, value: OptionValue) -> &mut Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Drop an override so the option falls back to its default
    pub fn unset(&mut self, name: &str) -> Option<OptionValue> {
        self.values.remove(name)
    }

    /// Parse a flat YAML mapping of option names to values
    ///
    /// An empty document yields no overrides.
    ///
    /// # Errors
    /// Returns a schema error if the document is not a mapping of scalars.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DescriptorError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let values: BTreeMap<String, OptionValue> = parse_document(yaml)?;
        Ok(Self { values })
    }

    /// Parse `key=value` pairs as given on a command line
    ///
    /// Values are kept as text and coerced to the declared option type when
    /// resolved.
    ///
    /// # Errors
    /// Returns a validation error for a pair without `=` or with an empty key.
    pub fn parse_pairs<I, S>(pairs: I) -> Result<Self, DescriptorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut overrides = Self::default();
        for pair in pairs {
            let pair = pair.as_ref();
            let Some((key, value)) = pair.split_once('=') else {
                return Err(DescriptorError::validation(
                    pair,
                    "override must be written as key=value",
                ));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(DescriptorError::validation(pair, "override key is empty"));
            }
            overrides.set(key, OptionValue::String(value.to_string()));
        }
        Ok(overrides)
    }

    /// Combine two override sets; entries in `other` win
    #[must_use]
    pub fn merged_with(mut self, other: Overrides) -> Self {
        self.values.extend(other.values);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.values.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Option values after merging overrides over defaults
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    values: BTreeMap<String, OptionValue>,
    overridden: BTreeSet<String>,
}

impl EffectiveConfig {
    /// Merge `overrides` over the defaults declared in `config`
    ///
    /// # Errors
    /// `UnknownOption` for an override naming an undeclared option, and
    /// `InvalidValue` for a value that does not fit the declared type.
    pub fn resolve(config: &CharmConfig, overrides: &Overrides) -> Result<Self, DescriptorError> {
        let mut values = config.defaults();
        let mut overridden = BTreeSet::new();

        for (name, value) in overrides.iter() {
            let path = format!("options.{name}");
            let Some(option) = config.get(name) else {
                return Err(DescriptorError::UnknownOption { path });
            };

            let accepted = option
                .option_type
                .accept(value)
                .or_else(|| coerce_text(option.option_type, value))
                .ok_or_else(|| DescriptorError::InvalidValue {
                    path,
                    expected: option.option_type.to_string(),
                    found: format!("{} {value}", value.type_name()),
                })?;

            debug!(option = %name, value = %accepted, "Applying option override");
            values.insert(name.clone(), accepted);
            overridden.insert(name.clone());
        }

        Ok(Self { values, overridden })
    }

    /// Effective config with no overrides applied
    #[must_use]
    pub fn defaults(config: &CharmConfig) -> Self {
        Self {
            values: config.defaults(),
            overridden: BTreeSet::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// String value of an option; `None` if undeclared or not a string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(OptionValue::as_str)
    }

    /// Whether the value came from an override rather than the default
    #[must_use]
    pub fn is_overridden(&self, name: &str) -> bool {
        self.overridden.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.values.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Text supplied for a non-string option is parsed as that type
fn coerce_text(option_type: OptionType, value: &OptionValue) -> Option<OptionValue> {
    match (option_type, value) {
        (OptionType::String, _) => None,
        (_, OptionValue::String(text)) => option_type.coerce_str(text),
        _ => None,
    }
}
