//! # Mimir Writer Options
//!
//! Typed view over the three options the Mimir writer charm declares.

use super::overrides::EffectiveConfig;
use crate::alertmanager::{default_alertmanager_config, AlertmanagerPayload, DEFAULT_ALERT_TEMPLATE};
use crate::constants::{
    ALERTMANAGER_CONFIG_OPTION, ALERTMANAGER_TEMPLATE_OPTION, DEFAULT_TEMPLATE_NAME, S3_OPTION,
};
use crate::descriptor::OptionValue;
use crate::error::DescriptorError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Resolved Mimir writer options
///
/// Empty options fall back to the built-in Alertmanager configuration and
/// template; an empty `s3` means no object storage is configured.
#[derive(Debug, Clone, PartialEq)]
pub struct WriterOptions {
    pub alertmanager_config: Value,
    pub alertmanager_template: String,
    /// S3 settings passed through to Mimir as-is
    pub s3: Option<Map<String, Value>>,
}

impl WriterOptions {
    /// Read the writer options out of an effective config
    ///
    /// # Errors
    /// `InvalidValue` if an option is not a string, or if a non-empty
    /// `alertmanager_config` or `s3` is not a YAML mapping.
    pub fn from_effective(config: &EffectiveConfig) -> Result<Self, DescriptorError> {
        let alertmanager_config = match text_option(config, ALERTMANAGER_CONFIG_OPTION)? {
            Some(text) => Value::Object(parse_mapping(ALERTMANAGER_CONFIG_OPTION, text)?),
            None => default_alertmanager_config(),
        };

        let alertmanager_template = text_option(config, ALERTMANAGER_TEMPLATE_OPTION)?
            .map_or_else(|| DEFAULT_ALERT_TEMPLATE.to_string(), str::to_string);

        let s3 = text_option(config, S3_OPTION)?
            .map(|text| parse_mapping(S3_OPTION, text))
            .transpose()?;

        Ok(Self {
            alertmanager_config,
            alertmanager_template,
            s3,
        })
    }

    #[must_use]
    pub fn uses_object_storage(&self) -> bool {
        self.s3.is_some()
    }

    /// Body for uploading the configuration through the Alertmanager API
    ///
    /// # Errors
    /// Only fails if the configuration cannot be rendered as YAML.
    pub fn alertmanager_payload(&self) -> Result<AlertmanagerPayload, serde_yaml::Error> {
        let mut template_files = BTreeMap::new();
        template_files.insert(
            DEFAULT_TEMPLATE_NAME.to_string(),
            self.alertmanager_template.clone(),
        );
        Ok(AlertmanagerPayload {
            alertmanager_config: serde_yaml::to_string(&self.alertmanager_config)?,
            template_files,
        })
    }
}

/// Non-empty string value of an option; `None` when undeclared or blank
fn text_option<'a>(
    config: &'a EffectiveConfig,
    name: &str,
) -> Result<Option<&'a str>, DescriptorError> {
    match config.get(name) {
        None => Ok(None),
        Some(OptionValue::String(text)) if text.trim().is_empty() => Ok(None),
        Some(OptionValue::String(text)) => Ok(Some(text)),
        Some(other) => Err(DescriptorError::InvalidValue {
            path: format!("options.{name}"),
            expected: "string".to_string(),
            found: other.type_name().to_string(),
        }),
    }
}

fn parse_mapping(name: &str, text: &str) -> Result<Map<String, Value>, DescriptorError> {
    let invalid = |found: String| DescriptorError::InvalidValue {
        path: format!("options.{name}"),
        expected: "a YAML mapping".to_string(),
        found,
    };
    match serde_yaml::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(invalid(format!("{} value", json_kind(&other)))),
        Err(e) => Err(invalid(format!("unparseable YAML ({e})"))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
