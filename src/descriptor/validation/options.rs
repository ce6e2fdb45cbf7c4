//! # Option Validation

use super::names::validate_option_name;
use crate::descriptor::CharmConfig;
use crate::error::DescriptorError;

/// Validate option names and that each default matches its declared type
pub fn validate_config(config: &CharmConfig) -> Result<(), DescriptorError> {
    for (name, option) in &config.options {
        let path = format!("config.options.{name}");
        validate_option_name(name, &path)?;

        if !option.default_is_consistent() {
            return Err(DescriptorError::InvalidValue {
                path: format!("{path}.default"),
                expected: option.option_type.to_string(),
                found: option.default.type_name().to_string(),
            });
        }
    }
    Ok(())
}
