//! # Name Validation
//!
//! Naming rules for charms, endpoints, containers, storage, resources and
//! options.

use crate::error::DescriptorError;
use regex::Regex;
use std::sync::LazyLock;

/// Longest accepted charm or identifier name
pub const MAX_NAME_LENGTH: usize = 64;

// Lowercase alphanumeric segments joined by single hyphens, starting with a letter
static CHARM_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9]*(-[a-z0-9]+)*$")
        .expect("Failed to compile charm name regex - this should never happen")
});

// Same as a charm name, but segments may also be joined by underscores
static IDENTIFIER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9]*([-_][a-z0-9]+)*$")
        .expect("Failed to compile identifier regex - this should never happen")
});

fn check_length(name: &str, path: &str) -> Result<(), DescriptorError> {
    if name.is_empty() {
        return Err(DescriptorError::validation(path, "cannot be empty"));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(DescriptorError::validation(
            path,
            format!(
                "'{name}' exceeds maximum length of {MAX_NAME_LENGTH} characters (got {})",
                name.len()
            ),
        ));
    }
    Ok(())
}

/// Validate the charm name
/// Format: lowercase alphanumeric and hyphens, starting with a letter
pub fn validate_charm_name(name: &str, path: &str) -> Result<(), DescriptorError> {
    check_length(name, path)?;
    if !CHARM_NAME_REGEX.is_match(name) {
        return Err(DescriptorError::validation(
            path,
            format!(
                "'{name}' must be a valid charm name (lowercase alphanumeric and hyphens; must start with a letter; cannot end with or repeat a hyphen)"
            ),
        ));
    }
    Ok(())
}

/// Validate an endpoint, interface, container, storage or resource name
pub fn validate_identifier(name: &str, path: &str) -> Result<(), DescriptorError> {
    check_length(name, path)?;
    if !IDENTIFIER_REGEX.is_match(name) {
        return Err(DescriptorError::validation(
            path,
            format!(
                "'{name}' must be lowercase alphanumeric with '-' or '_' separators, starting with a letter"
            ),
        ));
    }
    Ok(())
}

/// Validate a configuration option name
/// Format: the charm name rule, with '_' also allowed as a separator
pub fn validate_option_name(name: &str, path: &str) -> Result<(), DescriptorError> {
    check_length(name, path)?;
    if !IDENTIFIER_REGEX.is_match(name) {
        return Err(DescriptorError::validation(
            path,
            format!(
                "'{name}' must be a valid option name (lowercase alphanumeric with '-' or '_' separators; must start with a letter)"
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_charm_name() {
        for name in ["mimir-writer-k8s", "a", "grafana-agent", "k8s"] {
            assert!(
                validate_charm_name(name, "name").is_ok(),
                "Name '{name}' should be valid"
            );
        }
        let too_long = "a".repeat(MAX_NAME_LENGTH + 1);
        for name in ["", "Mimir", "1mimir", "mimir-", "mimir--writer", "mimir_writer", too_long.as_str()] {
            assert!(
                validate_charm_name(name, "name").is_err(),
                "Name '{name}' should be invalid"
            );
        }
    }

    #[test]
    fn test_validate_identifier_allows_underscores() {
        assert!(validate_identifier("prometheus_remote_write", "x").is_ok());
        assert!(validate_identifier("receive-remote-write", "x").is_ok());
        assert!(validate_identifier("_private", "x").is_err());
        assert!(validate_identifier("with space", "x").is_err());
    }

    #[test]
    fn test_validate_option_name() {
        assert!(validate_option_name("alertmanager_config", "x").is_ok());
        assert!(validate_option_name("log-level", "x").is_ok());
        assert!(validate_option_name("log.level", "x").is_err());
        assert!(validate_option_name("logLevel", "x").is_err());
        assert!(validate_option_name("9lives", "x").is_err());
    }
}
