//! # Descriptor Validation
//!
//! Orchestrates the individual checks for a whole descriptor.

use super::names::validate_charm_name;
use super::options::validate_config;
use super::references::{validate_containers, validate_relations};
use crate::descriptor::CharmDescriptor;
use crate::error::DescriptorError;
use tracing::debug;

/// Validate a parsed descriptor
///
/// Checks required fields, naming rules, relation endpoints, container
/// references and option defaults, in that order.
pub fn validate_descriptor(descriptor: &CharmDescriptor) -> Result<(), DescriptorError> {
    validate_charm_name(&descriptor.name, "name")?;

    if descriptor.summary.trim().is_empty() {
        return Err(DescriptorError::validation(
            "summary",
            "summary is required but is empty",
        ));
    }
    if descriptor.description.trim().is_empty() {
        return Err(DescriptorError::validation(
            "description",
            "description is required but is empty",
        ));
    }
    if let Some(display_name) = &descriptor.display_name {
        if display_name.trim().is_empty() {
            return Err(DescriptorError::validation(
                "display-name",
                "display-name cannot be empty when set",
            ));
        }
    }
    for (index, maintainer) in descriptor.maintainers.iter().enumerate() {
        if maintainer.trim().is_empty() {
            return Err(DescriptorError::validation(
                format!("maintainers[{index}]"),
                "maintainer cannot be empty",
            ));
        }
    }

    validate_relations(descriptor)?;
    validate_containers(descriptor)?;
    validate_config(&descriptor.config)?;

    debug!(charm = %descriptor.name, "Descriptor passed validation");
    Ok(())
}
