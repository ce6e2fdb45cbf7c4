//! # Reference Validation
//!
//! Checks that relation endpoints and container mounts line up with the rest
//! of the descriptor.

use super::names::validate_identifier;
use crate::descriptor::{CharmDescriptor, RelationRole, ResourceType};
use crate::error::DescriptorError;
use std::collections::{BTreeMap, BTreeSet};

/// Endpoint names Juju reserves for itself
const RESERVED_ENDPOINT_PREFIX: &str = "juju";

/// Validate relation endpoints across all three roles
///
/// Endpoint names must be unique across roles, interfaces non-empty, and only
/// `requires` endpoints may carry a connection limit.
fn is_reserved_endpoint(name: &str) -> bool {
    name == RESERVED_ENDPOINT_PREFIX
        || name
            .strip_prefix(RESERVED_ENDPOINT_PREFIX)
            .is_some_and(|rest| rest.starts_with('-'))
}

pub fn validate_relations(descriptor: &CharmDescriptor) -> Result<(), DescriptorError> {
    let mut seen: BTreeMap<&str, RelationRole> = BTreeMap::new();

    for endpoint in descriptor.endpoints() {
        let path = format!("{}.{}", endpoint.role, endpoint.name);

        validate_identifier(endpoint.name, &path)?;
        if is_reserved_endpoint(endpoint.name) {
            return Err(DescriptorError::validation(
                &path,
                format!(
                    "'{RESERVED_ENDPOINT_PREFIX}' and names starting with '{RESERVED_ENDPOINT_PREFIX}-' are reserved"
                ),
            ));
        }

        if let Some(previous) = seen.insert(endpoint.name, endpoint.role) {
            return Err(DescriptorError::validation(
                &path,
                format!(
                    "endpoint '{}' is already declared under {previous}",
                    endpoint.name
                ),
            ));
        }

        let interface = endpoint.relation.interface.trim();
        if interface.is_empty() {
            return Err(DescriptorError::validation(
                format!("{path}.interface"),
                "interface is required but is empty",
            ));
        }
        validate_identifier(interface, &format!("{path}.interface"))?;

        if endpoint.relation.limit.is_some() && endpoint.role != RelationRole::Requires {
            return Err(DescriptorError::validation(
                format!("{path}.limit"),
                format!("limit is only allowed on requires endpoints, not {}", endpoint.role),
            ));
        }
        if endpoint.relation.limit == Some(0) {
            return Err(DescriptorError::validation(
                format!("{path}.limit"),
                "limit must be at least 1",
            ));
        }
    }

    Ok(())
}

/// Validate containers, their image resources and storage mounts
pub fn validate_containers(descriptor: &CharmDescriptor) -> Result<(), DescriptorError> {
    for name in descriptor.storage.keys() {
        validate_identifier(name, &format!("storage.{name}"))?;
    }

    for (name, resource) in &descriptor.resources {
        let path = format!("resources.{name}");
        validate_identifier(name, &path)?;
        if resource.resource_type == ResourceType::File && resource.filename.is_none() {
            return Err(DescriptorError::validation(
                format!("{path}.filename"),
                "file resources must declare a filename",
            ));
        }
        if resource.resource_type == ResourceType::OciImage && resource.filename.is_some() {
            return Err(DescriptorError::validation(
                format!("{path}.filename"),
                "filename is only allowed on file resources",
            ));
        }
    }

    for (name, container) in &descriptor.containers {
        let path = format!("containers.{name}");
        validate_identifier(name, &path)?;

        let resource_path = format!("{path}.resource");
        match descriptor.resources.get(&container.resource) {
            None => {
                return Err(DescriptorError::UnresolvedReference {
                    path: resource_path,
                    kind: "resource",
                    target: container.resource.clone(),
                });
            }
            Some(resource) if resource.resource_type != ResourceType::OciImage => {
                return Err(DescriptorError::validation(
                    resource_path,
                    format!(
                        "resource '{}' is a {} resource, containers need an oci-image",
                        container.resource,
                        resource.resource_type.as_str()
                    ),
                ));
            }
            Some(_) => {}
        }

        let mut locations = BTreeSet::new();
        for (index, mount) in container.mounts.iter().enumerate() {
            let mount_path = format!("{path}.mounts[{index}]");

            if !descriptor.storage.contains_key(&mount.storage) {
                return Err(DescriptorError::UnresolvedReference {
                    path: format!("{mount_path}.storage"),
                    kind: "storage",
                    target: mount.storage.clone(),
                });
            }

            if !mount.location.starts_with('/') {
                return Err(DescriptorError::validation(
                    format!("{mount_path}.location"),
                    format!("'{}' must be an absolute path", mount.location),
                ));
            }
            if !locations.insert(mount.location.trim_end_matches('/')) {
                return Err(DescriptorError::validation(
                    format!("{mount_path}.location"),
                    format!("'{}' is already used by another mount", mount.location),
                ));
            }
        }
    }

    Ok(())
}
