//! # Charm Descriptor
//!
//! Typed schema of the charm deployment descriptor.
//!
//! ## Module Structure
//!
//! - `metadata.rs` - Top-level descriptor and loaders
//! - `relation.rs` - Relation endpoints and roles
//! - `container.rs` - Workload containers and their mounts
//! - `storage.rs` - Storage declarations
//! - `resource.rs` - Resource declarations (OCI images, files)
//! - `options.rs` - Configuration option schema and values
//! - `validation/` - Load-time consistency checks

mod container;
mod metadata;
mod options;
mod relation;
mod resource;
mod storage;
pub mod validation;

pub use container::{Container, Mount};
pub use metadata::CharmDescriptor;
pub(crate) use metadata::parse_document;
pub use options::{CharmConfig, ConfigOption, OptionType, OptionValue, RawConfigOption};
pub use relation::{Endpoint, Relation, RelationRole, RelationScope};
pub use resource::{Resource, ResourceType};
pub use storage::{Storage, StorageType};
pub use validation::validate_descriptor;
