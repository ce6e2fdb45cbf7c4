//! # Mimir Writer Charm
//!
//! Deployment descriptor and tooling for the Mimir Writer charm, which runs
//! the write path of the Mimir time series database on Kubernetes.
//!
//! - [`descriptor`] - typed charm descriptor (metadata, relations, containers,
//!   storage, resources, options) with load-time validation
//! - [`config`] - option defaults merged with operator overrides
//! - [`alertmanager`] - client for the Mimir Alertmanager and ruler APIs
//! - [`status`] - unit status derived from the descriptor
//!
//! ```no_run
//! use mimir_writer::descriptor::CharmDescriptor;
//! use std::path::Path;
//!
//! let charm = CharmDescriptor::from_charm_dir(Path::new("charm"))?;
//! println!("{} declares {} options", charm.name, charm.config.options.len());
//! # Ok::<(), mimir_writer::error::DescriptorError>(())
//! ```

pub mod alertmanager;
pub mod config;
pub mod constants;
pub mod descriptor;
pub mod error;
pub mod observability;
pub mod status;

pub use descriptor::CharmDescriptor;
pub use error::DescriptorError;
