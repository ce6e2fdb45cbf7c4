//! # Validation
//!
//! Load-time checks that a parsed descriptor is well formed and internally
//! consistent. The first problem found is returned with its field path.

mod descriptor;
mod names;
mod options;
mod references;

pub use descriptor::validate_descriptor;
pub use names::{validate_charm_name, validate_identifier, validate_option_name};
pub use options::validate_config;
pub use references::{validate_containers, validate_relations};
