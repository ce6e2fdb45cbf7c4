//! # Configuration
//!
//! - `operator` - settings of the tooling itself, from environment variables
//! - `overrides` - merging operator overrides over declared option defaults
//! - `writer` - typed view over the Mimir writer options

mod operator;
mod overrides;
mod writer;

pub use operator::OperatorConfig;
pub use overrides::{EffectiveConfig, Overrides};
pub use writer::WriterOptions;
