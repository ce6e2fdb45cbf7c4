//! # Show Command

use super::DescriptorSource;
use anyhow::{Context, Result};

/// Print the normalized descriptor in unified form
pub fn show_command(source: &DescriptorSource) -> Result<()> {
    let charm = source.load_with_context()?;
    let yaml = charm
        .to_yaml_string()
        .context("Failed to serialize charm descriptor")?;
    print!("{yaml}");
    Ok(())
}
