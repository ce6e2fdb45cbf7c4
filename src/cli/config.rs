//! # Config Command
//!
//! Resolves the effective configuration for a set of overrides.

use super::DescriptorSource;
use anyhow::{Context, Result};
use mimir_writer::config::{EffectiveConfig, Overrides, WriterOptions};
use std::path::Path;

/// Load overrides from `--overrides FILE` followed by `--set` pairs
pub(crate) fn load_overrides(pairs: &[String], file: Option<&Path>) -> Result<Overrides> {
    let from_file = match file {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read overrides file {}", path.display()))?;
            Overrides::from_yaml_str(&contents)
                .with_context(|| format!("Invalid overrides file {}", path.display()))?
        }
        None => Overrides::new(),
    };
    let from_pairs = Overrides::parse_pairs(pairs).context("Invalid --set override")?;
    Ok(from_file.merged_with(from_pairs))
}

/// Print the effective value of every option
pub fn config_command(
    source: &DescriptorSource,
    pairs: &[String],
    overrides_file: Option<&Path>,
) -> Result<()> {
    let charm = source.load_with_context()?;
    let overrides = load_overrides(pairs, overrides_file)?;
    let effective = EffectiveConfig::resolve(&charm.config, &overrides)
        .context("Failed to apply option overrides")?;

    for (name, value) in effective.iter() {
        let marker = if effective.is_overridden(name) {
            " (set)"
        } else {
            ""
        };
        println!("{name}: {value}{marker}");
    }

    // Surface option contents the writer would reject later
    let writer = WriterOptions::from_effective(&effective)
        .context("Options are not usable by the Mimir writer")?;
    println!();
    println!(
        "Object storage: {}",
        if writer.uses_object_storage() {
            "s3"
        } else {
            "filesystem"
        }
    );
    Ok(())
}
