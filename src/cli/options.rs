//! # Options Command
//!
//! Lists the options a charm declares.

use super::DescriptorSource;
use anyhow::Result;

/// Print each option with its type, default and first description line
pub fn options_command(source: &DescriptorSource) -> Result<()> {
    let charm = source.load_with_context()?;

    if charm.config.is_empty() {
        println!("{} declares no options", charm.name);
        return Ok(());
    }

    println!("{:<24} {:<8} {:<16} DESCRIPTION", "NAME", "TYPE", "DEFAULT");
    for (name, option) in &charm.config.options {
        let summary = option.description.lines().next().unwrap_or("").trim();
        println!(
            "{:<24} {:<8} {:<16} {}",
            name,
            option.option_type.as_str(),
            option.default.to_string(),
            summary
        );
    }
    Ok(())
}
