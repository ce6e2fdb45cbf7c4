//! # Validate Command
//!
//! Loads the descriptor and prints a summary or the offending field.

use super::DescriptorSource;
use anyhow::Result;

/// Validate the descriptor and print a summary
pub fn validate_command(source: &DescriptorSource) -> Result<()> {
    match source.load() {
        Ok(charm) => {
            println!("✅ {} is a valid charm descriptor", source);
            println!();
            println!("  Name: {}", charm.name);
            println!("  Display Name: {}", charm.display_name());
            println!("  Endpoints: {}", charm.endpoints().count());
            for endpoint in charm.endpoints() {
                println!(
                    "    {:<9} {} ({})",
                    endpoint.role.as_str(),
                    endpoint.name,
                    endpoint.relation.interface
                );
            }
            println!("  Containers: {}", charm.containers.len());
            println!("  Storage: {}", charm.storage.len());
            println!("  Resources: {}", charm.resources.len());
            println!("  Options: {}", charm.config.options.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ {} is not a valid charm descriptor", source);
            if let Some(path) = e.path() {
                eprintln!("  Field: {path}");
            }
            eprintln!("  Error: {e}");
            std::process::exit(1);
        }
    }
}
