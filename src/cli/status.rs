//! # Status Command

use super::DescriptorSource;
use anyhow::Result;
use mimir_writer::config::OperatorConfig;
use mimir_writer::status::UnitStatus;

/// Print the unit status the charm reports for the current descriptor
pub fn status_command(source: &DescriptorSource, config: &OperatorConfig) -> Result<()> {
    let result = source.load();
    let status = UnitStatus::from_descriptor_check(&result);

    println!("Unit status: {status}");
    if let Ok(charm) = &result {
        println!("Charm: {} ({})", charm.display_name(), charm.name);
        if charm.provides.contains_key("receive-remote-write") {
            println!("Remote write: {}", config.remote_write_url());
        }
    }

    if !status.is_active() {
        std::process::exit(1);
    }
    Ok(())
}
