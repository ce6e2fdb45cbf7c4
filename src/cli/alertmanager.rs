//! # Alertmanager Commands
//!
//! Thin wrappers over the Alertmanager client.

use super::config::load_overrides;
use super::DescriptorSource;
use anyhow::{Context, Result};
use clap::Subcommand;
use mimir_writer::alertmanager::{
    AlertmanagerApi, AlertmanagerClient, AlertmanagerPayload, RuleGroup,
};
use mimir_writer::config::{EffectiveConfig, OperatorConfig, WriterOptions};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum AlertmanagerCommand {
    /// Upload the Alertmanager configuration
    /// Without FILE, the configuration is derived from the charm options
    #[command(name = "set-config")]
    SetConfig {
        /// YAML file with a complete `alertmanager_config`/`template_files` payload
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Override a charm option before deriving the configuration (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
    /// List rule groups of every tenant
    Rules,
    /// List pending and firing alerts
    Alerts,
    /// Create or replace a rule group from a YAML file
    #[command(name = "set-rule-group")]
    SetRuleGroup {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Delete a rule group by name
    #[command(name = "delete-rule-group")]
    DeleteRuleGroup {
        #[arg(value_name = "NAME")]
        name: String,
    },
}

pub async fn alertmanager_command(
    source: &DescriptorSource,
    config: &OperatorConfig,
    command: AlertmanagerCommand,
) -> Result<()> {
    let client = AlertmanagerClient::from_config(config)
        .context("Failed to create Alertmanager client")?;

    match command {
        AlertmanagerCommand::SetConfig { file, set } => {
            let payload = match file {
                Some(path) => read_yaml::<AlertmanagerPayload>(&path)?,
                None => payload_from_charm(source, &set)?,
            };
            client
                .set_config(&payload)
                .await
                .context("Failed to upload Alertmanager configuration")?;
            println!("✅ Alertmanager configuration uploaded to {}", client.base_url());
        }
        AlertmanagerCommand::Rules => {
            let rules = client
                .get_alert_rules()
                .await
                .context("Failed to fetch rule groups")?;
            if rules.is_empty() {
                println!("No rule groups");
            }
            for (tenant, groups) in &rules {
                println!("Tenant {tenant}:");
                for group in groups {
                    println!("  {} ({} rules)", group.name, group.rules.len());
                }
            }
        }
        AlertmanagerCommand::Alerts => {
            let alerts = client
                .get_alerts()
                .await
                .context("Failed to fetch alerts")?;
            if alerts.data.alerts.is_empty() {
                println!("No alerts");
            }
            for alert in &alerts.data.alerts {
                println!(
                    "{:<8} {}",
                    alert.state,
                    alert.name().unwrap_or("<unnamed>")
                );
            }
        }
        AlertmanagerCommand::SetRuleGroup { file } => {
            let group = read_yaml::<RuleGroup>(&file)?;
            client
                .set_alert_rule_group(&group)
                .await
                .with_context(|| format!("Failed to set rule group '{}'", group.name))?;
            println!("✅ Rule group '{}' set for tenant {}", group.name, client.tenant());
        }
        AlertmanagerCommand::DeleteRuleGroup { name } => {
            client
                .delete_alert_rule_group(&name)
                .await
                .with_context(|| format!("Failed to delete rule group '{name}'"))?;
            println!("✅ Rule group '{}' deleted for tenant {}", name, client.tenant());
        }
    }
    Ok(())
}

fn payload_from_charm(source: &DescriptorSource, pairs: &[String]) -> Result<AlertmanagerPayload> {
    let charm = source.load_with_context()?;
    let overrides = load_overrides(pairs, None)?;
    let effective = EffectiveConfig::resolve(&charm.config, &overrides)
        .context("Failed to apply option overrides")?;
    let writer = WriterOptions::from_effective(&effective)
        .context("Invalid Alertmanager options")?;
    writer
        .alertmanager_payload()
        .context("Failed to render Alertmanager configuration")
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_yaml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}
