//! # charmctl
//!
//! Command-line interface for the Mimir Writer charm descriptor and the Mimir
//! Alertmanager.
//!
//! ## Usage
//!
//! ```bash
//! # Validate the charm directory in the current working directory
//! charmctl validate
//!
//! # Validate a unified descriptor file
//! charmctl --file charm.yaml validate
//!
//! # Print the normalized descriptor
//! charmctl --dir charm show
//!
//! # List declared options and defaults
//! charmctl options
//!
//! # Resolve the effective configuration with overrides
//! charmctl config --set s3="{bucket_name: metrics}"
//!
//! # Upload the Alertmanager configuration derived from the charm options
//! charmctl alertmanager set-config
//!
//! # List rule groups and firing alerts
//! charmctl alertmanager rules
//! charmctl alertmanager alerts
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mimir_writer::config::OperatorConfig;
use mimir_writer::descriptor::CharmDescriptor;
use mimir_writer::observability::init_tracing;
use std::path::PathBuf;

mod alertmanager;
mod config;
mod options;
mod show;
mod status;
mod validate;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILD_GIT_HASH"),
    ", built ",
    env!("BUILD_DATETIME"),
    ")"
);

/// Mimir Writer charm tooling
#[derive(Parser)]
#[command(name = "charmctl", version, long_version = LONG_VERSION)]
#[command(
    about = "Validate and inspect the Mimir Writer charm and manage its Alertmanager",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Charm directory containing metadata.yaml and config.yaml (default: $CHARM_DIR or .)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// Unified descriptor file; takes precedence over --dir
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the descriptor and report whether it is valid
    Validate,
    /// Print the normalized descriptor as YAML
    Show,
    /// List declared configuration options with their types and defaults
    Options,
    /// Print the effective configuration after applying overrides
    Config {
        /// Override an option (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// YAML file with a mapping of option overrides
        #[arg(long, value_name = "FILE")]
        overrides: Option<PathBuf>,
    },
    /// Show the unit status the charm would report
    Status,
    /// Interact with the Mimir Alertmanager and ruler APIs
    Alertmanager {
        #[command(subcommand)]
        command: alertmanager::AlertmanagerCommand,
    },
}

/// Where the descriptor is loaded from
#[derive(Debug, Clone)]
pub(crate) enum DescriptorSource {
    File(PathBuf),
    Dir(PathBuf),
}

impl DescriptorSource {
    fn resolve(cli: &Cli, config: &OperatorConfig) -> Self {
        match (&cli.file, &cli.dir) {
            (Some(file), _) => DescriptorSource::File(file.clone()),
            (None, Some(dir)) => DescriptorSource::Dir(dir.clone()),
            (None, None) => DescriptorSource::Dir(config.charm_dir.clone()),
        }
    }

    pub(crate) fn load(&self) -> Result<CharmDescriptor, mimir_writer::DescriptorError> {
        match self {
            DescriptorSource::File(path) => CharmDescriptor::from_path(path),
            DescriptorSource::Dir(dir) => CharmDescriptor::from_charm_dir(dir),
        }
    }

    pub(crate) fn load_with_context(&self) -> Result<CharmDescriptor> {
        self.load()
            .with_context(|| format!("Failed to load charm descriptor from {self}"))
    }
}

impl std::fmt::Display for DescriptorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DescriptorSource::File(path) | DescriptorSource::Dir(path) => {
                write!(f, "{}", path.display())
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install the ring provider before any TLS-capable client is built
    rustls::crypto::ring::default_provider()
        .install_default()
        .unwrap_or_else(|_| panic!("Failed to install rustls crypto provider"));

    let cli = Cli::parse();
    let operator_config = OperatorConfig::from_env();
    init_tracing(&operator_config, cli.verbose);

    let source = DescriptorSource::resolve(&cli, &operator_config);

    match cli.command {
        Commands::Validate => validate::validate_command(&source),
        Commands::Show => show::show_command(&source),
        Commands::Options => options::options_command(&source),
        Commands::Config { set, overrides } => {
            config::config_command(&source, &set, overrides.as_deref())
        }
        Commands::Status => status::status_command(&source, &operator_config),
        Commands::Alertmanager { command } => {
            alertmanager::alertmanager_command(&source, &operator_config, command).await
        }
    }
}
