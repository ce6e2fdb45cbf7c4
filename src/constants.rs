//! # Constants
//!
//! Workload ports, paths and defaults shared across the crate.

/// Mimir HTTP listen port (remote-write, ruler and alertmanager APIs)
pub const MIMIR_PORT: u16 = 9009;

/// Path remote-write clients push samples to
pub const MIMIR_PUSH_PATH: &str = "/api/v1/push";

/// Tenant used when Mimir runs without multi-tenancy
pub const DEFAULT_TENANT: &str = "anonymous";

/// Default timeout for Alertmanager API requests (seconds)
pub const DEFAULT_ALERTMANAGER_TIMEOUT_SECS: u64 = 10;

/// Default Alertmanager host
pub const DEFAULT_ALERTMANAGER_HOST: &str = "localhost";

/// Descriptor file in a charm directory
pub const METADATA_FILE_NAME: &str = "metadata.yaml";

/// Option schema file in a charm directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Option holding the Alertmanager configuration document
pub const ALERTMANAGER_CONFIG_OPTION: &str = "alertmanager_config";

/// Option holding the Alertmanager notification template
pub const ALERTMANAGER_TEMPLATE_OPTION: &str = "alertmanager_template";

/// Option holding the S3 bucket configuration
pub const S3_OPTION: &str = "s3";

/// Name under which the notification template is uploaded
pub const DEFAULT_TEMPLATE_NAME: &str = "default_template";

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "mimir_writer=info,charmctl=info";
