//! Shared helpers for the integration tests
//!
//! Provides the rustls crypto provider setup the Alertmanager contract tests
//! need, and fixtures for the packaged charm.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Once;

static RUSTLS_INIT: Once = Once::new();

/// Initialize the rustls crypto provider once per test binary
///
/// Must run before any reqwest client is built.
pub fn init_rustls() {
    RUSTLS_INIT.call_once(|| {
        // ring matches the provider charmctl installs
        rustls::crypto::ring::default_provider()
            .install_default()
            .expect("Failed to install rustls crypto provider");
    });
}

/// The packaged charm directory at the repository root
pub fn charm_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("charm")
}

pub const METADATA_YAML: &str = include_str!("../../charm/metadata.yaml");
pub const CONFIG_YAML: &str = include_str!("../../charm/config.yaml");

/// The packaged charm in unified form, options nested under `config`
pub fn unified_descriptor_yaml() -> String {
    let mut unified = METADATA_YAML.trim_end().to_string();
    unified.push_str("\n\nconfig:\n");
    for line in CONFIG_YAML.lines() {
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        unified.push_str("  ");
        unified.push_str(line);
        unified.push('\n');
    }
    unified
}

/// Smallest document that loads
pub const MINIMAL_DESCRIPTOR: &str = "\
name: tiny
summary: A tiny charm
description: Used to exercise a single rule at a time.
";

/// Write a charm directory with the given files into a fresh temp dir
pub fn write_charm_dir(metadata: &str, config: Option<&str>) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("metadata.yaml"), metadata)
        .expect("Failed to write metadata.yaml");
    if let Some(config) = config {
        std::fs::write(dir.path().join("config.yaml"), config)
            .expect("Failed to write config.yaml");
    }
    dir
}
