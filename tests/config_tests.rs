//! # Option Resolution Tests
//!
//! Overrides applied to the packaged charm's options and the writer settings
//! derived from them.

mod common;

use common::charm_dir;
use mimir_writer::alertmanager::{default_alertmanager_config, DEFAULT_ALERT_TEMPLATE};
use mimir_writer::config::{EffectiveConfig, OperatorConfig, Overrides, WriterOptions};
use mimir_writer::constants::{DEFAULT_TEMPLATE_NAME, MIMIR_PORT};
use mimir_writer::descriptor::{CharmDescriptor, OptionValue};
use mimir_writer::DescriptorError;

fn packaged_charm() -> CharmDescriptor {
    CharmDescriptor::from_charm_dir(&charm_dir()).expect("charm dir should load")
}

#[test]
fn test_defaults_use_builtin_alertmanager_settings() {
    let charm = packaged_charm();
    let effective = EffectiveConfig::defaults(&charm.config);
    assert_eq!(effective.len(), 3);

    let writer = WriterOptions::from_effective(&effective).expect("defaults should be usable");
    assert_eq!(writer.alertmanager_config, default_alertmanager_config());
    assert_eq!(writer.alertmanager_template, DEFAULT_ALERT_TEMPLATE);
    assert!(!writer.uses_object_storage());
}

#[test]
fn test_s3_override_enables_object_storage() {
    let charm = packaged_charm();
    let overrides =
        Overrides::parse_pairs(["s3={endpoint: s3.local, bucket_name: metrics}"])
            .expect("pairs should parse");
    let effective =
        EffectiveConfig::resolve(&charm.config, &overrides).expect("override should apply");
    assert!(effective.is_overridden("s3"));
    assert!(!effective.is_overridden("alertmanager_config"));

    let writer = WriterOptions::from_effective(&effective).expect("s3 should parse");
    let s3 = writer.s3.expect("s3 settings");
    assert_eq!(s3["bucket_name"], "metrics");
    assert_eq!(s3["endpoint"], "s3.local");
}

#[test]
fn test_non_mapping_s3_is_rejected() {
    let charm = packaged_charm();
    let overrides = Overrides::parse_pairs(["s3=just-a-bucket"]).expect("pairs should parse");
    let effective =
        EffectiveConfig::resolve(&charm.config, &overrides).expect("override should apply");

    let err = WriterOptions::from_effective(&effective).expect_err("s3 must be a mapping");
    assert!(matches!(err, DescriptorError::InvalidValue { .. }), "got: {err:?}");
    assert_eq!(err.path(), Some("options.s3"));
}

#[test]
fn test_unknown_override_is_rejected() {
    let charm = packaged_charm();
    let overrides = Overrides::parse_pairs(["retention=30d"]).expect("pairs should parse");

    let err = EffectiveConfig::resolve(&charm.config, &overrides)
        .expect_err("undeclared options cannot be set");
    assert!(matches!(err, DescriptorError::UnknownOption { .. }), "got: {err:?}");
    assert_eq!(err.path(), Some("options.retention"));
}

#[test]
fn test_mistyped_override_is_rejected() {
    let charm = packaged_charm();
    let mut overrides = Overrides::new();
    overrides.set("s3", OptionValue::Boolean(true));

    let err = EffectiveConfig::resolve(&charm.config, &overrides)
        .expect_err("s3 is a string option");
    match err {
        DescriptorError::InvalidValue { expected, .. } => assert_eq!(expected, "string"),
        other => panic!("expected invalid value, got {other:?}"),
    }
}

#[test]
fn test_overrides_file_then_pairs() {
    let from_file = Overrides::from_yaml_str(
        "alertmanager_template: '{{ define \"x\" }}x{{ end }}'\ns3: '{bucket_name: a}'\n",
    )
    .expect("overrides file should parse");
    let from_pairs = Overrides::parse_pairs(["s3={bucket_name: b}"]).expect("pairs should parse");
    let merged = from_file.merged_with(from_pairs);

    let charm = packaged_charm();
    let effective =
        EffectiveConfig::resolve(&charm.config, &merged).expect("overrides should apply");
    let writer = WriterOptions::from_effective(&effective).expect("options should be usable");

    assert_eq!(writer.alertmanager_template, "{{ define \"x\" }}x{{ end }}");
    assert_eq!(writer.s3.expect("s3 settings")["bucket_name"], "b");
}

#[test]
fn test_empty_overrides_file() {
    let overrides = Overrides::from_yaml_str("\n").expect("empty document is no overrides");
    assert!(overrides.is_empty());
}

#[test]
fn test_overrides_file_must_be_mapping() {
    assert!(Overrides::from_yaml_str("- s3\n").is_err());
}

#[test]
fn test_alertmanager_payload_carries_template() {
    let charm = packaged_charm();
    let overrides = Overrides::parse_pairs([
        "alertmanager_config=route: {receiver: team}\nreceivers: [{name: team}]",
    ])
    .expect("pairs should parse");
    let effective =
        EffectiveConfig::resolve(&charm.config, &overrides).expect("override should apply");
    let writer = WriterOptions::from_effective(&effective).expect("options should be usable");
    let payload = writer.alertmanager_payload().expect("payload should render");

    let rendered: serde_json::Value =
        serde_yaml::from_str(&payload.alertmanager_config).expect("config should be YAML");
    assert_eq!(rendered["route"]["receiver"], "team");
    assert_eq!(
        payload.template_files.get(DEFAULT_TEMPLATE_NAME).map(String::as_str),
        Some(DEFAULT_ALERT_TEMPLATE)
    );
}

#[test]
fn test_operator_config_urls() {
    let config = OperatorConfig {
        alertmanager_host: "mimir-writer-0.mimir-writer-endpoints".to_string(),
        ..OperatorConfig::default()
    };
    assert_eq!(
        config.mimir_base_url(),
        format!("http://mimir-writer-0.mimir-writer-endpoints:{MIMIR_PORT}")
    );
    assert!(config.remote_write_url().ends_with("/api/v1/push"));
    assert_eq!(config.alertmanager_timeout().as_secs(), 10);
}
