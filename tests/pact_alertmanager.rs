//! Pact contract tests for the Mimir Alertmanager and ruler APIs
//!
//! These tests define the contract between the charm tooling and Mimir. Each
//! test drives `AlertmanagerClient` against a Pact mock server.
//!
//! YAML request bodies are left out of the expectations; their rendering is
//! covered by the unit tests of the client and `WriterOptions`.

mod common;

use common::init_rustls;
use mimir_writer::alertmanager::{
    AlertmanagerApi, AlertmanagerClient, AlertmanagerError, AlertmanagerPayload, Rule, RuleGroup,
};
use pact_consumer::prelude::*;
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Duration;

const CONSUMER: &str = "Mimir-Writer-Charm";
const PROVIDER: &str = "Mimir-Alertmanager";
const TENANT: &str = "anonymous";

fn client_for(base_url: &str) -> AlertmanagerClient {
    AlertmanagerClient::with_base_url(base_url, TENANT, Duration::from_secs(5))
        .expect("Failed to create Alertmanager client")
}

#[tokio::test]
async fn test_set_config_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("upload the Alertmanager configuration", "", |mut i| {
        i.given("Mimir is running");
        i.request
            .method("POST")
            .path("/api/v1/alerts".to_string())
            .header("X-Scope-OrgID", TENANT)
            .header("content-type", "application/yaml");
        i.response.status(201);
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let client = client_for(mock_server.url().as_str());

    let mut template_files = BTreeMap::new();
    template_files.insert("default_template".to_string(), "{{ end }}".to_string());
    let payload = AlertmanagerPayload {
        alertmanager_config: "route:\n  receiver: dummy\n".to_string(),
        template_files,
    };

    client
        .set_config(&payload)
        .await
        .expect("set_config should succeed");
}

#[tokio::test]
async fn test_get_alert_rules_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("list rule groups of every tenant", "", |mut i| {
        i.given("tenant anonymous has a rule group named mimir");
        i.request
            .method("GET")
            .path("/prometheus/config/v1/rules".to_string())
            .header("X-Scope-OrgID", TENANT);
        i.response
            .status(200)
            .header("content-type", "application/yaml")
            .body(
                "anonymous:\n  - name: mimir\n    rules:\n      - alert: HighIngestionRate\n        expr: rate(cortex_distributor_received_samples_total[5m]) > 1000\n        for: 10m\n        labels:\n          severity: warning\n",
            );
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let client = client_for(mock_server.url().as_str());

    let rules = client
        .get_alert_rules()
        .await
        .expect("get_alert_rules should succeed");
    let groups = &rules[TENANT];
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, "mimir");
    assert_eq!(groups[0].rules[0].alert.as_deref(), Some("HighIngestionRate"));
    assert_eq!(groups[0].rules[0].for_duration.as_deref(), Some("10m"));
}

#[tokio::test]
async fn test_get_alert_rules_when_none_exist_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("list rule groups when none exist", "", |mut i| {
        i.given("no rule groups exist");
        i.request
            .method("GET")
            .path("/prometheus/config/v1/rules".to_string())
            .header("X-Scope-OrgID", TENANT);
        i.response.status(200);
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let client = client_for(mock_server.url().as_str());

    let rules = client
        .get_alert_rules()
        .await
        .expect("get_alert_rules should succeed");
    assert!(rules.is_empty());
}

#[tokio::test]
async fn test_get_alerts_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("list pending and firing alerts", "", |mut i| {
        i.given("one alert is firing");
        i.request
            .method("GET")
            .path("/prometheus/api/v1/alerts".to_string())
            .header("X-Scope-OrgID", TENANT);
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "status": "success",
                "data": {
                    "alerts": [
                        {
                            "labels": {
                                "alertname": "HighIngestionRate",
                                "severity": "warning"
                            },
                            "annotations": {},
                            "state": "firing",
                            "activeAt": "2024-01-01T00:00:00Z",
                            "value": "1.5e+03"
                        }
                    ]
                }
            }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let client = client_for(mock_server.url().as_str());

    let alerts = client.get_alerts().await.expect("get_alerts should succeed");
    assert_eq!(alerts.status, "success");
    assert_eq!(alerts.data.alerts.len(), 1);
    let alert = &alerts.data.alerts[0];
    assert_eq!(alert.name(), Some("HighIngestionRate"));
    assert!(alert.is_firing());
    assert_eq!(alert.active_at.as_deref(), Some("2024-01-01T00:00:00Z"));
}

#[tokio::test]
async fn test_set_alert_rule_group_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("create or replace a rule group", "", |mut i| {
        i.given("Mimir is running");
        i.request
            .method("POST")
            .path(format!("/prometheus/config/v1/rules/{TENANT}"))
            .header("X-Scope-OrgID", TENANT)
            .header("content-type", "application/yaml");
        i.response.status(202);
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let client = client_for(mock_server.url().as_str());

    let group = RuleGroup {
        name: "mimir".to_string(),
        interval: Some("1m".to_string()),
        rules: vec![Rule {
            alert: Some("HighIngestionRate".to_string()),
            record: None,
            expr: "rate(cortex_distributor_received_samples_total[5m]) > 1000".to_string(),
            for_duration: Some("10m".to_string()),
            labels: BTreeMap::from([("severity".to_string(), "warning".to_string())]),
            annotations: BTreeMap::new(),
        }],
    };

    client
        .set_alert_rule_group(&group)
        .await
        .expect("set_alert_rule_group should succeed");
}

#[tokio::test]
async fn test_delete_alert_rule_group_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("delete a rule group", "", |mut i| {
        i.given("tenant anonymous has a rule group named mimir");
        i.request
            .method("DELETE")
            .path(format!("/prometheus/config/v1/rules/{TENANT}/mimir"))
            .header("X-Scope-OrgID", TENANT);
        i.response.status(202);
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let client = client_for(mock_server.url().as_str());

    client
        .delete_alert_rule_group("mimir")
        .await
        .expect("delete_alert_rule_group should succeed");
}

#[tokio::test]
async fn test_delete_missing_rule_group_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("delete a rule group that does not exist", "", |mut i| {
        i.given("no rule groups exist");
        i.request
            .method("DELETE")
            .path(format!("/prometheus/config/v1/rules/{TENANT}/missing"))
            .header("X-Scope-OrgID", TENANT);
        i.response
            .status(404)
            .header("content-type", "text/plain")
            .body("group does not exist");
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let client = client_for(mock_server.url().as_str());

    let err = client
        .delete_alert_rule_group("missing")
        .await
        .expect_err("missing group should fail");
    match err {
        AlertmanagerError::Status { status, body, .. } => {
            assert_eq!(status, 404);
            assert_eq!(body, "group does not exist");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}
