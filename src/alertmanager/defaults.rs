//! # Alertmanager Defaults
//!
//! Configuration and template applied when the charm options leave them empty.

use crate::constants::DEFAULT_TEMPLATE_NAME;
use serde_json::{json, Value};

/// Notification template used when `alertmanager_template` is empty
pub const DEFAULT_ALERT_TEMPLATE: &str = r#"{{ define "__alertmanager" }}AlertManager{{ end }}
{{ define "__alertmanagerURL" }}{{ .ExternalURL }}/#/alerts?receiver={{ .Receiver | urlquery }}{{ end }}
"#;

/// Alertmanager configuration used when `alertmanager_config` is empty
///
/// Routes everything to a local dummy webhook so the Alertmanager starts with
/// a valid configuration.
pub fn default_alertmanager_config() -> Value {
    json!({
        "global": {
            "http_config": {
                "tls_config": { "insecure_skip_verify": true }
            }
        },
        "templates": [DEFAULT_TEMPLATE_NAME],
        "route": {
            "group_wait": "30s",
            "group_interval": "5m",
            "repeat_interval": "1h",
            "receiver": "dummy"
        },
        "receivers": [
            {
                "name": "dummy",
                "webhook_configs": [{ "url": "http://127.0.0.1:5001/" }]
            }
        ]
    })
}
