//! # Mimir Alertmanager Client
//!
//! REST client for the Alertmanager and ruler endpoints served by Mimir.
//!
//! - `POST /api/v1/alerts` - upload the Alertmanager configuration
//! - `GET /prometheus/config/v1/rules` - rule groups of every tenant
//! - `GET /prometheus/api/v1/alerts` - pending and firing alerts
//! - `POST /prometheus/config/v1/rules/{tenant}` - create or replace a rule group
//! - `DELETE /prometheus/config/v1/rules/{tenant}/{group}` - delete a rule group
//!
//! Bodies sent to Mimir are YAML; the alerts listing comes back as JSON.
//! Tenant and group names are percent-encoded as single path segments.

mod defaults;
mod error;
mod types;

pub use defaults::{default_alertmanager_config, DEFAULT_ALERT_TEMPLATE};
pub use error::AlertmanagerError;
pub use types::{
    Alert, AlertmanagerPayload, AlertsData, AlertsResponse, Rule, RuleGroup, TenantRuleGroups,
};

use crate::config::OperatorConfig;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use std::time::{Duration, Instant};
use tracing::{debug, field, info, info_span, Instrument};

/// Tenant header understood by Mimir
const TENANT_HEADER: &str = "X-Scope-OrgID";
const YAML_CONTENT_TYPE: &str = "application/yaml";

const CONFIG_PATH: [&str; 3] = ["api", "v1", "alerts"];
const RULES_PATH: [&str; 4] = ["prometheus", "config", "v1", "rules"];
const ALERTS_PATH: [&str; 4] = ["prometheus", "api", "v1", "alerts"];

/// Operations against the Mimir Alertmanager and ruler APIs
#[async_trait]
pub trait AlertmanagerApi: Send + Sync {
    /// Upload the Alertmanager configuration and templates
    async fn set_config(&self, payload: &AlertmanagerPayload) -> Result<(), AlertmanagerError>;

    /// Rule groups of every tenant; empty when Mimir has none
    async fn get_alert_rules(&self) -> Result<TenantRuleGroups, AlertmanagerError>;

    /// Pending and firing alerts
    async fn get_alerts(&self) -> Result<AlertsResponse, AlertmanagerError>;

    /// Create or replace a rule group for the client's tenant
    async fn set_alert_rule_group(&self, group: &RuleGroup) -> Result<(), AlertmanagerError>;

    /// Delete a rule group of the client's tenant by name
    async fn delete_alert_rule_group(&self, name: &str) -> Result<(), AlertmanagerError>;
}

/// HTTP client for a single Mimir instance and tenant
#[derive(Debug, Clone)]
pub struct AlertmanagerClient {
    http_client: Client,
    base_url: Url,
    tenant: String,
}

impl AlertmanagerClient {
    /// Create a client for `http://{host}:9009`
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(host: &str, tenant: &str, timeout: Duration) -> Result<Self, AlertmanagerError> {
        Self::with_base_url(
            &format!("http://{host}:{}", crate::constants::MIMIR_PORT),
            tenant,
            timeout,
        )
    }

    /// Create a client for an explicit base URL (scheme, host, port and an
    /// optional path prefix)
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse as an HTTP(S) URL or
    /// the HTTP client cannot be built.
    pub fn with_base_url(
        base_url: &str,
        tenant: &str,
        timeout: Duration,
    ) -> Result<Self, AlertmanagerError> {
        let invalid = |message: String| AlertmanagerError::InvalidUrl {
            url: base_url.to_string(),
            message,
        };
        let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("expected an http or https base URL".to_string()));
        }
        check_segment(tenant, "tenant")?;

        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AlertmanagerError::Client)?;

        debug!("Initializing Alertmanager client for {} (tenant {})", parsed, tenant);

        Ok(Self {
            http_client,
            base_url: parsed,
            tenant: tenant.to_string(),
        })
    }

    /// Create a client from the tooling configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &OperatorConfig) -> Result<Self, AlertmanagerError> {
        Self::with_base_url(
            &config.mimir_base_url(),
            &config.alertmanager_tenant,
            config.alertmanager_timeout(),
        )
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    /// Base URL extended by `fixed` and then `names`, each pushed as one
    /// encoded segment so `/`, `#` and `?` cannot change the route
    fn endpoint(&self, fixed: &[&str], names: &[&str]) -> Result<Url, AlertmanagerError> {
        for name in names {
            check_segment(name, "path segment")?;
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AlertmanagerError::InvalidUrl {
                url: self.base_url.to_string(),
                message: "base URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(fixed)
            .extend(names);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .header(TENANT_HEADER, &self.tenant)
    }

    fn yaml_request<T: serde::Serialize>(
        &self,
        method: Method,
        url: Url,
        body: &T,
    ) -> Result<RequestBuilder, AlertmanagerError> {
        let body = serde_yaml::to_string(body).map_err(AlertmanagerError::Encode)?;
        Ok(self
            .request(method, url)
            .header(reqwest::header::CONTENT_TYPE, YAML_CONTENT_TYPE)
            .body(body))
    }

    /// Send a request and return the response body of a successful call
    async fn execute(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<String, AlertmanagerError> {
        let request = request.build().map_err(AlertmanagerError::Client)?;
        let url = request.url().to_string();
        let span = info_span!(
            "alertmanager.request",
            operation = operation,
            http.method = %request.method(),
            url = %url,
            http.status = field::Empty,
            duration_ms = field::Empty,
        );

        async {
            let start = Instant::now();
            let response = self.http_client.execute(request).await.map_err(|source| {
                if source.is_timeout() {
                    AlertmanagerError::Timeout { url: url.clone() }
                } else {
                    AlertmanagerError::Transport {
                        url: url.clone(),
                        source,
                    }
                }
            })?;

            let status = response.status();
            let current = tracing::Span::current();
            current.record("http.status", status.as_u16());

            let body = response
                .text()
                .await
                .map_err(|source| AlertmanagerError::Transport {
                    url: url.clone(),
                    source,
                })?;
            #[allow(clippy::cast_possible_truncation, reason = "request durations fit in u64")]
            current.record("duration_ms", start.elapsed().as_millis() as u64);

            if !status.is_success() {
                debug!("Alertmanager {} failed with {}: {}", operation, status, body);
                return Err(AlertmanagerError::Status {
                    url,
                    status: status.as_u16(),
                    body,
                });
            }

            Ok(body)
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl AlertmanagerApi for AlertmanagerClient {
    async fn set_config(&self, payload: &AlertmanagerPayload) -> Result<(), AlertmanagerError> {
        let url = self.endpoint(&CONFIG_PATH, &[])?;
        let request = self.yaml_request(Method::POST, url, payload)?;
        self.execute("set_config", request).await?;
        info!("Uploaded Alertmanager configuration");
        Ok(())
    }

    async fn get_alert_rules(&self) -> Result<TenantRuleGroups, AlertmanagerError> {
        let url = self.endpoint(&RULES_PATH, &[])?;
        let body = self
            .execute("get_alert_rules", self.request(Method::GET, url.clone()))
            .await?;
        if body.trim().is_empty() {
            return Ok(TenantRuleGroups::new());
        }
        serde_yaml::from_str(&body).map_err(|e| AlertmanagerError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    async fn get_alerts(&self) -> Result<AlertsResponse, AlertmanagerError> {
        let url = self.endpoint(&ALERTS_PATH, &[])?;
        let body = self
            .execute("get_alerts", self.request(Method::GET, url.clone()))
            .await?;
        if body.trim().is_empty() {
            return Ok(AlertsResponse::default());
        }
        serde_json::from_str(&body).map_err(|e| AlertmanagerError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    async fn set_alert_rule_group(&self, group: &RuleGroup) -> Result<(), AlertmanagerError> {
        let url = self.endpoint(&RULES_PATH, &[self.tenant.as_str()])?;
        let request = self.yaml_request(Method::POST, url, group)?;
        self.execute("set_alert_rule_group", request).await?;
        info!("Set rule group '{}' for tenant {}", group.name, self.tenant);
        Ok(())
    }

    async fn delete_alert_rule_group(&self, name: &str) -> Result<(), AlertmanagerError> {
        let url = self.endpoint(&RULES_PATH, &[self.tenant.as_str(), name])?;
        self.execute("delete_alert_rule_group", self.request(Method::DELETE, url))
            .await?;
        info!("Deleted rule group '{}' for tenant {}", name, self.tenant);
        Ok(())
    }
}

/// Tenant and group names become single path segments; `.` and `..` would
/// be resolved away and an empty name would address the parent collection
fn check_segment(value: &str, what: &str) -> Result<(), AlertmanagerError> {
    if value.is_empty() || value == "." || value == ".." {
        return Err(AlertmanagerError::InvalidUrl {
            url: value.to_string(),
            message: format!("{what} must not be empty, '.' or '..'"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> AlertmanagerClient {
        AlertmanagerClient::with_base_url(base_url, "anonymous", Duration::from_secs(1))
            .expect("client should build")
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = client("http://mimir:9009/");
        assert_eq!(client.base_url(), "http://mimir:9009");
        let url = client.endpoint(&CONFIG_PATH, &[]).expect("url should build");
        assert_eq!(url.as_str(), "http://mimir:9009/api/v1/alerts");
    }

    #[test]
    fn test_base_url_path_prefix_is_kept() {
        let client = client("http://gateway/mimir/");
        let url = client.endpoint(&RULES_PATH, &["anonymous"]).expect("url should build");
        assert_eq!(
            url.as_str(),
            "http://gateway/mimir/prometheus/config/v1/rules/anonymous"
        );
    }

    #[test]
    fn test_rule_group_names_are_encoded_as_one_segment() {
        let client = client("http://mimir:9009");
        let cases = [
            ("a#b", "http://mimir:9009/prometheus/config/v1/rules/anonymous/a%23b"),
            ("a?b", "http://mimir:9009/prometheus/config/v1/rules/anonymous/a%3Fb"),
            (
                "x/../../../api/v1/alerts",
                "http://mimir:9009/prometheus/config/v1/rules/anonymous/x%2F..%2F..%2F..%2Fapi%2Fv1%2Falerts",
            ),
            ("high load", "http://mimir:9009/prometheus/config/v1/rules/anonymous/high%20load"),
        ];

        for (name, expected) in cases {
            let url = client
                .endpoint(&RULES_PATH, &["anonymous", name])
                .expect("url should build");
            assert_eq!(url.as_str(), expected, "group name '{name}'");
            assert!(url.fragment().is_none(), "group name '{name}' leaked a fragment");
            assert!(url.query().is_none(), "group name '{name}' leaked a query");
        }
    }

    #[test]
    fn test_dot_segments_are_rejected() {
        let client = client("http://mimir:9009");
        for name in ["", ".", ".."] {
            let err = client
                .endpoint(&RULES_PATH, &["anonymous", name])
                .expect_err("dot segments must be rejected");
            assert!(
                matches!(err, AlertmanagerError::InvalidUrl { .. }),
                "group name '{name}' gave {err:?}"
            );
        }
        assert!(AlertmanagerClient::with_base_url(
            "http://mimir:9009",
            "..",
            Duration::from_secs(1)
        )
        .is_err());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        for base in ["mimir:9009", "not a url", "mailto:ops@example.com"] {
            assert!(
                AlertmanagerClient::with_base_url(base, "anonymous", Duration::from_secs(1))
                    .is_err(),
                "base URL '{base}' should be rejected"
            );
        }
    }

    #[test]
    fn test_new_uses_mimir_port() {
        let client = AlertmanagerClient::new("localhost", "team-a", Duration::from_secs(1))
            .expect("client should build");
        assert_eq!(client.base_url(), "http://localhost:9009");
        assert_eq!(client.tenant(), "team-a");
    }

    #[test]
    fn test_rule_group_yaml_shape() {
        let group: RuleGroup = serde_yaml::from_str(
            "name: mimir\nrules:\n  - alert: HighLoad\n    expr: load > 1\n    for: 5m\n    labels:\n      severity: page\n",
        )
        .expect("group should parse");
        assert_eq!(group.rules[0].for_duration.as_deref(), Some("5m"));

        let rendered = serde_yaml::to_string(&group).expect("group should serialize");
        assert!(rendered.contains("for: 5m"), "got: {rendered}");
        assert!(!rendered.contains("record"), "got: {rendered}");
    }

    #[test]
    fn test_error_transience() {
        let server_error = AlertmanagerError::Status {
            url: "u".to_string(),
            status: 503,
            body: String::new(),
        };
        let not_found = AlertmanagerError::Status {
            url: "u".to_string(),
            status: 404,
            body: String::new(),
        };
        assert!(server_error.is_transient());
        assert!(!not_found.is_transient());
        assert_eq!(not_found.status(), Some(404));
    }
}
