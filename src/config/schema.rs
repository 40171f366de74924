//! Configuration schema definitions.
//!
//! [`ElasticLogConfig`] is the middleware's own configuration and uses the
//! option names the middleware is known by (`elasticsearchURL`, `indexName`,
//! ...). [`HostConfig`] wraps it together with the settings of the demo host
//! server so that both can live in one TOML file.

use serde::{Deserialize, Serialize};

/// Root configuration for the host binary.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HostConfig {
    /// Listener and request timeout settings.
    pub server: ServerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Middleware configuration.
    pub elastic: ElasticLogConfig,
}

/// Configuration of the Elasticsearch request logger.
///
/// `Default` yields the zero-valued configuration the host is expected to
/// populate before constructing the middleware. Only `refresh` and
/// `timeout_secs` carry non-zero defaults.
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ElasticLogConfig {
    /// Base URL of the Elasticsearch cluster (e.g. `http://localhost:9200`).
    #[serde(rename = "elasticsearchURL")]
    pub elasticsearch_url: String,

    /// Index the log documents are written to.
    pub index_name: String,

    /// Literal message stored in every log document.
    pub message: String,

    /// API key. Takes precedence over username/password when both are set.
    pub api_key: String,

    /// Username for basic authentication.
    pub username: String,

    /// Password for basic authentication.
    pub password: String,

    /// Verify the TLS certificate presented by Elasticsearch.
    #[serde(rename = "verifyTLS")]
    pub verify_tls: bool,

    /// Refresh policy sent with every index request.
    pub refresh: RefreshPolicy,

    /// Deadline for a single index request in seconds (0 disables it).
    pub timeout_secs: u64,
}

impl Default for ElasticLogConfig {
    fn default() -> Self {
        Self {
            elasticsearch_url: String::new(),
            index_name: String::new(),
            message: String::new(),
            api_key: String::new(),
            username: String::new(),
            password: String::new(),
            verify_tls: false,
            refresh: RefreshPolicy::default(),
            timeout_secs: 10,
        }
    }
}

// Credentials stay out of logs.
impl std::fmt::Debug for ElasticLogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticLogConfig")
            .field("elasticsearch_url", &self.elasticsearch_url)
            .field("index_name", &self.index_name)
            .field("message", &self.message)
            .field("api_key", &redact(&self.api_key))
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("verify_tls", &self.verify_tls)
            .field("refresh", &self.refresh)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

/// Elasticsearch `refresh` query parameter.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Make the document searchable immediately.
    #[default]
    True,
    /// Leave visibility to the index's refresh interval.
    False,
    /// Block until the next scheduled refresh makes the document visible.
    WaitFor,
}

impl RefreshPolicy {
    /// Value of the `refresh` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshPolicy::True => "true",
            RefreshPolicy::False => "false",
            RefreshPolicy::WaitFor => "wait_for",
        }
    }
}

/// Listener configuration of the host server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Total time a request may take, including indexing, in seconds (0 disables it).
    pub request_timeout_secs: u64,

    /// Name the middleware reports in its diagnostics.
    pub middleware_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
            middleware_name: "elastic-request-log".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log filter when `RUST_LOG` is not set.
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
