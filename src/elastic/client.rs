//! Elasticsearch REST client used by the request logger.
//!
//! # Responsibilities
//! - Build one HTTP client (connection pool, TLS settings, deadline)
//! - Attach credentials to every request
//! - Submit index-document requests and classify the response

use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde_json::{Map, Value};
use url::Url;

use crate::config::schema::{ElasticLogConfig, RefreshPolicy};
use crate::elastic::types::{ElasticError, ElasticResult, IndexReceipt, LogDocument};

/// Credentials attached to every request.
#[derive(Clone)]
enum Credentials {
    ApiKey(HeaderValue),
    Basic { username: String, password: String },
}

/// Thin Elasticsearch client for index operations.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ElasticClient {
    client: reqwest::Client,
    base_url: Url,
    index: String,
    refresh: RefreshPolicy,
    credentials: Credentials,
}

impl ElasticClient {
    /// Build a client from a validated configuration.
    ///
    /// An API key wins over username/password when both are configured.
    pub fn new(config: &ElasticLogConfig) -> ElasticResult<Self> {
        let base_url: Url = config.elasticsearch_url.parse().map_err(|e| {
            ElasticError::ClientConstruction(format!(
                "Invalid Elasticsearch URL '{}': {}",
                config.elasticsearch_url, e
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ElasticError::ClientConstruction(format!(
                "Elasticsearch URL '{}' cannot be used as a base address",
                config.elasticsearch_url
            )));
        }

        let credentials = if !config.api_key.is_empty() {
            let mut value = HeaderValue::from_str(&format!("ApiKey {}", config.api_key))
                .map_err(|e| ElasticError::ClientConstruction(format!("Invalid API key: {e}")))?;
            value.set_sensitive(true);
            Credentials::ApiKey(value)
        } else {
            Credentials::Basic {
                username: config.username.clone(),
                password: config.password.clone(),
            }
        };

        let mut builder = reqwest::Client::builder();
        if !config.verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| ElasticError::ClientConstruction(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            index: config.index_name.clone(),
            refresh: config.refresh,
            credentials,
        })
    }

    /// Target index name.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// URL of the index-document endpoint for `id`.
    pub fn document_url(&self, id: &str) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([self.index.as_str(), "_doc", id]);
        }
        url.query_pairs_mut()
            .append_pair("refresh", self.refresh.as_str());
        url
    }

    /// Index one document and interpret the response.
    pub async fn index_document(&self, doc: &LogDocument) -> ElasticResult<IndexReceipt> {
        let url = self.document_url(&doc.id.to_string());

        let request = self.client.put(url).json(doc);
        let request = match &self.credentials {
            Credentials::ApiKey(value) => request.header(AUTHORIZATION, value.clone()),
            Credentials::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
        };

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ElasticError::Response { status, body });
        }

        let fields: Map<String, Value> = response.json().await.map_err(|e| {
            if e.is_decode() {
                ElasticError::Decoding(format!("Error parsing the response body: {e}"))
            } else {
                ElasticError::Transport(e)
            }
        })?;

        IndexReceipt::from_fields(status, &fields)
    }
}

impl std::fmt::Debug for ElasticClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let auth = match self.credentials {
            Credentials::ApiKey(_) => "api_key",
            Credentials::Basic { .. } => "basic",
        };
        f.debug_struct("ElasticClient")
            .field("base_url", &self.base_url.as_str())
            .field("index", &self.index)
            .field("refresh", &self.refresh)
            .field("auth", &auth)
            .finish()
    }
}
