//! Elasticsearch request-logging middleware.
//!
//! Every request passing through [`ElasticLogService`] first indexes one
//! [`LogDocument`] carrying the configured message, then continues to the
//! wrapped service with the request untouched. Indexing failures are logged
//! and never change the response the client receives.

use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::http::Request;
use futures_util::future::BoxFuture;
use thiserror::Error;
use tower::{Layer, Service};
use tracing::Instrument;

use crate::config::schema::ElasticLogConfig;
use crate::config::validation::{validate_config, ConfigurationError};
use crate::elastic::{ElasticClient, ElasticError, LogDocument};
use crate::observability::metrics;

/// Errors returned while building the middleware.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Client(#[from] ElasticError),
}

/// State shared read-only by all service clones.
#[derive(Debug)]
struct Shared {
    name: String,
    message: String,
    client: ElasticClient,
}

impl Shared {
    fn new(config: ElasticLogConfig, name: String) -> Result<Self, SetupError> {
        validate_config(&config)?;
        let client = ElasticClient::new(&config)?;

        tracing::info!(
            name = %name,
            elasticsearch_url = %config.elasticsearch_url,
            index = %config.index_name,
            verify_tls = config.verify_tls,
            refresh = config.refresh.as_str(),
            "Elasticsearch request logger configured"
        );

        Ok(Self {
            name,
            message: config.message,
            client,
        })
    }

    /// Index one document for the current request and log the outcome.
    async fn log_request(&self) {
        let doc = LogDocument::new(self.message.as_str());
        let start = Instant::now();

        match self.client.index_document(&doc).await {
            Ok(receipt) => {
                metrics::record_index("indexed", start);
                tracing::info!(
                    status = receipt.status.as_u16(),
                    result = %receipt.result,
                    version = receipt.version,
                    "{}",
                    receipt
                );
            }
            Err(ElasticError::Response { status, body }) => {
                metrics::record_index("rejected", start);
                tracing::warn!(
                    index = %self.client.index(),
                    status = status.as_u16(),
                    body = %body,
                    "[{}] Error indexing document",
                    status
                );
            }
            Err(ElasticError::Decoding(reason)) => {
                metrics::record_index("decoding_error", start);
                tracing::error!(
                    index = %self.client.index(),
                    error = %reason,
                    "Error parsing the response body"
                );
            }
            Err(e) => {
                metrics::record_index(e.outcome(), start);
                tracing::error!(
                    index = %self.client.index(),
                    error = %e,
                    "Failed to index request log"
                );
            }
        }
    }
}

/// Tower layer installing [`ElasticLogService`] in front of a service.
///
/// The Elasticsearch client is built once here and shared by every service
/// the layer produces.
#[derive(Clone, Debug)]
pub struct ElasticLogLayer {
    shared: Arc<Shared>,
}

impl ElasticLogLayer {
    /// Validate `config` and build the Elasticsearch client.
    ///
    /// `name` identifies this middleware instance in diagnostics only.
    pub fn new(config: ElasticLogConfig, name: impl Into<String>) -> Result<Self, SetupError> {
        Ok(Self {
            shared: Arc::new(Shared::new(config, name.into())?),
        })
    }

    /// Name given at construction.
    pub fn name(&self) -> &str {
        &self.shared.name
    }
}

impl<S> Layer<S> for ElasticLogLayer {
    type Service = ElasticLogService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ElasticLogService {
            inner,
            shared: self.shared.clone(),
        }
    }
}

/// Service that indexes a log document, then forwards to `inner`.
#[derive(Clone, Debug)]
pub struct ElasticLogService<S> {
    inner: S,
    shared: Arc<Shared>,
}

impl<S> ElasticLogService<S> {
    /// Build the middleware directly around `next`.
    pub fn new(
        next: S,
        config: ElasticLogConfig,
        name: impl Into<String>,
    ) -> Result<Self, SetupError> {
        Ok(ElasticLogLayer::new(config, name)?.layer(next))
    }

    /// Name given at construction.
    pub fn name(&self) -> &str {
        &self.shared.name
    }
}

impl<S, B> Service<Request<B>> for ElasticLogService<S>
where
    S: Service<Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        // Take the service that was driven to readiness, leave a fresh clone behind
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let shared = self.shared.clone();

        let span = tracing::debug_span!(
            "elastic_log",
            name = %shared.name,
            method = %request.method(),
            uri = %request.uri(),
        );

        // Indexing lives inside the returned future: dropping it cancels the request to Elasticsearch
        Box::pin(
            async move {
                shared.log_request().await;
                inner.call(request).await
            }
            .instrument(span),
        )
    }
}
