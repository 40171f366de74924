//! Elasticsearch request logging middleware for Tower and Axum.
//!
//! Each request passing through [`ElasticLogLayer`] writes one document with a
//! fixed message into an Elasticsearch index, then continues to the next
//! service with the request unchanged.
//!
//! ```rust,no_run
//! use axum::{routing::get, Router};
//! use elastic_request_log::{ElasticLogConfig, ElasticLogLayer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = ElasticLogConfig::default();
//! config.elasticsearch_url = "http://localhost:9200".into();
//! config.index_name = "access-log".into();
//! config.message = "request received".into();
//! config.api_key = "base64-api-key".into();
//!
//! let app: Router = Router::new()
//!     .route("/", get(|| async { "hello" }))
//!     .layer(ElasticLogLayer::new(config, "access-log")?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod elastic;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::{ConfigurationError, ElasticLogConfig, RefreshPolicy};
pub use elastic::{ElasticClient, ElasticError, IndexReceipt, LogDocument};
pub use http::{ElasticLogLayer, ElasticLogService, HttpServer, SetupError};
pub use lifecycle::Shutdown;
