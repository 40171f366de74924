//! Elasticsearch integration subsystem.
//!
//! # Data Flow
//! ```text
//! ElasticLogConfig (validated)
//!     → client.rs (HTTP client, credentials, TLS, deadline; built once)
//!     → types.rs (LogDocument per request)
//!     → PUT {url}/{index}/_doc/{id}?refresh=...
//!     → types.rs (IndexReceipt or ElasticError)
//! ```
//!
//! # Constraints
//! - Credentials are never logged
//! - Every failure is returned as a value; nothing here panics or exits

pub mod client;
pub mod types;

pub use client::ElasticClient;
pub use types::{ElasticError, ElasticResult, IndexReceipt, LogDocument};
