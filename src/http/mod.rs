//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing and timeout layers)
//!     → middleware/elastic_log.rs (index one log document)
//!     → downstream handler (request forwarded unchanged)
//!     → response returned to the client untouched
//! ```

pub mod middleware;
pub mod server;

pub use middleware::{ElasticLogLayer, ElasticLogService, SetupError};
pub use server::{echo_app, HttpServer};
