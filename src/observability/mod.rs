//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Middleware and host produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (index outcome counters, latency histogram)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - One `tracing` span per request carries the middleware name
//! - Metrics are cheap (atomic increments) and no-ops without a recorder

pub mod logging;
pub mod metrics;
