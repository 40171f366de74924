//! Metrics collection and exposition.
//!
//! # Metrics
//! - `elastic_log_index_total` (counter): index attempts by `outcome`
//!   (`indexed`, `rejected`, `transport_error`, `decoding_error`, `client_error`)
//! - `elastic_log_index_duration_seconds` (histogram): time spent waiting on Elasticsearch

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one index attempt.
pub fn record_index(outcome: &'static str, start: Instant) {
    counter!("elastic_log_index_total", "outcome" => outcome).increment(1);
    histogram!("elastic_log_index_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
