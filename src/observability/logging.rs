//! Structured logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset, built from the configured level.
pub fn default_filter(log_level: &str) -> String {
    format!("elastic_request_log={log_level},tower_http={log_level}")
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `log_level`. Calling this twice is
/// harmless; the second installation is ignored.
pub fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(log_level).into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
