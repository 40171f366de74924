//! Demo host for the Elasticsearch request logger.
//!
//! Serves a small echo application behind the middleware:
//!
//! ```text
//! Client ──▶ trace ──▶ timeout ──▶ elastic_log ──▶ echo handler
//!                                      │
//!                                      └──▶ PUT {url}/{index}/_doc/{id}
//! ```
//!
//! Configuration comes from a TOML file (`--config`) with `[server]`,
//! `[observability]` and `[elastic]` sections. `ELASTICSEARCH_URL`,
//! `INDEX_NAME`, `ELASTIC_API_KEY`, `ELASTIC_USERNAME` and `ELASTIC_PASSWORD`
//! override the `[elastic]` values.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use elastic_request_log::config::{load_config, loader, validate_config, HostConfig};
use elastic_request_log::http::{echo_app, HttpServer};
use elastic_request_log::lifecycle::Shutdown;
use elastic_request_log::observability;

#[derive(Parser)]
#[command(name = "elastic-request-log")]
#[command(about = "Serve an echo app that logs every request to Elasticsearch", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => {
            let mut config = HostConfig::default();
            loader::apply_env_overrides(&mut config.elastic, |key| std::env::var(key).ok());
            validate_config(&config.elastic)?;
            config
        }
    };
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
    }

    observability::logging::init_tracing(&config.observability.log_level);

    tracing::info!("elastic-request-log v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.server.bind_address,
        request_timeout_secs = config.server.request_timeout_secs,
        index = %config.elastic.index_name,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    let server = HttpServer::new(config, echo_app())?;

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    shutdown.trigger_on_ctrl_c();
    server.run(listener, signal).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
