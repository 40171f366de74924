//! Host server running the request logger in front of an application.
//!
//! # Responsibilities
//! - Wrap an Axum `Router` with the Elasticsearch request logger
//! - Wire up the remaining middleware (tracing, request timeout)
//! - Serve on a listener until the shutdown signal fires

use axum::{
    extract::Request,
    routing::any,
    Router,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{HostConfig, ServerConfig};
use crate::http::middleware::{ElasticLogLayer, SetupError};

/// HTTP server hosting an application behind the request logger.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Build the server around `app`.
    ///
    /// Fails if the `[elastic]` section does not describe a usable
    /// middleware; the server is never started half-configured.
    pub fn new(config: HostConfig, app: Router) -> Result<Self, SetupError> {
        let layer = ElasticLogLayer::new(config.elastic, config.server.middleware_name.as_str())?;
        let router = Self::build_router(&config.server, app, layer);
        Ok(Self {
            router,
            config: config.server,
        })
    }

    /// Layer order, outermost first: trace → timeout → request logger → app.
    ///
    /// A `request_timeout_secs` of 0 disables the timeout layer.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, app: Router, layer: ElasticLogLayer) -> Router {
        let router = app.layer(layer);
        let router = if config.request_timeout_secs > 0 {
            router.layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
        } else {
            router
        };
        router.layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the server config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The fully layered router, for driving the server without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Application served by the host binary: answers every request with its
/// method and path.
pub fn echo_app() -> Router {
    Router::new()
        .route("/", any(echo_handler))
        .route("/{*path}", any(echo_handler))
}

async fn echo_handler(request: Request) -> String {
    format!("{} {}\n", request.method(), request.uri().path())
}
