//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener
//! - Serve until a shutdown signal arrives

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::handlers;
use crate::http::request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
use crate::lifecycle::signals::shutdown_signal;
use crate::series::SeriesClient;

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub series: SeriesClient,
}

/// HTTP server for the feed service.
pub struct HttpServer {
    router: Router,
    config: Arc<AppConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Result<Self, reqwest::Error> {
        let series = SeriesClient::new(&config.upstream, &config.app_url)?;
        let config = Arc::new(config);

        let state = AppState {
            config: config.clone(),
            series,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        request_id = %request_id(request),
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                }),
            )
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )));

        Router::new()
            .route("/", get(handlers::usage))
            .route("/healthz", get(handlers::healthz))
            .route("/series/{id}/jsonfeed", get(handlers::series_feed))
            .with_state(state)
            .layer(middleware)
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Stops on Ctrl+C, SIGTERM, or a message on `shutdown`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        let signal = async move {
            tokio::select! {
                _ = shutdown_signal() => {}
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown requested");
                }
            }
        };

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
