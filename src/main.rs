use std::net::SocketAddr;
use std::path::Path;

use tokio::net::TcpListener;

use nicoseriesfeed::config::{load_config, load_env_file, ConfigError};
use nicoseriesfeed::observability::{logging, metrics};
use nicoseriesfeed::{HttpServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional, but a broken one stops startup.
    load_env_file(Path::new(".env"))?;

    logging::init();

    let config = match load_config() {
        Ok(config) => config,
        Err(ConfigError::Args(e)) => e.exit(),
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address(),
        app_url = %config.app_url,
        upstream_timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );

    if let Some(addr) = &config.observability.metrics_address {
        let addr: SocketAddr = addr.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // Dropping the handle stops the server; keep it alive until run returns.
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
