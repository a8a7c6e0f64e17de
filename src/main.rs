//! CivicConnect API gateway.
//!
//! Serves the mount table from configuration. The business handler groups
//! live outside this crate; the binary mounts unavailable stand-ins so the
//! admission pipeline can run on its own.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use civic_gateway::config::{load_config, validate_config, ConfigError, GatewayConfig};
use civic_gateway::lifecycle::{wait_for_signal, Shutdown};
use civic_gateway::observability::{logging, metrics};
use civic_gateway::{HandlerCatalog, HandlerGroup, HttpServer};

#[derive(Parser)]
#[command(name = "civic-gateway")]
#[command(about = "Admission pipeline and route mounts for the CivicConnect API", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability);
    tracing::info!("civic-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        mounts = config.mounts.len(),
        config_file = ?cli.config,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(err) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %err,
                "Failed to parse metrics address"
            ),
        }
    }

    let catalog = config
        .mounts
        .iter()
        .fold(HandlerCatalog::new(), |catalog, mount| {
            catalog.with(HandlerGroup::unavailable(mount.group.as_str()))
        });

    let server = HttpServer::new(config, catalog)?;

    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
