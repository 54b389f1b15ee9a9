//! Versioned API server with startup route discovery.
//!
//! Startup order: arguments → config → logging → metrics → registry →
//! mount pass → signal handling → listen. A failed mount pass aborts
//! startup; nothing is served.

use std::path::PathBuf;

use clap::Parser;

use dynamic_router::config::{load_config, ServerConfig};
use dynamic_router::http::HttpServer;
use dynamic_router::lifecycle::{shutdown_on_signal, Shutdown};
use dynamic_router::observability::{init_logging, init_metrics};
use dynamic_router::routes::builtin_registry;
use dynamic_router::routing::RouteMounter;

#[derive(Parser)]
#[command(name = "dynamic-router")]
#[command(about = "Versioned API server with startup route discovery", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured listen port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the configured routes directory.
    #[arg(long)]
    routes_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(port) = args.port {
        config.listener.port = port;
    }
    if let Some(dir) = args.routes_dir {
        config.routes.dir = dir;
    }

    init_logging(&config.observability);

    tracing::info!(
        bind_host = %config.listener.bind_host,
        port = config.listener.port,
        routes_dir = %config.routes.dir.display(),
        api_version = %config.routes.api_version,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let mut server = HttpServer::new(config.clone());
    let mounter = RouteMounter::new(builtin_registry());
    if let Err(e) = mounter
        .mount(&mut server, &config.routes.dir, &config.routes.api_version)
        .await
    {
        tracing::error!(error = %e, "Route mounting failed, aborting startup");
        return Err(e.into());
    }
    tracing::info!(routes = server.mount_paths().len(), "Mount pass complete");

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    let mut server_errors = server.start(config.listener.port, shutdown.subscribe());
    if let Some(e) = server_errors.recv().await {
        tracing::error!(error = %e, "Server failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
