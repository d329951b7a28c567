//! `serve` command implementation.

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{info, warn};

use config_loader::ConfigLoader;
use dispatcher::Dispatcher;
use hub_client::HubClient;

use crate::cli::ServeArgs;
use crate::server;

/// Execute the `serve` command
pub async fn run_serve(args: &ServeArgs) -> Result<()> {
    let defaults = ConfigLoader::load(args.config.as_deref())
        .context("Failed to resolve hub configuration")?;

    info!(
        hub = %defaults.address,
        add_hash = defaults.add_hash,
        "Hub defaults resolved"
    );

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let (units_tx, units_rx) = mpsc::channel(args.queue_capacity);
    let dispatcher_handle = Dispatcher::new(HubClient::new(), defaults, units_rx).spawn();

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port))
        .await
        .with_context(|| format!("Failed to bind pipe endpoint on port {}", args.port))?;
    info!(port = args.port, "Pipe endpoint listening");

    axum::serve(listener, server::router(units_tx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Pipe endpoint failed")?;

    warn!("Shutdown signal received, draining dispatcher");

    // The router owned the last sender; once the server is down the
    // dispatcher sees a closed channel and finishes its in-flight units.
    dispatcher_handle
        .await
        .context("Dispatcher task panicked")?;

    info!("Hub exporter finished");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
