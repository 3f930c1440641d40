//! FitCheck
//!
//! Wardrobe classification and outfit recommendation service.

use anyhow::Result;
use clap::Parser;
use fitcheck_server::{create_router, AppState, Cli, ServerConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // credentials may live in a local .env
    let dotenv = dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("Starting FitCheck");
    if let Some(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    let config = ServerConfig::load(&cli.config, &cli)?;
    let metrics_handle = init_metrics()?;

    let state = AppState::new(config, Some(metrics_handle))?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", cli.listen, cli.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("FitCheck listening on http://{}", addr);

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("fitcheck=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fitcheck=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "fitcheck_requests_total",
        "Total number of API requests by endpoint"
    );
    metrics::describe_counter!(
        "fitcheck_fallbacks_total",
        "External provider failures answered by the local core, by endpoint"
    );
    metrics::describe_histogram!(
        "fitcheck_classify_latency_us",
        metrics::Unit::Microseconds,
        "Keyword classification latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
