//! georegion - region resolution server
//!
//! This is the main entry point for the georegion HTTP service.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use georegion::handlers::{build_router, heartbeat};
use georegion::{init_tracing, AppState, Config, GeoRegionError, Result};

fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    init_tracing(&config.log_level);

    info!("Starting georegion v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    if let Some(workers) = config.server.workers {
        runtime.worker_threads(workers);
    }
    let runtime = runtime
        .enable_all()
        .build()
        .map_err(|e| GeoRegionError::Server {
            message: format!("Failed to start runtime: {}", e),
        })?;

    runtime.block_on(serve(config))
}

async fn serve(config: Config) -> Result<()> {
    // Load the country table and create application state
    let app_state = AppState::from_config(config.clone()).map_err(|e| {
        error!("Failed to load country codes: {}", e);
        e
    })?;

    app_state.validate().map_err(|e| {
        error!("Invalid application state: {}", e);
        e
    })?;

    info!("Serving {} country codes", app_state.codes.len());

    let state = Arc::new(app_state);
    let app = build_router(state);

    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| GeoRegionError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| GeoRegionError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    heartbeat::mark_start();
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| GeoRegionError::Server {
            message: format!("Server error: {}", e),
        })?;

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
