//! Campus navigation HTTP service.
//!
//! # Configuration
//!
//! - `CAMPUSNAV_MAP_PATH` - JSON campus map (default: built-in reference campus)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `METRICS_ENABLED`, `METRICS_PATH` - Prometheus endpoint

use tracing::{error, info};

use campusnav_service::{router, ServiceConfig};
use campusnav_service_shared::{init_logging, init_metrics, AppState, LoggingConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("campusnav");
    init_logging(&logging_config);

    let config = ServiceConfig::from_env();
    if let Err(e) = init_metrics(&config.metrics) {
        // Metrics are optional
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    info!(
        map_path = ?config.map_path,
        port = config.port,
        "starting campus navigation service"
    );

    let state = AppState::load(config.map_path.as_deref()).map_err(|e| {
        error!(error = %e, "failed to load application state");
        e
    })?;

    let app = router(state, &config.metrics.path);

    let addr = config.bind_addr();
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
