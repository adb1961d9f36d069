//! Prometheus metrics for the campus navigation service.
//!
//! - [`MetricsConfig`]: configuration for the metrics system
//! - [`init_metrics`]: install the Prometheus recorder
//! - [`metrics_handler`]: axum handler for the `/metrics` endpoint
//! - business metric helpers for routing, evacuation and constraint changes
//!
//! ```no_run
//! use campusnav_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! let app: Router = Router::new()
//!     .route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Path for the metrics endpoint (e.g., "/metrics").
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: "true" or "false" (default: true)
    /// - `METRICS_PATH`: path for the metrics endpoint (default: "/metrics")
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let path = std::env::var("METRICS_PATH")
            .ok()
            .filter(|p| p.starts_with('/'))
            .unwrap_or_else(|| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Install the Prometheus metrics recorder.
///
/// # Errors
///
/// Fails when metrics are disabled, when a recorder is already installed, or
/// when the exporter cannot be built.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

/// Returns `None` if [`init_metrics`] has not been called.
pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Axum handler rendering the Prometheus exposition format.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MetricsError {
    #[error("metrics are disabled")]
    Disabled,
    #[error("metrics recorder already initialized")]
    AlreadyInitialized,
    #[error("failed to install metrics recorder: {0}")]
    InstallFailed(String),
}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Increment `campusnav_paths_computed_total`.
///
/// `mode` is the time-of-day label or "emergency"; `reachable` tells whether
/// a path was found.
pub fn record_path_computed(mode: &str, reachable: bool) {
    metrics::counter!(
        "campusnav_paths_computed_total",
        "mode" => mode.to_string(),
        "reachable" => if reachable { "true" } else { "false" }
    )
    .increment(1);
}

/// Increment `campusnav_path_failures_total`.
///
/// `reason` is one of "validation_error", "unknown_location",
/// "no_reachable_exit" or "internal_error".
pub fn record_path_failed(reason: &str) {
    metrics::counter!(
        "campusnav_path_failures_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// Record a route cost to the `campusnav_path_cost` histogram.
pub fn record_path_cost(cost: u64, mode: &str) {
    metrics::histogram!(
        "campusnav_path_cost",
        "mode" => mode.to_string()
    )
    .record(cost as f64);
}

/// Increment `campusnav_exits_resolved_total` for the chosen exit.
pub fn record_exit_resolved(exit: &str) {
    metrics::counter!(
        "campusnav_exits_resolved_total",
        "exit" => exit.to_string()
    )
    .increment(1);
}

/// Increment `campusnav_constraint_mutations_total`.
///
/// `operation` names the mutation ("block", "unblock", "add_hazard", ...).
pub fn record_constraint_mutation(operation: &str, changed: bool) {
    metrics::counter!(
        "campusnav_constraint_mutations_total",
        "operation" => operation.to_string(),
        "changed" => if changed { "true" } else { "false" }
    )
    .increment(1);
}
