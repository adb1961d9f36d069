//! Health check handlers for liveness and readiness probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// RFC 3339 time the status was produced.
    pub timestamp: String,

    /// Number of locations in the loaded map (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations_loaded: Option<usize>,

    /// Number of designated exits (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exits: Option<usize>,

    /// Seconds since the state was created (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_seconds: Option<i64>,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            timestamp: now(),
            locations_loaded: None,
            exits: None,
            uptime_seconds: None,
        }
    }

    /// Create a ready status describing the loaded map.
    pub fn ready(service: &str, version: &str, locations: usize, exits: usize, uptime: i64) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            timestamp: now(),
            locations_loaded: Some(locations),
            exits: Some(exits),
            uptime_seconds: Some(uptime),
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            timestamp: now(),
            locations_loaded: None,
            exits: None,
            uptime_seconds: None,
        }
    }
}

/// Liveness probe handler.
///
/// Returns 200 OK whenever the process is serving requests.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"campusnav-service-shared","version":"0.1.0","timestamp":"..."}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Returns 503 when the map has no locations or no exits, since evacuation
/// queries could never succeed.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let graph = state.graph();
    if graph.is_empty() {
        let status = HealthStatus::not_ready(service, version, "no locations loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }
    if graph.exits().is_empty() {
        let status = HealthStatus::not_ready(service, version, "no exits configured");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let uptime = (Utc::now() - state.started_at()).num_seconds();
    let status = HealthStatus::ready(service, version, graph.len(), graph.exits().len(), uptime);
    (StatusCode::OK, Json(status)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusnav_lib::CampusGraph;

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("test-service", "1.0.0");
        assert_eq!(status.status, "ok");
        assert_eq!(status.service, "test-service");
        assert_eq!(status.version, "1.0.0");
        assert!(status.locations_loaded.is_none());
        assert!(status.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_health_status_ready() {
        let status = HealthStatus::ready("test-service", "1.0.0", 9, 2, 5);
        assert_eq!(status.status, "ok");
        assert_eq!(status.locations_loaded, Some(9));
        assert_eq!(status.exits, Some(2));
        assert_eq!(status.uptime_seconds, Some(5));
    }

    #[test]
    fn test_health_status_not_ready() {
        let status = HealthStatus::not_ready("test-service", "1.0.0", "no data");
        assert!(status.status.starts_with("not_ready:"));
        assert!(status.status.contains("no data"));
    }

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus::alive("campusnav", "0.1.0");
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"service\":\"campusnav\""));
        assert!(!json.contains("locations_loaded"));
    }

    #[tokio::test]
    async fn test_health_ready_with_reference_campus() {
        let state = crate::test_utils::test_state();
        let response = health_ready(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_empty_map() {
        let state = AppState::from_graph(CampusGraph::default());
        let response = health_ready(State(state)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
