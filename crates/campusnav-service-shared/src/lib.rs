//! Shared infrastructure for the campus navigation HTTP service.
//!
//! This crate provides the HTTP glue around `campusnav-lib`:
//!
//! - [`AppState`]: the loaded campus graph and the shared constraint store
//! - [`health_live`] and [`health_ready`]: liveness/readiness probe handlers
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`ServiceResponse`]: wrapper for successful responses with content type
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: structured JSON logging setup
//! - [`middleware`]: request tracking and metrics middleware
//! - Request types with validation for each endpoint
//!
//! # Architecture
//!
//! Handlers stay thin; all routing logic lives in `campusnav-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse request JSON                                       │
//! │  - Validate parameters                                      │
//! │  - Call campusnav-lib APIs                                  │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a fresh reference-campus state for
//! handler tests. Enable the `test-utils` feature to access it from dependent
//! crates.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_constraint_mutation, record_exit_resolved,
    record_path_computed, record_path_cost, record_path_failed, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
pub use problem::{
    from_json_rejection, from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR,
    PROBLEM_INVALID_REQUEST, PROBLEM_NO_REACHABLE_EXIT, PROBLEM_SERVICE_UNAVAILABLE,
    PROBLEM_UNKNOWN_CONNECTION, PROBLEM_UNKNOWN_LOCATION,
};
pub use request::{EdgeRequest, HazardRequest, NearestExitRequest, PathRequest, Validate};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError};
