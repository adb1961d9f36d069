//! Campus navigation HTTP API.
//!
//! # Endpoints
//!
//! - `GET /api/health` - liveness message
//! - `GET /api/graph` - the full campus map with exits
//! - `GET /api/nodes` - location names
//! - `POST /api/path` - shortest path between two locations
//! - `POST /api/emergency/nearest-exit` - nearest reachable exit
//! - `POST /api/paths/block`, `POST /api/paths/unblock`, `GET /api/paths/blocked`
//! - `POST /api/hazards/add`, `POST /api/hazards/remove`, `POST /api/hazards/clear`,
//!   `GET /api/hazards`
//! - `POST /api/reset` - clear every blocked path and hazard zone
//! - `GET /metrics`, `GET /health/live`, `GET /health/ready`

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use campusnav_lib::{
    plan_evacuation, plan_route, CampusGraph, EdgeKey, Error as LibError, ExitRoute, PathResult,
};
use campusnav_service_shared::{
    from_json_rejection, from_lib_error, health_live, health_ready, metrics_handler,
    record_constraint_mutation, record_exit_resolved, record_path_computed, record_path_cost,
    record_path_failed, AppState, EdgeRequest, HazardRequest, MetricsLayer, NearestExitRequest,
    PathRequest, ProblemDetails, RequestId, ServiceResponse, Validate,
};

mod config;

pub use config::ServiceConfig;

/// HTTP response - either success or RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Success(ServiceResponse<T>),
    Error(ProblemDetails),
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiResponse::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            ApiResponse::Error(problem) => problem.into_response(),
        }
    }
}

impl<T> From<Box<ProblemDetails>> for ApiResponse<T> {
    fn from(problem: Box<ProblemDetails>) -> Self {
        ApiResponse::Error(*problem)
    }
}

#[derive(Debug, Serialize)]
pub struct ApiStatus {
    status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct NodeList {
    nodes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BlockedPaths {
    blocked_paths: Vec<EdgeKey>,
}

#[derive(Debug, Serialize)]
pub struct HazardZones {
    hazard_zones: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ConstraintLists {
    blocked_paths: Vec<EdgeKey>,
    hazard_zones: Vec<String>,
}

/// Build the application router with every API, probe and metrics route.
///
/// `metrics_path` is where the Prometheus exposition is served.
pub fn router(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route("/api/health", get(api_health))
        .route("/api/graph", get(get_graph))
        .route("/api/nodes", get(get_nodes))
        .route("/api/path", post(compute_path))
        .route("/api/emergency/nearest-exit", post(nearest_exit))
        .route("/api/paths/block", post(block_path))
        .route("/api/paths/unblock", post(unblock_path))
        .route("/api/paths/blocked", get(list_blocked))
        .route("/api/hazards", get(list_hazards))
        .route("/api/hazards/add", post(add_hazard))
        .route("/api/hazards/remove", post(remove_hazard))
        .route("/api/hazards/clear", post(clear_hazards))
        .route("/api/reset", post(reset_constraints))
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(MetricsLayer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn failure_reason(error: &LibError) -> &'static str {
    match error {
        LibError::UnknownLocation { .. } => "unknown_location",
        LibError::NoReachableExit { .. } => "no_reachable_exit",
        _ => "internal_error",
    }
}

fn body_or_problem<T>(
    payload: Result<Json<T>, JsonRejection>,
    request_id: &RequestId,
) -> Result<T, Box<ProblemDetails>> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            warn!(request_id = %request_id, error = %rejection, "rejected request body");
            Err(Box::new(from_json_rejection(&rejection, request_id.as_str())))
        }
    }
}

/// Extract and validate a request body.
///
/// `on_invalid` runs once when the body is malformed or fails validation.
/// Path queries count it as a failed query. Constraint mutations pass
/// `ignore_invalid`.
fn validated<T: Validate>(
    payload: Result<Json<T>, JsonRejection>,
    request_id: &RequestId,
    on_invalid: impl Fn(),
) -> Result<T, Box<ProblemDetails>> {
    let body = body_or_problem(payload, request_id).inspect_err(|_| on_invalid())?;
    body.validate(request_id.as_str()).inspect_err(|problem| {
        on_invalid();
        warn!(request_id = %request_id, detail = ?problem.detail, "request failed validation");
    })?;
    Ok(body)
}

fn path_validation_failed() {
    record_path_failed("validation_error");
}

fn ignore_invalid() {}

fn lib_problem(error: &LibError, request_id: &RequestId) -> Box<ProblemDetails> {
    Box::new(from_lib_error(error, request_id.as_str()))
}

async fn api_health() -> ApiResponse<ApiStatus> {
    ApiResponse::Success(
        ServiceResponse::new(ApiStatus { status: "healthy" })
            .with_message("Campus Navigation API is running"),
    )
}

async fn get_graph(State(state): State<AppState>) -> ApiResponse<CampusGraph> {
    ApiResponse::Success(ServiceResponse::new(state.graph().clone()))
}

async fn get_nodes(State(state): State<AppState>) -> ApiResponse<NodeList> {
    let nodes = state.graph().location_names().map(String::from).collect();
    ApiResponse::Success(ServiceResponse::new(NodeList { nodes }))
}

/// Handle POST /api/path requests.
///
/// An unreachable destination is not an error: the reply carries an empty
/// path and a null distance.
async fn compute_path(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<PathRequest>, JsonRejection>,
) -> ApiResponse<PathResult> {
    let request = match validated(payload, &request_id, path_validation_failed) {
        Ok(request) => request,
        Err(problem) => return problem.into(),
    };
    let lib_request = match request.to_route_request(request_id.as_str()) {
        Ok(lib_request) => lib_request,
        Err(problem) => return problem.into(),
    };

    info!(
        request_id = %request_id,
        start = %lib_request.start,
        goal = %lib_request.goal,
        time_of_day = %lib_request.time_of_day,
        emergency = lib_request.emergency,
        "handling path request"
    );

    let mode = if lib_request.emergency {
        "emergency"
    } else {
        lib_request.time_of_day.as_str()
    };

    let result = match plan_route(state.graph(), state.constraints(), &lib_request) {
        Ok(result) => result,
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "path request failed");
            record_path_failed(failure_reason(&e));
            return lib_problem(&e, &request_id).into();
        }
    };

    record_path_computed(mode, result.is_reachable());
    if let Some(cost) = result.distance {
        record_path_cost(cost, mode);
    }

    info!(
        request_id = %request_id,
        distance = ?result.distance,
        hops = result.hop_count(),
        visited = result.visited.len(),
        "path computed"
    );

    ApiResponse::Success(ServiceResponse::new(result))
}

/// Handle POST /api/emergency/nearest-exit requests.
async fn nearest_exit(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<NearestExitRequest>, JsonRejection>,
) -> ApiResponse<ExitRoute> {
    let request = match validated(payload, &request_id, path_validation_failed) {
        Ok(request) => request,
        Err(problem) => return problem.into(),
    };
    let lib_request = match request.to_evacuation_request(request_id.as_str()) {
        Ok(lib_request) => lib_request,
        Err(problem) => return problem.into(),
    };

    info!(request_id = %request_id, start = %lib_request.start, "handling nearest exit request");

    let route = match plan_evacuation(state.graph(), state.constraints(), &lib_request) {
        Ok(route) => route,
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "nearest exit request failed");
            record_path_failed(failure_reason(&e));
            return lib_problem(&e, &request_id).into();
        }
    };

    record_path_computed("emergency", true);
    record_path_cost(route.distance, "emergency");
    record_exit_resolved(&route.exit);

    info!(
        request_id = %request_id,
        exit = %route.exit,
        distance = route.distance,
        "nearest exit resolved"
    );

    ApiResponse::Success(ServiceResponse::new(route))
}

fn blocked_paths(state: &AppState) -> BlockedPaths {
    BlockedPaths {
        blocked_paths: state.constraints().list_blocked(),
    }
}

fn hazard_zones(state: &AppState) -> HazardZones {
    HazardZones {
        hazard_zones: state.constraints().list_hazards(),
    }
}

async fn block_path(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<EdgeRequest>, JsonRejection>,
) -> ApiResponse<BlockedPaths> {
    let request = match validated(payload, &request_id, ignore_invalid) {
        Ok(request) => request,
        Err(problem) => return problem.into(),
    };
    let (a, b) = (request.node1.trim(), request.node2.trim());

    let changed = match state.constraints().block_edge(state.graph(), a, b) {
        Ok(changed) => changed,
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "block rejected");
            return lib_problem(&e, &request_id).into();
        }
    };
    record_constraint_mutation("block", changed);
    info!(request_id = %request_id, a, b, changed, "path blocked");

    let message = if changed {
        format!("Path blocked between {a} and {b}")
    } else {
        format!("Path between {a} and {b} is already blocked")
    };
    ApiResponse::Success(ServiceResponse::new(blocked_paths(&state)).with_message(message))
}

async fn unblock_path(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<EdgeRequest>, JsonRejection>,
) -> ApiResponse<BlockedPaths> {
    let request = match validated(payload, &request_id, ignore_invalid) {
        Ok(request) => request,
        Err(problem) => return problem.into(),
    };
    let (a, b) = (request.node1.trim(), request.node2.trim());

    let changed = match state.constraints().unblock_edge(state.graph(), a, b) {
        Ok(changed) => changed,
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "unblock rejected");
            return lib_problem(&e, &request_id).into();
        }
    };
    record_constraint_mutation("unblock", changed);
    info!(request_id = %request_id, a, b, changed, "path unblocked");

    let message = if changed {
        format!("Path unblocked between {a} and {b}")
    } else {
        format!("Path between {a} and {b} was not blocked")
    };
    ApiResponse::Success(ServiceResponse::new(blocked_paths(&state)).with_message(message))
}

async fn list_blocked(State(state): State<AppState>) -> ApiResponse<BlockedPaths> {
    ApiResponse::Success(ServiceResponse::new(blocked_paths(&state)))
}

async fn add_hazard(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<HazardRequest>, JsonRejection>,
) -> ApiResponse<HazardZones> {
    let request = match validated(payload, &request_id, ignore_invalid) {
        Ok(request) => request,
        Err(problem) => return problem.into(),
    };
    let node = request.node.trim();

    let changed = match state.constraints().add_hazard(state.graph(), node) {
        Ok(changed) => changed,
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "hazard rejected");
            return lib_problem(&e, &request_id).into();
        }
    };
    record_constraint_mutation("add_hazard", changed);

    let message = if changed {
        format!("{node} marked as hazard zone")
    } else if state.graph().is_exit(node) {
        format!("{node} is an exit and cannot be marked as a hazard zone")
    } else {
        format!("{node} is already a hazard zone")
    };
    info!(request_id = %request_id, node, changed, "hazard add processed");

    ApiResponse::Success(ServiceResponse::new(hazard_zones(&state)).with_message(message))
}

async fn remove_hazard(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<HazardRequest>, JsonRejection>,
) -> ApiResponse<HazardZones> {
    let request = match validated(payload, &request_id, ignore_invalid) {
        Ok(request) => request,
        Err(problem) => return problem.into(),
    };
    let node = request.node.trim();

    let changed = match state.constraints().remove_hazard(state.graph(), node) {
        Ok(changed) => changed,
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "hazard removal rejected");
            return lib_problem(&e, &request_id).into();
        }
    };
    record_constraint_mutation("remove_hazard", changed);
    info!(request_id = %request_id, node, changed, "hazard remove processed");

    let message = if changed {
        format!("{node} is no longer a hazard zone")
    } else {
        format!("{node} was not a hazard zone")
    };
    ApiResponse::Success(ServiceResponse::new(hazard_zones(&state)).with_message(message))
}

async fn clear_hazards(
    State(state): State<AppState>,
    request_id: RequestId,
) -> ApiResponse<HazardZones> {
    let changed = state.constraints().clear_hazards();
    record_constraint_mutation("clear_hazards", changed);
    info!(request_id = %request_id, changed, "hazard zones cleared");

    let message = if changed {
        "All hazard zones cleared"
    } else {
        "No hazard zones to clear"
    };
    ApiResponse::Success(ServiceResponse::new(hazard_zones(&state)).with_message(message))
}

async fn list_hazards(State(state): State<AppState>) -> ApiResponse<HazardZones> {
    ApiResponse::Success(ServiceResponse::new(hazard_zones(&state)))
}

async fn reset_constraints(
    State(state): State<AppState>,
    request_id: RequestId,
) -> ApiResponse<ConstraintLists> {
    let changed = state.constraints().reset_all();
    record_constraint_mutation("reset", changed);
    info!(request_id = %request_id, changed, "constraints reset");

    let lists = ConstraintLists {
        blocked_paths: state.constraints().list_blocked(),
        hazard_zones: state.constraints().list_hazards(),
    };
    let message = if changed {
        "All blocked paths and hazard zones cleared"
    } else {
        "No blocked paths or hazard zones to clear"
    };
    ApiResponse::Success(ServiceResponse::new(lists).with_message(message))
}
