//! Application state for the HTTP service.
//!
//! The campus graph is loaded once and never mutated afterwards. The
//! constraint store is the only mutable piece and is shared by every handler.

use std::path::Path;
use std::sync::Arc;

use campusnav_lib::{load_map_or_default, CampusGraph, ConstraintStore, Error as LibError};
use chrono::{DateTime, Utc};

/// Error during application state initialization.
#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    /// The configured map file does not exist.
    #[error("campus map not found: {0}")]
    MapNotFound(String),

    /// The map file exists but could not be loaded.
    #[error("failed to load campus map: {0}")]
    MapLoad(#[source] LibError),
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        match err {
            LibError::MapNotFound { path } => Self::MapNotFound(path.display().to_string()),
            other => Self::MapLoad(other),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// Cheap to clone; everything lives behind an `Arc`.
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use campusnav_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let graph = state.graph();
///     // ...
/// }
///
/// let state = AppState::load(None).unwrap();
/// let app = Router::new()
///     .route("/api/nodes", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    graph: CampusGraph,
    constraints: ConstraintStore,
    started_at: DateTime<Utc>,
}

impl AppState {
    /// Load the campus map from `map_path`, or use the reference campus when
    /// no path is configured.
    pub fn load(map_path: Option<&Path>) -> Result<Self, AppStateError> {
        match map_path {
            Some(path) => tracing::info!(path = %path.display(), "loading campus map"),
            None => tracing::info!("no map configured, using reference campus"),
        }
        let graph = load_map_or_default(map_path)?;
        tracing::info!(
            locations = graph.len(),
            connections = graph.edge_count(),
            exits = graph.exits().len(),
            "campus map ready"
        );
        Ok(Self::from_graph(graph))
    }

    /// Create application state around an already-built graph with an empty
    /// constraint store.
    pub fn from_graph(graph: CampusGraph) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                graph,
                constraints: ConstraintStore::new(),
                started_at: Utc::now(),
            }),
        }
    }

    /// The read-only campus graph.
    pub fn graph(&self) -> &CampusGraph {
        &self.inner.graph
    }

    /// The shared blocked-path and hazard store.
    pub fn constraints(&self) -> &ConstraintStore {
        &self.inner.constraints
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.inner.started_at
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("location_count", &self.inner.graph.len())
            .field("exit_count", &self.inner.graph.exits().len())
            .field("constraints", &self.inner.constraints.snapshot())
            .finish()
    }
}
