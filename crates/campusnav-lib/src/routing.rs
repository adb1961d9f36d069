use tracing::debug;

use crate::constraints::{validate_location, ConstraintStore};
use crate::error::Result;
use crate::evacuation::{find_nearest_exit, ExitRoute};
use crate::graph::{CampusGraph, TimeOfDay};
use crate::path::{find_route_dijkstra, PathResult};
use crate::weight::{EdgeWeigher, WeightMode};

/// High-level shortest-path request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub time_of_day: TimeOfDay,
    pub emergency: bool,
    pub trace: bool,
}

impl RouteRequest {
    /// Morning, non-emergency route without a trace.
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            time_of_day: TimeOfDay::default(),
            emergency: false,
            trace: false,
        }
    }

    pub fn at(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = time_of_day;
        self
    }

    pub fn emergency(mut self, emergency: bool) -> Self {
        self.emergency = emergency;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    fn mode(&self) -> WeightMode {
        WeightMode::new(self.time_of_day, self.emergency)
    }
}

/// Request for the closest safe exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvacuationRequest {
    pub start: String,
    /// Accepted for interface symmetry; emergency pricing ignores traffic.
    pub time_of_day: TimeOfDay,
    pub trace: bool,
}

impl EvacuationRequest {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            time_of_day: TimeOfDay::default(),
            trace: false,
        }
    }

    pub fn at(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = time_of_day;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

/// Compute the cheapest route for `request`.
///
/// Both names are validated before any search state is built. An unreachable
/// goal is an `Ok` result with an empty path, not an error.
pub fn plan_route(
    graph: &CampusGraph,
    store: &ConstraintStore,
    request: &RouteRequest,
) -> Result<PathResult> {
    validate_location(graph, &request.start)?;
    validate_location(graph, &request.goal)?;

    let constraints = store.snapshot();
    let mode = request.mode();
    debug!(
        start = %request.start,
        goal = %request.goal,
        time_of_day = %request.time_of_day,
        emergency = request.emergency,
        trace = request.trace,
        "planning route"
    );

    let weigher = EdgeWeigher::new(graph, &constraints, mode);
    Ok(find_route_dijkstra(
        &weigher,
        &request.start,
        &request.goal,
        request.trace,
    ))
}

/// Resolve the nearest reachable exit from `request.start`.
pub fn plan_evacuation(
    graph: &CampusGraph,
    store: &ConstraintStore,
    request: &EvacuationRequest,
) -> Result<ExitRoute> {
    validate_location(graph, &request.start)?;

    let constraints = store.snapshot();
    debug!(
        start = %request.start,
        time_of_day = %request.time_of_day,
        hazards = constraints.hazards().count(),
        "planning evacuation"
    );
    find_nearest_exit(graph, &constraints, &request.start, request.trace)
}
