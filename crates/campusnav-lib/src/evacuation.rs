use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::constraints::ConstraintSnapshot;
use crate::error::{Error, Result};
use crate::graph::CampusGraph;
use crate::path::{find_route_dijkstra, PathResult};
use crate::trace::TraceEvent;
use crate::weight::{EdgeWeigher, WeightMode};

/// Closest reachable exit and the route to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExitRoute {
    #[serde(rename = "nearest_exit")]
    pub exit: String,
    pub distance: u64,
    pub path: Vec<String>,
    #[serde(rename = "visited_nodes")]
    pub visited: BTreeSet<String>,
    #[serde(rename = "steps", skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<TraceEvent>>,
}

/// Find the exit with the lowest emergency-mode cost from `start`.
///
/// Exits are tried in the graph's configured order and only a strictly
/// cheaper exit replaces the current best, so the first of several equal
/// exits wins. Every run reads the same `constraints` snapshot. With
/// `record_trace` the winning exit is searched again with tracing enabled.
pub fn find_nearest_exit(
    graph: &CampusGraph,
    constraints: &ConstraintSnapshot,
    start: &str,
    record_trace: bool,
) -> Result<ExitRoute> {
    let weigher = EdgeWeigher::new(graph, constraints, WeightMode::Emergency);

    let mut best: Option<(&str, u64, PathResult)> = None;
    for exit in graph.exits() {
        let result = find_route_dijkstra(&weigher, start, exit, false);
        let Some(distance) = result.distance else {
            debug!(start, exit = %exit, "exit unreachable");
            continue;
        };
        if best
            .as_ref()
            .map_or(true, |(_, current, _)| distance < *current)
        {
            best = Some((exit.as_str(), distance, result));
        }
    }

    let Some((exit, distance, mut route)) = best else {
        return Err(Error::NoReachableExit {
            start: start.to_string(),
        });
    };

    if record_trace {
        route = find_route_dijkstra(&weigher, start, exit, true);
    }
    debug!(start, exit, distance, "nearest exit resolved");

    Ok(ExitRoute {
        exit: exit.to_string(),
        distance,
        path: route.path,
        visited: route.visited,
        trace: route.trace,
    })
}
