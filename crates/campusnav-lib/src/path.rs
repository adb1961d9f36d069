//! Dijkstra's shortest-path engine with optional step tracing.
//!
//! The frontier is a binary min-heap without decrease-key: an improved
//! distance pushes a fresh entry and stale entries are discarded when popped
//! (the node is already visited). That costs O((V + E) log E) time instead of
//! O((V + E) log V), which is irrelevant at campus scale and keeps the queue a
//! plain `BinaryHeap`.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::graph::CampusGraph;
use crate::trace::{FrontierEntry, SearchSnapshot, TraceEvent, TraceRecorder};
use crate::weight::{EdgeWeigher, WeightMode};

/// Outcome of a single shortest-path query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathResult {
    /// Locations from start to goal inclusive; empty when unreachable.
    pub path: Vec<String>,
    /// Total cost, `None` when the goal is unreachable.
    pub distance: Option<u64>,
    #[serde(rename = "visited_nodes")]
    pub visited: BTreeSet<String>,
    #[serde(rename = "steps", skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<TraceEvent>>,
}

impl PathResult {
    fn unreachable(visited: BTreeSet<String>, trace: Option<Vec<TraceEvent>>) -> Self {
        Self {
            path: Vec::new(),
            distance: None,
            visited,
            trace,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_some()
    }

    /// Number of edges in the path.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Run Dijkstra from `start`, stopping as soon as `goal` is settled.
///
/// Names missing from the graph yield an unreachable result; reference
/// validation belongs to the caller.
pub fn find_route_dijkstra(
    weigher: &EdgeWeigher<'_>,
    start: &str,
    goal: &str,
    record_trace: bool,
) -> PathResult {
    let graph = weigher.graph();
    let (Some(start), Some(goal)) = (
        graph.location(start).map(|l| l.name.as_str()),
        graph.location(goal).map(|l| l.name.as_str()),
    ) else {
        return PathResult::unreachable(BTreeSet::new(), record_trace.then(Vec::new));
    };

    let mut search = Search::new(graph, start, record_trace);
    search.record_init(goal, weigher.mode());

    let mut reached = None;
    while let Some(entry) = search.frontier.pop() {
        if !search.visited.insert(entry.node) {
            continue;
        }
        search.record_visit(entry.node, entry.cost);

        if entry.node == goal {
            reached = Some(entry.cost);
            break;
        }

        for (neighbour, _) in graph.neighbours(entry.node) {
            if search.visited.contains(neighbour) {
                continue;
            }
            let Some(edge_cost) = weigher.effective_weight(entry.node, neighbour) else {
                continue;
            };
            let candidate = entry.cost + edge_cost;
            if candidate < search.distance(neighbour).unwrap_or(u64::MAX) {
                search.distances.insert(neighbour, candidate);
                search.parents.insert(neighbour, entry.node);
                search.frontier.push(QueueEntry::new(neighbour, candidate));
                search.record_relax(entry.node, neighbour, candidate, edge_cost);
            }
        }
    }

    let visited: BTreeSet<String> = search.visited.iter().map(|n| n.to_string()).collect();
    let Some(distance) = reached else {
        debug!(start, goal, visited = visited.len(), "goal unreachable");
        return PathResult::unreachable(visited, search.finish());
    };

    let path = search.reconstruct_path(goal);
    search.record_found(goal, distance, weigher.mode().is_emergency(), path.clone());
    debug!(
        start,
        goal,
        distance,
        hops = path.len().saturating_sub(1),
        visited = visited.len(),
        "shortest path found"
    );

    PathResult {
        path,
        distance: Some(distance),
        visited,
        trace: search.finish(),
    }
}

/// Live state of one search. Node names borrow from the graph.
struct Search<'g> {
    graph: &'g CampusGraph,
    start: &'g str,
    distances: HashMap<&'g str, u64>,
    parents: HashMap<&'g str, &'g str>,
    frontier: BinaryHeap<QueueEntry<'g>>,
    visited: BTreeSet<&'g str>,
    recorder: Option<TraceRecorder>,
}

impl<'g> Search<'g> {
    fn new(graph: &'g CampusGraph, start: &'g str, record_trace: bool) -> Self {
        let mut distances = HashMap::with_capacity(graph.len());
        distances.insert(start, 0);
        let mut frontier = BinaryHeap::new();
        frontier.push(QueueEntry::new(start, 0));

        Self {
            graph,
            start,
            distances,
            parents: HashMap::new(),
            frontier,
            visited: BTreeSet::new(),
            recorder: record_trace.then(TraceRecorder::default),
        }
    }

    fn distance(&self, node: &str) -> Option<u64> {
        self.distances.get(node).copied()
    }

    fn reconstruct_path(&self, goal: &'g str) -> Vec<String> {
        let mut path = vec![goal.to_string()];
        let mut current = goal;
        while current != self.start {
            match self.parents.get(current) {
                Some(&parent) => {
                    path.push(parent.to_string());
                    current = parent;
                }
                None => return Vec::new(),
            }
        }
        path.reverse();
        path
    }

    fn snapshot(&self) -> SearchSnapshot {
        let distances: BTreeMap<String, Option<u64>> = self
            .graph
            .location_names()
            .map(|name| (name.to_string(), self.distance(name)))
            .collect();

        let mut frontier: Vec<FrontierEntry> = self
            .frontier
            .iter()
            .map(|entry| FrontierEntry {
                node: entry.node.to_string(),
                distance: entry.cost,
            })
            .collect();
        frontier.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.node.cmp(&b.node)));

        SearchSnapshot {
            distances,
            frontier,
            visited: self.visited.iter().map(|n| n.to_string()).collect(),
        }
    }

    fn record_init(&mut self, goal: &str, mode: WeightMode) {
        if self.recorder.is_none() {
            return;
        }
        let state = self.snapshot();
        let (label, emergency) = match mode {
            WeightMode::Traffic(time) => (time.as_str(), false),
            WeightMode::Emergency => ("emergency", true),
        };
        let start = self.start;
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.init(start, goal, label, emergency, state);
        }
    }

    fn record_visit(&mut self, node: &str, distance: u64) {
        if self.recorder.is_none() {
            return;
        }
        let state = self.snapshot();
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.visit(node, distance, state);
        }
    }

    fn record_relax(&mut self, from: &str, to: &str, candidate: u64, edge: u64) {
        if self.recorder.is_none() {
            return;
        }
        let state = self.snapshot();
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.relax(from, to, candidate, edge, state);
        }
    }

    fn record_found(&mut self, goal: &str, distance: u64, emergency: bool, path: Vec<String>) {
        if self.recorder.is_none() {
            return;
        }
        let state = self.snapshot();
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.found(goal, distance, emergency, path, state);
        }
    }

    fn finish(self) -> Option<Vec<TraceEvent>> {
        self.recorder.map(TraceRecorder::finish)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'g> {
    node: &'g str,
    cost: u64,
}

impl<'g> QueueEntry<'g> {
    fn new(node: &'g str, cost: u64) -> Self {
        Self { node, cost }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost; equal
        // costs pop in ascending name order.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
