//! Algorithm trace events for visualization and audit.
//!
//! Every event owns a deep copy of the search state at the moment it was
//! emitted, so a consumer can replay events long after the search moved on.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Kind of step recorded by the shortest-path engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceEventKind {
    Init,
    Visit,
    Relax,
    Found,
}

/// A queued `(distance, node)` pair as seen in the frontier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontierEntry {
    pub node: String,
    pub distance: u64,
}

/// Copy of the search state. `None` distances are still infinite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchSnapshot {
    pub distances: BTreeMap<String, Option<u64>>,
    /// Queue contents ordered by distance, then node name. May include
    /// stale entries that will be skipped when popped.
    pub frontier: Vec<FrontierEntry>,
    pub visited: BTreeSet<String>,
}

/// One recorded step of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEvent {
    #[serde(rename = "type")]
    pub kind: TraceEventKind,
    pub message: String,
    pub description: String,
    pub current: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighbor: Option<String>,
    /// Path rebuilt from predecessors; only set on `found`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
    #[serde(flatten)]
    pub state: SearchSnapshot,
}

/// Append-only event log owned by a single search.
#[derive(Debug, Default)]
pub(crate) struct TraceRecorder {
    events: Vec<TraceEvent>,
}

impl TraceRecorder {
    pub(crate) fn init(&mut self, start: &str, goal: &str, label: &str, emergency: bool, state: SearchSnapshot) {
        let (message, description) = if emergency {
            (
                "Emergency evacuation routing".to_string(),
                format!("Finding safest route from {start} to {goal}"),
            )
        } else {
            (
                "Algorithm initialized".to_string(),
                format!("Starting from {start} at {label} time"),
            )
        };
        self.push(TraceEvent {
            kind: TraceEventKind::Init,
            message,
            description,
            current: None,
            neighbor: None,
            path: None,
            state,
        });
    }

    pub(crate) fn visit(&mut self, node: &str, distance: u64, state: SearchSnapshot) {
        self.push(TraceEvent {
            kind: TraceEventKind::Visit,
            message: format!("Exploring: {node}"),
            description: format!("Distance from source: {distance}m"),
            current: Some(node.to_string()),
            neighbor: None,
            path: None,
            state,
        });
    }

    pub(crate) fn relax(
        &mut self,
        from: &str,
        to: &str,
        candidate: u64,
        edge: u64,
        state: SearchSnapshot,
    ) {
        self.push(TraceEvent {
            kind: TraceEventKind::Relax,
            message: format!("Edge relaxation: {from} → {to}"),
            description: format!("New distance: {candidate}m (edge: {edge}m)"),
            current: Some(from.to_string()),
            neighbor: Some(to.to_string()),
            path: None,
            state,
        });
    }

    pub(crate) fn found(
        &mut self,
        goal: &str,
        distance: u64,
        emergency: bool,
        path: Vec<String>,
        state: SearchSnapshot,
    ) {
        let (message, description) = if emergency {
            (
                format!("Safe exit reached: {goal}"),
                format!("Evacuation distance: {distance}m"),
            )
        } else {
            (
                format!("Destination reached: {goal}"),
                format!("Total distance: {distance}m"),
            )
        };
        self.push(TraceEvent {
            kind: TraceEventKind::Found,
            message,
            description,
            current: Some(goal.to_string()),
            neighbor: None,
            path: Some(path),
            state,
        });
    }

    fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub(crate) fn finish(self) -> Vec<TraceEvent> {
        self.events
    }
}
