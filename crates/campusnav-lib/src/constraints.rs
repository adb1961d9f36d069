//! Mutable routing constraints: blocked connections and hazard zones.
//!
//! The store is shared by every query. Readers never hold the lock while
//! routing; they take a [`ConstraintSnapshot`] at query start so one query
//! always observes a single consistent view, and mutations may proceed while
//! it runs.

use std::collections::BTreeSet;
use std::fmt;

use parking_lot::RwLock;
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::CampusGraph;

/// Order-independent key for an undirected connection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    low: String,
    high: String,
}

impl EdgeKey {
    /// Normalize the pair so `(a, b)` and `(b, a)` produce the same key.
    pub fn new(a: &str, b: &str) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.low, self.high)
    }
}

/// Serialized as a two-element array, matching how blocked paths are reported.
impl Serialize for EdgeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        [&self.low, &self.high].serialize(serializer)
    }
}

/// Immutable copy of the constraint sets taken at query start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConstraintSnapshot {
    #[serde(rename = "blocked_paths")]
    blocked: BTreeSet<EdgeKey>,
    #[serde(rename = "hazard_zones")]
    hazards: BTreeSet<String>,
}

impl ConstraintSnapshot {
    pub fn is_blocked(&self, a: &str, b: &str) -> bool {
        self.blocked.contains(&EdgeKey::new(a, b))
    }

    pub fn is_hazard(&self, node: &str) -> bool {
        self.hazards.contains(node)
    }

    /// Blocked connections, sorted.
    pub fn blocked(&self) -> impl Iterator<Item = &EdgeKey> {
        self.blocked.iter()
    }

    /// Hazard zones, sorted.
    pub fn hazards(&self) -> impl Iterator<Item = &str> {
        self.hazards.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty() && self.hazards.is_empty()
    }

    /// Build a snapshot directly, bypassing graph validation.
    pub fn from_parts<B, H>(blocked: B, hazards: H) -> Self
    where
        B: IntoIterator<Item = (String, String)>,
        H: IntoIterator<Item = String>,
    {
        Self {
            blocked: blocked
                .into_iter()
                .map(|(a, b)| EdgeKey::new(&a, &b))
                .collect(),
            hazards: hazards.into_iter().collect(),
        }
    }
}

/// Process-wide constraint state guarded by a reader-writer lock.
///
/// Every mutator is idempotent and reports whether the underlying set
/// actually changed. References are validated against the graph before the
/// lock is taken.
#[derive(Debug, Default)]
pub struct ConstraintStore {
    inner: RwLock<ConstraintSnapshot>,
}

impl ConstraintStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the current state for a query.
    pub fn snapshot(&self) -> ConstraintSnapshot {
        self.inner.read().clone()
    }

    /// Mark the connection between `a` and `b` unusable in both directions.
    pub fn block_edge(&self, graph: &CampusGraph, a: &str, b: &str) -> Result<bool> {
        let key = validate_edge(graph, a, b)?;
        debug!(edge = %key, "blocking connection");
        Ok(self.inner.write().blocked.insert(key))
    }

    /// Make a previously blocked connection usable again.
    pub fn unblock_edge(&self, graph: &CampusGraph, a: &str, b: &str) -> Result<bool> {
        let key = validate_edge(graph, a, b)?;
        debug!(edge = %key, "unblocking connection");
        Ok(self.inner.write().blocked.remove(&key))
    }

    /// Blocked connections, sorted.
    pub fn list_blocked(&self) -> Vec<EdgeKey> {
        self.inner.read().blocked.iter().cloned().collect()
    }

    /// Flag `node` as hazardous. Designated exits are never flagged.
    pub fn add_hazard(&self, graph: &CampusGraph, node: &str) -> Result<bool> {
        validate_location(graph, node)?;
        if graph.is_exit(node) {
            warn!(node, "ignoring hazard on a designated exit");
            return Ok(false);
        }
        debug!(node, "adding hazard zone");
        Ok(self.inner.write().hazards.insert(node.to_string()))
    }

    pub fn remove_hazard(&self, graph: &CampusGraph, node: &str) -> Result<bool> {
        validate_location(graph, node)?;
        debug!(node, "removing hazard zone");
        Ok(self.inner.write().hazards.remove(node))
    }

    /// Hazard zones, sorted.
    pub fn list_hazards(&self) -> Vec<String> {
        self.inner.read().hazards.iter().cloned().collect()
    }

    /// Remove every hazard zone. Returns `false` when there were none.
    pub fn clear_hazards(&self) -> bool {
        debug!("clearing hazard zones");
        let mut guard = self.inner.write();
        let changed = !guard.hazards.is_empty();
        guard.hazards.clear();
        changed
    }

    /// Clear blocked connections and hazards under a single write guard.
    /// Returns `false` when both sets were already empty.
    pub fn reset_all(&self) -> bool {
        debug!("resetting all constraints");
        let mut guard = self.inner.write();
        let changed = !guard.is_empty();
        guard.blocked.clear();
        guard.hazards.clear();
        changed
    }
}

pub(crate) fn validate_location(graph: &CampusGraph, name: &str) -> Result<()> {
    if graph.contains(name) {
        Ok(())
    } else {
        Err(Error::UnknownLocation {
            name: name.to_string(),
            suggestions: graph.fuzzy_location_matches(name, 3),
        })
    }
}

fn validate_edge(graph: &CampusGraph, a: &str, b: &str) -> Result<EdgeKey> {
    validate_location(graph, a)?;
    validate_location(graph, b)?;
    if graph.connection(a, b).is_none() {
        return Err(Error::UnknownConnection {
            from: a.to_string(),
            to: b.to_string(),
        });
    }
    Ok(EdgeKey::new(a, b))
}
