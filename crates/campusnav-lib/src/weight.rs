use crate::constraints::ConstraintSnapshot;
use crate::graph::{CampusGraph, TimeOfDay};

/// Cost added per hazardous endpoint of an edge in emergency mode.
pub const HAZARD_PENALTY: u64 = 500;

/// Routing mode used to price an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightMode {
    /// Traffic-scaled distance for the given period.
    Traffic(TimeOfDay),
    /// Base distance plus hazard penalties; traffic is ignored.
    Emergency,
}

impl WeightMode {
    pub fn new(time: TimeOfDay, emergency: bool) -> Self {
        if emergency {
            WeightMode::Emergency
        } else {
            WeightMode::Traffic(time)
        }
    }

    pub fn is_emergency(self) -> bool {
        matches!(self, WeightMode::Emergency)
    }
}

/// Edge cost function bound to a graph, a constraint snapshot and a mode.
///
/// Pure: it reads the snapshot and never mutates anything.
#[derive(Debug, Clone, Copy)]
pub struct EdgeWeigher<'a> {
    graph: &'a CampusGraph,
    constraints: &'a ConstraintSnapshot,
    mode: WeightMode,
}

impl<'a> EdgeWeigher<'a> {
    pub fn new(graph: &'a CampusGraph, constraints: &'a ConstraintSnapshot, mode: WeightMode) -> Self {
        Self {
            graph,
            constraints,
            mode,
        }
    }

    pub fn graph(&self) -> &'a CampusGraph {
        self.graph
    }

    pub fn mode(&self) -> WeightMode {
        self.mode
    }

    /// Effective cost of moving `from -> to`, or `None` when the edge is
    /// blocked or does not exist.
    pub fn effective_weight(&self, from: &str, to: &str) -> Option<u64> {
        if self.constraints.is_blocked(from, to) {
            return None;
        }
        let connection = self.graph.connection(from, to)?;
        let base = u64::from(connection.distance);

        match self.mode {
            WeightMode::Emergency => {
                let hazardous = [from, to]
                    .into_iter()
                    .filter(|node| self.constraints.is_hazard(node))
                    .count() as u64;
                Some(base + hazardous * HAZARD_PENALTY)
            }
            WeightMode::Traffic(time) => {
                let scaled = f64::from(connection.distance) * connection.traffic.multiplier(time);
                Some(scaled.round_ties_even() as u64)
            }
        }
    }
}
