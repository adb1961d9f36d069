//! Campus graph model.
//!
//! Locations are keyed by their human-readable name. Connections are stored
//! as adjacency entries in both directions; the only way to create one is
//! [`GraphBuilder::connect`], which materializes the mirrored pair in a single
//! step so the graph stays logically undirected.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Minimum similarity score for a location name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.5;

/// Time-of-day period selecting a traffic multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    #[default]
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// Every period, in day order.
    pub const ALL: [TimeOfDay; 3] = [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            _ => Err(Error::InvalidTimeOfDay {
                value: value.to_string(),
            }),
        }
    }
}

/// Per-period traffic multipliers applied to a connection's base distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficMultipliers {
    pub morning: f64,
    pub afternoon: f64,
    pub evening: f64,
}

impl TrafficMultipliers {
    pub fn new(morning: f64, afternoon: f64, evening: f64) -> Self {
        Self {
            morning,
            afternoon,
            evening,
        }
    }

    /// Multiplier that applies during `time`.
    pub fn multiplier(&self, time: TimeOfDay) -> f64 {
        match time {
            TimeOfDay::Morning => self.morning,
            TimeOfDay::Afternoon => self.afternoon,
            TimeOfDay::Evening => self.evening,
        }
    }

    fn validate(&self) -> Result<()> {
        for time in TimeOfDay::ALL {
            let value = self.multiplier(time);
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid_map(format!(
                    "{time} multiplier must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Adjacency entry between two locations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Base walking distance in meters.
    pub distance: u32,
    pub traffic: TrafficMultipliers,
}

/// Category tag for a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Entrance,
    Academic,
    Lab,
    Admin,
    Facility,
    Sports,
    Residence,
}

impl LocationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LocationKind::Entrance => "entrance",
            LocationKind::Academic => "academic",
            LocationKind::Lab => "lab",
            LocationKind::Admin => "admin",
            LocationKind::Facility => "facility",
            LocationKind::Sports => "sports",
            LocationKind::Residence => "residence",
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named point on the campus map.
///
/// `x`, `y` and `icon` are presentation metadata and never influence routing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    #[serde(skip)]
    pub name: String,
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub kind: LocationKind,
    pub icon: String,
    pub connections: BTreeMap<String, Connection>,
}

/// Read-only campus graph shared by every query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CampusGraph {
    #[serde(rename = "nodes")]
    locations: BTreeMap<String, Location>,
    #[serde(rename = "exit_points")]
    exits: Vec<String>,
}

impl CampusGraph {
    /// Start building a new graph.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    pub fn location(&self, name: &str) -> Option<&Location> {
        self.locations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.locations.contains_key(name)
    }

    /// All locations, ordered by name.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// All location names, ordered.
    pub fn location_names(&self) -> impl Iterator<Item = &str> {
        self.locations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Outgoing connections of `name`, ordered by neighbour name.
    pub fn neighbours<'a>(&'a self, name: &str) -> impl Iterator<Item = (&'a str, &'a Connection)> {
        self.locations
            .get(name)
            .into_iter()
            .flat_map(|location| location.connections.iter())
            .map(|(target, connection)| (target.as_str(), connection))
    }

    /// Direct connection from `from` to `to`, if any.
    pub fn connection(&self, from: &str, to: &str) -> Option<&Connection> {
        self.locations
            .get(from)
            .and_then(|location| location.connections.get(to))
    }

    /// Undirected connections, each reported once with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &Connection)> {
        self.locations.iter().flat_map(|(from, location)| {
            location
                .connections
                .iter()
                .filter(move |(to, _)| from.as_str() < to.as_str())
                .map(move |(to, connection)| (from.as_str(), to.as_str(), connection))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Designated evacuation exits, in resolution order.
    pub fn exits(&self) -> &[String] {
        &self.exits
    }

    pub fn is_exit(&self, name: &str) -> bool {
        self.exits.iter().any(|exit| exit == name)
    }

    /// Location names that closely resemble `name`, best match first.
    pub fn fuzzy_location_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &str)> = self
            .locations
            .keys()
            .filter_map(|candidate| {
                let lowered = candidate.to_lowercase();
                let mut score = strsim::normalized_levenshtein(&needle, &lowered);
                if lowered.contains(&needle) || needle.contains(&lowered) {
                    score = score.max(SUGGESTION_THRESHOLD + 0.1);
                }
                (score >= SUGGESTION_THRESHOLD).then_some((score, candidate.as_str()))
            })
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}

/// Incremental constructor for [`CampusGraph`] that enforces the map invariants.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    locations: BTreeMap<String, Location>,
    exits: Vec<String>,
}

impl GraphBuilder {
    /// Register a location with no connections.
    pub fn add_location(
        &mut self,
        name: impl Into<String>,
        x: i32,
        y: i32,
        kind: LocationKind,
        icon: impl Into<String>,
    ) -> Result<&mut Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_map("location names must not be empty"));
        }
        if self.locations.contains_key(&name) {
            return Err(Error::invalid_map(format!("duplicate location '{name}'")));
        }
        self.locations.insert(
            name.clone(),
            Location {
                name,
                x,
                y,
                kind,
                icon: icon.into(),
                connections: BTreeMap::new(),
            },
        );
        Ok(self)
    }

    /// Connect two registered locations in both directions.
    pub fn connect(
        &mut self,
        a: &str,
        b: &str,
        distance: u32,
        traffic: TrafficMultipliers,
    ) -> Result<&mut Self> {
        if a == b {
            return Err(Error::invalid_map(format!(
                "location '{a}' cannot connect to itself"
            )));
        }
        if distance == 0 {
            return Err(Error::invalid_map(format!(
                "connection {a} - {b} must have a positive distance"
            )));
        }
        traffic.validate()?;
        for name in [a, b] {
            if !self.locations.contains_key(name) {
                return Err(Error::invalid_map(format!(
                    "connection references unknown location '{name}'"
                )));
            }
        }
        if self.locations[a].connections.contains_key(b) {
            return Err(Error::invalid_map(format!(
                "duplicate connection {a} - {b}"
            )));
        }

        let connection = Connection { distance, traffic };
        for (from, to) in [(a, b), (b, a)] {
            if let Some(location) = self.locations.get_mut(from) {
                location.connections.insert(to.to_string(), connection);
            }
        }
        Ok(self)
    }

    /// Designate a registered location as an evacuation exit.
    pub fn add_exit(&mut self, name: &str) -> Result<&mut Self> {
        if !self.locations.contains_key(name) {
            return Err(Error::invalid_map(format!(
                "exit references unknown location '{name}'"
            )));
        }
        if !self.exits.iter().any(|exit| exit == name) {
            self.exits.push(name.to_string());
        }
        Ok(self)
    }

    pub fn build(&mut self) -> CampusGraph {
        CampusGraph {
            locations: std::mem::take(&mut self.locations),
            exits: std::mem::take(&mut self.exits),
        }
    }
}

/// Check that every connection has an identical mirrored entry.
///
/// Graphs produced by [`GraphBuilder`] always pass; this exists for callers
/// that want to assert the invariant on a loaded map.
pub fn verify_symmetry(graph: &CampusGraph) -> Result<()> {
    let mut seen = HashSet::new();
    for location in graph.locations() {
        for (target, connection) in &location.connections {
            match graph.connection(target, &location.name) {
                Some(mirror) if mirror == connection => {
                    seen.insert((location.name.as_str(), target.as_str()));
                }
                Some(_) => {
                    return Err(Error::invalid_map(format!(
                        "connection {} - {} differs between directions",
                        location.name, target
                    )))
                }
                None => {
                    return Err(Error::invalid_map(format!(
                        "connection {} -> {} has no reverse entry",
                        location.name, target
                    )))
                }
            }
        }
    }
    tracing::trace!(directed_edges = seen.len(), "graph symmetry verified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(value: f64) -> TrafficMultipliers {
        TrafficMultipliers::new(value, value, value)
    }

    fn triangle() -> CampusGraph {
        let mut builder = CampusGraph::builder();
        builder
            .add_location("A", 0, 0, LocationKind::Entrance, "A")
            .unwrap()
            .add_location("B", 1, 0, LocationKind::Academic, "B")
            .unwrap()
            .add_location("C", 2, 0, LocationKind::Lab, "C")
            .unwrap();
        builder
            .connect("A", "B", 150, TrafficMultipliers::new(1.5, 1.0, 1.2))
            .unwrap()
            .connect("B", "C", 120, flat(1.0))
            .unwrap()
            .add_exit("C")
            .unwrap();
        builder.build()
    }

    #[test]
    fn connect_materializes_both_directions() {
        let graph = triangle();
        let forward = graph.connection("A", "B").expect("forward");
        let backward = graph.connection("B", "A").expect("backward");
        assert_eq!(forward, backward);
        assert_eq!(forward.distance, 150);
        assert!(verify_symmetry(&graph).is_ok());
    }

    #[test]
    fn edges_are_reported_once() {
        let graph = triangle();
        let edges: Vec<_> = graph.edges().map(|(a, b, _)| (a, b)).collect();
        assert_eq!(edges, vec![("A", "B"), ("B", "C")]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn rejects_duplicate_connection_in_either_order() {
        let mut builder = CampusGraph::builder();
        builder
            .add_location("A", 0, 0, LocationKind::Entrance, "")
            .unwrap()
            .add_location("B", 0, 0, LocationKind::Entrance, "")
            .unwrap()
            .connect("A", "B", 10, flat(1.0))
            .unwrap();
        let err = builder.connect("B", "A", 10, flat(1.0)).unwrap_err();
        assert!(err.to_string().contains("duplicate connection"));
    }

    #[test]
    fn rejects_invalid_connections() {
        let mut builder = CampusGraph::builder();
        builder
            .add_location("A", 0, 0, LocationKind::Entrance, "")
            .unwrap()
            .add_location("B", 0, 0, LocationKind::Entrance, "")
            .unwrap();
        assert!(builder.connect("A", "A", 10, flat(1.0)).is_err());
        assert!(builder.connect("A", "B", 0, flat(1.0)).is_err());
        assert!(builder.connect("A", "Z", 10, flat(1.0)).is_err());
        assert!(builder.connect("A", "B", 10, flat(-0.5)).is_err());
        assert!(builder.connect("A", "B", 10, flat(f64::NAN)).is_err());
        assert!(builder.add_exit("Z").is_err());
    }

    #[test]
    fn time_of_day_parses_case_insensitively() {
        assert_eq!("Morning".parse::<TimeOfDay>().unwrap(), TimeOfDay::Morning);
        assert_eq!(" evening ".parse::<TimeOfDay>().unwrap(), TimeOfDay::Evening);
        assert!(matches!(
            "midnight".parse::<TimeOfDay>(),
            Err(Error::InvalidTimeOfDay { .. })
        ));
    }

    #[test]
    fn multiplier_selects_period() {
        let traffic = TrafficMultipliers::new(1.5, 1.0, 1.2);
        assert_eq!(traffic.multiplier(TimeOfDay::Morning), 1.5);
        assert_eq!(traffic.multiplier(TimeOfDay::Afternoon), 1.0);
        assert_eq!(traffic.multiplier(TimeOfDay::Evening), 1.2);
    }

    #[test]
    fn fuzzy_matches_prefer_close_names() {
        let graph = triangle();
        assert_eq!(graph.fuzzy_location_matches("a", 3), vec!["A".to_string()]);
        assert!(graph.fuzzy_location_matches("", 3).is_empty());
    }

    #[test]
    fn graph_serializes_nodes_and_exits() {
        let graph = triangle();
        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["exit_points"], serde_json::json!(["C"]));
        assert_eq!(json["nodes"]["A"]["type"], "entrance");
        assert_eq!(json["nodes"]["A"]["connections"]["B"]["distance"], 150);
        assert_eq!(
            json["nodes"]["B"]["connections"]["A"]["traffic"]["morning"],
            1.5
        );
    }
}
