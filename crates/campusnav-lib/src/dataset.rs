//! Campus map sources.
//!
//! A map is either the built-in reference campus or a JSON document with the
//! shape below. Every connection is listed once; the builder mirrors it.
//!
//! ```json
//! {
//!   "locations": [
//!     {"name": "Main Gate", "x": 100, "y": 300, "type": "entrance", "icon": "🚪"}
//!   ],
//!   "connections": [
//!     {"from": "Main Gate", "to": "Library", "distance": 150,
//!      "traffic": {"morning": 1.5, "afternoon": 1.0, "evening": 1.2}}
//!   ],
//!   "exits": ["Main Gate"]
//! }
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{CampusGraph, LocationKind, TrafficMultipliers};

/// Environment variable overriding the map used by the service and CLI.
pub const MAP_PATH_ENV: &str = "CAMPUSNAV_MAP_PATH";

/// Serialized form of a campus map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    pub locations: Vec<LocationRecord>,
    pub connections: Vec<ConnectionRecord>,
    #[serde(default)]
    pub exits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub name: String,
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub kind: LocationKind,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub from: String,
    pub to: String,
    pub distance: u32,
    pub traffic: TrafficMultipliers,
}

impl MapDocument {
    /// Build the read-only graph, rejecting documents that break map invariants.
    pub fn into_graph(self) -> Result<CampusGraph> {
        let mut builder = CampusGraph::builder();
        for record in self.locations {
            builder.add_location(record.name, record.x, record.y, record.kind, record.icon)?;
        }
        for record in &self.connections {
            builder.connect(&record.from, &record.to, record.distance, record.traffic)?;
        }
        for exit in &self.exits {
            builder.add_exit(exit)?;
        }
        Ok(builder.build())
    }
}

/// Parse a JSON map document into a graph.
pub fn parse_campus_map(json: &str) -> Result<CampusGraph> {
    let document: MapDocument = serde_json::from_str(json)?;
    document.into_graph()
}

/// Load a JSON map document from disk.
pub fn load_campus_map(path: &Path) -> Result<CampusGraph> {
    if !path.exists() {
        return Err(Error::MapNotFound {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), "reading campus map");
    let contents = fs::read_to_string(path)?;
    let graph = parse_campus_map(&contents)?;
    info!(
        path = %path.display(),
        locations = graph.len(),
        connections = graph.edge_count(),
        exits = graph.exits().len(),
        "campus map loaded"
    );
    Ok(graph)
}

/// Resolve the map path from an explicit override or [`MAP_PATH_ENV`].
pub fn resolve_map_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env::var_os(MAP_PATH_ENV).map(PathBuf::from))
}

/// Load the map at `path`, falling back to the reference campus.
pub fn load_map_or_default(path: Option<&Path>) -> Result<CampusGraph> {
    match path {
        Some(path) => load_campus_map(path),
        None => {
            debug!("no map path configured, using reference campus");
            Ok(reference_campus())
        }
    }
}

/// The nine-location reference campus with exits at Main Gate and Sports Complex.
pub fn reference_campus() -> CampusGraph {
    reference_document()
        .into_graph()
        .unwrap_or_else(|e| unreachable!("reference campus is well-formed: {e}"))
}

/// The reference campus as a serializable document.
pub fn reference_document() -> MapDocument {
    let location = |name: &str, x, y, kind, icon: &str| LocationRecord {
        name: name.to_string(),
        x,
        y,
        kind,
        icon: icon.to_string(),
    };
    let connection = |from: &str, to: &str, distance, m, a, e| ConnectionRecord {
        from: from.to_string(),
        to: to.to_string(),
        distance,
        traffic: TrafficMultipliers::new(m, a, e),
    };

    MapDocument {
        locations: vec![
            location("Main Gate", 100, 300, LocationKind::Entrance, "🚪"),
            location("Library", 250, 250, LocationKind::Academic, "📚"),
            location("Computer Lab", 400, 200, LocationKind::Lab, "💻"),
            location("Lecture Hall", 550, 250, LocationKind::Academic, "🎓"),
            location("Admin Block", 250, 400, LocationKind::Admin, "🏢"),
            location("Cafeteria", 400, 380, LocationKind::Facility, "☕"),
            location("Sports Complex", 700, 200, LocationKind::Sports, "⚽"),
            location("Auditorium", 600, 400, LocationKind::Facility, "🎭"),
            location("Hostel", 750, 380, LocationKind::Residence, "🏠"),
        ],
        connections: vec![
            connection("Main Gate", "Library", 150, 1.5, 1.0, 1.2),
            connection("Main Gate", "Admin Block", 200, 1.8, 1.3, 1.0),
            connection("Library", "Computer Lab", 120, 1.6, 1.4, 1.0),
            connection("Computer Lab", "Lecture Hall", 100, 1.7, 1.5, 1.0),
            connection("Computer Lab", "Admin Block", 150, 1.4, 1.2, 1.0),
            connection("Lecture Hall", "Sports Complex", 200, 1.0, 1.3, 1.6),
            connection("Lecture Hall", "Cafeteria", 160, 1.3, 1.8, 1.4),
            connection("Admin Block", "Cafeteria", 100, 1.5, 1.2, 1.0),
            connection("Cafeteria", "Auditorium", 140, 1.0, 1.2, 1.5),
            connection("Sports Complex", "Auditorium", 180, 1.0, 1.4, 1.7),
            connection("Auditorium", "Hostel", 150, 1.2, 1.0, 1.3),
            connection("Hostel", "Sports Complex", 220, 1.0, 1.1, 1.4),
        ],
        exits: vec!["Main Gate".to_string(), "Sports Complex".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_campus_shape() {
        let graph = reference_campus();
        assert_eq!(graph.len(), 9);
        assert_eq!(graph.edge_count(), 12);
        assert_eq!(graph.exits(), ["Main Gate", "Sports Complex"]);
        assert_eq!(
            graph.connection("Hostel", "Auditorium").map(|c| c.distance),
            Some(150)
        );
    }

    #[test]
    fn document_round_trips_through_json() {
        let json = serde_json::to_string(&reference_document()).unwrap();
        let graph = parse_campus_map(&json).unwrap();
        assert_eq!(graph.len(), 9);
        assert!(graph.is_exit("Sports Complex"));
    }

    #[test]
    fn rejects_connection_to_unknown_location() {
        let json = r#"{
            "locations": [{"name": "A", "x": 0, "y": 0, "type": "lab"}],
            "connections": [{"from": "A", "to": "B", "distance": 5,
                "traffic": {"morning": 1.0, "afternoon": 1.0, "evening": 1.0}}]
        }"#;
        let err = parse_campus_map(json).unwrap_err();
        assert!(matches!(err, Error::InvalidMap { .. }));
        assert!(err.to_string().contains("'B'"));
    }

    #[test]
    fn rejects_unknown_location_kind() {
        let json = r#"{
            "locations": [{"name": "A", "x": 0, "y": 0, "type": "castle"}],
            "connections": []
        }"#;
        assert!(matches!(parse_campus_map(json), Err(Error::Json(_))));
    }

    #[test]
    fn missing_map_file_is_reported() {
        let err = load_campus_map(Path::new("/nonexistent/campus.json")).unwrap_err();
        assert!(matches!(err, Error::MapNotFound { .. }));
    }

    #[test]
    fn explicit_path_wins_over_environment() {
        let explicit = Path::new("/tmp/explicit.json");
        assert_eq!(
            resolve_map_path(Some(explicit)),
            Some(explicit.to_path_buf())
        );
    }
}
