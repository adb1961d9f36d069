//! Shared fixtures for integration tests.

use std::fs;
use std::path::PathBuf;

use campusnav_lib::{reference_document, CampusGraph, LocationKind, TrafficMultipliers};
use tempfile::TempDir;

/// Write the reference campus to a temporary JSON file.
///
/// The returned `TempDir` must be kept alive for as long as the path is used.
#[allow(dead_code)]
pub fn reference_map_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("campus.json");
    let json = serde_json::to_string_pretty(&reference_document()).expect("serialize map");
    fs::write(&path, json).expect("write map");
    (dir, path)
}

/// Build a graph from `(a, b, distance)` triples with flat traffic.
#[allow(dead_code)]
pub fn flat_graph(nodes: &[&str], edges: &[(&str, &str, u32)]) -> CampusGraph {
    let mut builder = CampusGraph::builder();
    for name in nodes {
        builder
            .add_location(*name, 0, 0, LocationKind::Facility, "")
            .expect("add location");
    }
    for (a, b, distance) in edges {
        builder
            .connect(a, b, *distance, TrafficMultipliers::new(1.0, 1.0, 1.0))
            .expect("connect");
    }
    builder.build()
}
