//! Subcommand handlers. `main.rs` parses arguments and dispatches here.

pub mod evacuate;
pub mod map;
pub mod route;

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;

use campusnav_lib::{load_map_or_default, resolve_map_path, CampusGraph, ConstraintStore};

/// Constraint flags shared by `route` and `evacuate`.
///
/// Constraints only live for one invocation; nothing is persisted.
#[derive(Args, Debug, Clone, Default)]
pub struct ConstraintArgs {
    /// Block the connection between two locations, written `A:B`. Repeatable.
    #[arg(long = "block", value_name = "A:B", value_parser = parse_edge)]
    pub blocks: Vec<(String, String)>,

    /// Mark a location as a hazard zone. Repeatable.
    #[arg(long = "hazard", value_name = "LOCATION")]
    pub hazards: Vec<String>,
}

impl ConstraintArgs {
    /// Build a store for `graph`, rejecting unknown locations and connections.
    pub fn build_store(&self, graph: &CampusGraph) -> Result<ConstraintStore> {
        let store = ConstraintStore::new();
        for (a, b) in &self.blocks {
            store
                .block_edge(graph, a, b)
                .with_context(|| format!("cannot block {a}:{b}"))?;
        }
        for hazard in &self.hazards {
            store
                .add_hazard(graph, hazard)
                .with_context(|| format!("cannot mark {hazard} as a hazard"))?;
        }
        Ok(store)
    }
}

/// Parse `A:B` into a trimmed pair of location names.
pub fn parse_edge(value: &str) -> Result<(String, String)> {
    let Some((a, b)) = value.split_once(':') else {
        bail!("expected two locations separated by ':', got '{value}'");
    };
    let (a, b) = (a.trim(), b.trim());
    if a.is_empty() || b.is_empty() {
        bail!("both locations are required in '{value}'");
    }
    Ok((a.to_string(), b.to_string()))
}

/// Load the map from `--map`, `CAMPUSNAV_MAP_PATH`, or the built-in campus.
pub fn load_graph(map: Option<&Path>) -> Result<CampusGraph> {
    let path = resolve_map_path(map);
    load_map_or_default(path.as_deref()).with_context(|| match &path {
        Some(path) => format!("failed to load campus map from {}", path.display()),
        None => "failed to build the reference campus".to_string(),
    })
}
