//! Campus navigation library entry points.
//!
//! This crate models a campus as a weighted undirected graph whose edge costs
//! depend on time-of-day traffic, blocked connections and hazard zones. It
//! exposes Dijkstra routing with an optional step-by-step trace and a
//! nearest-exit resolver for evacuations. Higher-level consumers (CLI, HTTP
//! service) should only depend on the items exported here instead of
//! reimplementing behavior.

#![deny(warnings)]

pub mod constraints;
pub mod dataset;
pub mod error;
pub mod evacuation;
pub mod graph;
pub mod path;
pub mod routing;
pub mod trace;
pub mod weight;

pub use constraints::{ConstraintSnapshot, ConstraintStore, EdgeKey};
pub use dataset::{
    load_campus_map, load_map_or_default, parse_campus_map, reference_campus, reference_document,
    resolve_map_path, MapDocument, MAP_PATH_ENV,
};
pub use error::{Error, Result};
pub use evacuation::{find_nearest_exit, ExitRoute};
pub use graph::{
    verify_symmetry, CampusGraph, Connection, GraphBuilder, Location, LocationKind, TimeOfDay,
    TrafficMultipliers,
};
pub use path::{find_route_dijkstra, PathResult};
pub use routing::{plan_evacuation, plan_route, EvacuationRequest, RouteRequest};
pub use trace::{FrontierEntry, SearchSnapshot, TraceEvent, TraceEventKind};
pub use weight::{EdgeWeigher, WeightMode, HAZARD_PENALTY};
