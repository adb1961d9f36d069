//! Output formatting for routes, evacuations and the campus map.
//!
//! Renderers build a `String` so tests can inspect them; the command handlers
//! decide where it goes.

use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use campusnav_lib::{
    CampusGraph, ConstraintSnapshot, ExitRoute, PathResult, RouteRequest, TraceEvent,
    TraceEventKind,
};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON matching the HTTP API bodies
    Json,
}

/// Serialize any result the way the HTTP API would return it.
pub fn render_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn kind_label(kind: TraceEventKind) -> &'static str {
    match kind {
        TraceEventKind::Init => "init",
        TraceEventKind::Visit => "visit",
        TraceEventKind::Relax => "relax",
        TraceEventKind::Found => "found",
    }
}

fn render_path_lines(out: &mut String, path: &[String], goal_tag: &str, palette: &ColorPalette) {
    let last = path.len().saturating_sub(1);
    for (index, name) in path.iter().enumerate() {
        let tag = if index == 0 {
            format!("{}START{} ", palette.tag_start, palette.reset)
        } else if index == last {
            format!("{}{goal_tag}{} ", palette.tag_goal, palette.reset)
        } else {
            format!("{}   ├─{} ", palette.gray, palette.reset)
        };
        let _ = writeln!(out, "  {tag}{}{name}{}", palette.white_bold, palette.reset);
    }
}

fn render_trace(out: &mut String, trace: &[TraceEvent], palette: &ColorPalette) {
    let _ = writeln!(out, "\nAlgorithm trace ({} steps):", trace.len());
    for (index, event) in trace.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>3}. [{}] {}",
            index + 1,
            kind_label(event.kind),
            event.message
        );
        let _ = writeln!(out, "       {}{}{}", palette.gray, event.description, palette.reset);
    }
}

fn render_constraints(out: &mut String, constraints: &ConstraintSnapshot, palette: &ColorPalette) {
    if constraints.is_empty() {
        return;
    }
    let blocked: Vec<String> = constraints.blocked().map(ToString::to_string).collect();
    if !blocked.is_empty() {
        let _ = writeln!(out, "Blocked: {}", blocked.join(", "));
    }
    let hazards: Vec<&str> = constraints.hazards().collect();
    if !hazards.is_empty() {
        let _ = writeln!(
            out,
            "Hazards: {}{}{}",
            palette.red,
            hazards.join(", "),
            palette.reset
        );
    }
}

/// Text view of a route query.
pub fn render_route_text(
    request: &RouteRequest,
    result: &PathResult,
    constraints: &ConstraintSnapshot,
    palette: &ColorPalette,
) -> String {
    let mut out = String::new();
    let mode = if request.emergency {
        "emergency".to_string()
    } else {
        request.time_of_day.to_string()
    };

    render_constraints(&mut out, constraints, palette);

    match result.distance {
        Some(distance) => {
            let _ = writeln!(
                out,
                "Route from {} to {} ({} hops; {mode}):",
                request.start,
                request.goal,
                result.hop_count()
            );
            render_path_lines(&mut out, &result.path, "GOAL", palette);
            let _ = writeln!(
                out,
                "\nTotal cost: {}{distance}{}",
                palette.green, palette.reset
            );
        }
        None => {
            let _ = writeln!(
                out,
                "{}No route from {} to {} ({mode}){}",
                palette.red, request.start, request.goal, palette.reset
            );
        }
    }
    let _ = writeln!(out, "Locations visited: {}", result.visited.len());

    if let Some(trace) = &result.trace {
        render_trace(&mut out, trace, palette);
    }
    out
}

/// Text view of an evacuation query.
pub fn render_exit_text(
    start: &str,
    route: &ExitRoute,
    constraints: &ConstraintSnapshot,
    palette: &ColorPalette,
) -> String {
    let mut out = String::new();
    render_constraints(&mut out, constraints, palette);

    let _ = writeln!(
        out,
        "Nearest exit from {start}: {}{}{}",
        palette.white_bold, route.exit, palette.reset
    );
    render_path_lines(&mut out, &route.path, "EXIT", palette);
    let _ = writeln!(
        out,
        "\nEmergency cost: {}{}{}",
        palette.green, route.distance, palette.reset
    );

    if let Some(trace) = &route.trace {
        render_trace(&mut out, trace, palette);
    }
    out
}

/// Text listing of every location, its connections and the exits.
pub fn render_map_text(graph: &CampusGraph, palette: &ColorPalette) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} locations, {} connections",
        graph.len(),
        graph.edge_count()
    );

    for location in graph.locations() {
        let exit = if graph.is_exit(&location.name) {
            format!(" {}EXIT{}", palette.tag_exit, palette.reset)
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "\n{}{}{} [{}] ({}, {}){exit}",
            palette.white_bold, location.name, palette.reset, location.kind, location.x, location.y
        );
        for (neighbour, connection) in &location.connections {
            let traffic = connection.traffic;
            let _ = writeln!(
                out,
                "  {}└─{} {neighbour}: {} m (morning x{}, afternoon x{}, evening x{})",
                palette.gray,
                palette.reset,
                connection.distance,
                traffic.morning,
                traffic.afternoon,
                traffic.evening
            );
        }
    }

    let _ = writeln!(out, "\nExits: {}", graph.exits().join(", "));
    out
}
