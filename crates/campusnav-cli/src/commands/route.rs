//! Route command handler.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use campusnav_lib::{plan_route, RouteRequest, TimeOfDay};

use crate::commands::{load_graph, ConstraintArgs};
use crate::output::{render_json, render_route_text, OutputFormat};
use crate::terminal::ColorPalette;

/// Arguments for the route command.
#[derive(Args, Debug, Clone)]
pub struct RouteArgs {
    /// Starting location name.
    #[arg(long = "from")]
    pub from: String,

    /// Destination location name.
    #[arg(long = "to")]
    pub to: String,

    /// Traffic period: morning, afternoon or evening.
    #[arg(long = "time", default_value = "morning", value_parser = parse_time)]
    pub time: TimeOfDay,

    /// Price connections by hazard penalties instead of traffic.
    #[arg(long)]
    pub emergency: bool,

    /// Print every step the search takes.
    #[arg(long)]
    pub trace: bool,

    #[command(flatten)]
    pub constraints: ConstraintArgs,
}

impl RouteArgs {
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest::new(self.from.trim(), self.to.trim())
            .at(self.time)
            .emergency(self.emergency)
            .with_trace(self.trace)
    }
}

pub(crate) fn parse_time(value: &str) -> Result<TimeOfDay> {
    Ok(value.parse::<TimeOfDay>()?)
}

/// Compute a route and render it. An unreachable destination is reported,
/// not treated as a failure.
pub fn handle_route_command(map: Option<&Path>, format: OutputFormat, args: &RouteArgs) -> Result<String> {
    let graph = load_graph(map)?;
    let store = args.constraints.build_store(&graph)?;
    let request = args.to_request();

    let result = plan_route(&graph, &store, &request)
        .with_context(|| format!("failed to plan route from {} to {}", request.start, request.goal))?;

    tracing::debug!(distance = ?result.distance, hops = result.hop_count(), "route planned");

    match format {
        OutputFormat::Json => render_json(&result),
        OutputFormat::Text => Ok(render_route_text(
            &request,
            &result,
            &store.snapshot(),
            &ColorPalette::detect(),
        )),
    }
}
