//! Evacuate command handler.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use campusnav_lib::{plan_evacuation, EvacuationRequest, TimeOfDay};

use crate::commands::route::parse_time;
use crate::commands::{load_graph, ConstraintArgs};
use crate::output::{render_exit_text, render_json, OutputFormat};
use crate::terminal::ColorPalette;

#[derive(Args, Debug, Clone)]
pub struct EvacuateArgs {
    /// Location to evacuate from.
    #[arg(long = "from")]
    pub from: String,

    /// Accepted for symmetry with `route`; emergency costs ignore traffic.
    #[arg(long = "time", default_value = "morning", value_parser = parse_time)]
    pub time: TimeOfDay,

    /// Print the search steps towards the chosen exit.
    #[arg(long)]
    pub trace: bool,

    #[command(flatten)]
    pub constraints: ConstraintArgs,
}

/// Find the nearest reachable exit and render it.
pub fn handle_evacuate_command(
    map: Option<&Path>,
    format: OutputFormat,
    args: &EvacuateArgs,
) -> Result<String> {
    let graph = load_graph(map)?;
    let store = args.constraints.build_store(&graph)?;
    let request = EvacuationRequest::new(args.from.trim())
        .at(args.time)
        .with_trace(args.trace);

    let route = plan_evacuation(&graph, &store, &request)
        .with_context(|| format!("failed to find an exit from {}", request.start))?;

    match format {
        OutputFormat::Json => render_json(&route),
        OutputFormat::Text => Ok(render_exit_text(
            &request.start,
            &route,
            &store.snapshot(),
            &ColorPalette::detect(),
        )),
    }
}
