//! Map command handler.

use std::path::Path;

use anyhow::Result;

use crate::commands::load_graph;
use crate::output::{render_json, render_map_text, OutputFormat};
use crate::terminal::ColorPalette;

/// Render the loaded campus map. JSON output matches `GET /api/graph`.
pub fn handle_map_command(map: Option<&Path>, format: OutputFormat) -> Result<String> {
    let graph = load_graph(map)?;
    match format {
        OutputFormat::Json => render_json(&graph),
        OutputFormat::Text => Ok(render_map_text(&graph, &ColorPalette::detect())),
    }
}
