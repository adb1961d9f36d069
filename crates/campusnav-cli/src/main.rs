use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use campusnav_cli::commands::evacuate::{handle_evacuate_command, EvacuateArgs};
use campusnav_cli::commands::map::handle_map_command;
use campusnav_cli::commands::route::{handle_route_command, RouteArgs};
use campusnav_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Campus route planning and evacuation")]
struct Cli {
    /// JSON campus map; defaults to CAMPUSNAV_MAP_PATH, then the built-in campus.
    #[arg(long, global = true)]
    map: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the cheapest route between two locations.
    Route(RouteArgs),
    /// Find the nearest reachable exit under hazard penalties.
    Evacuate(EvacuateArgs),
    /// Print every location, connection and exit.
    Map,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let map = cli.map.as_deref();

    let output = match &cli.command {
        Command::Route(args) => handle_route_command(map, cli.format, args)?,
        Command::Evacuate(args) => handle_evacuate_command(map, cli.format, args)?,
        Command::Map => handle_map_command(map, cli.format)?,
    };
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
