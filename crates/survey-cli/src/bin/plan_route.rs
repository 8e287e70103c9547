//! CLI tool to route a survey mission around its keep-out obstacles.
//!
//! Reads a mission JSON file (waypoints, obstacles, optional boundary),
//! runs the router, and writes the routed waypoint list as JSON.

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use survey_core::{route, MissionPlan, Waypoint};

/// Route a survey coverage path around circular keep-out obstacles
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Mission JSON file (waypoints, obstacles, optional boundary)
    #[arg(long)]
    mission: PathBuf,

    /// Write the result here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Debug, Serialize)]
struct RouteOutput {
    waypoints: Vec<Waypoint>,
    input_waypoints: usize,
    output_waypoints: usize,
    obstacles: usize,
}

fn main() -> anyhow::Result<()> {
    survey_cli::init_tracing()?;
    let args = Args::parse();

    let plan = MissionPlan::load(&args.mission)
        .with_context(|| format!("loading mission {}", args.mission.display()))?;
    let registry = plan.build_registry();

    let routed = route(&plan.waypoints, &registry, plan.boundary.as_deref());

    let output = RouteOutput {
        input_waypoints: plan.waypoints.len(),
        output_waypoints: routed.len(),
        obstacles: registry.len(),
        waypoints: routed,
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!(
                "Routed {} waypoints -> {} (obstacles: {})",
                output.input_waypoints, output.output_waypoints, output.obstacles
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
