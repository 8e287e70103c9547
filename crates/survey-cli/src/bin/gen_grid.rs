//! CLI tool to generate a serpentine coverage mission.
//!
//! Produces a mission JSON file (ready for `plan_route`) containing a
//! lawnmower scan-line grid and any obstacles given on the command line.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use survey_cli::serpentine_grid;
use survey_core::{MissionPlan, ObstacleSpec, Waypoint};

/// Generate a serpentine survey grid as a mission file
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Southwest corner latitude
    #[arg(long, default_value_t = 33.6846)]
    lat: f64,

    /// Southwest corner longitude
    #[arg(long, default_value_t = -117.8265)]
    lon: f64,

    /// Scan line length in meters (northward)
    #[arg(long, default_value_t = 400.0)]
    line_length: f64,

    /// Spacing between scan lines in meters
    #[arg(long, default_value_t = 30.0)]
    spacing: f64,

    /// Number of scan lines
    #[arg(long, default_value_t = 8)]
    lines: usize,

    /// Obstacle as "lat,lon,radius_m[,safe_distance_m]"; repeatable
    #[arg(long = "obstacle")]
    obstacles: Vec<String>,

    /// Write the mission here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn parse_obstacle(spec: &str) -> anyhow::Result<ObstacleSpec> {
    let parts: Vec<f64> = spec
        .split(',')
        .map(|field| field.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .with_context(|| format!("parsing obstacle {spec:?}"))?;

    match parts.as_slice() {
        [lat, lon, radius_m] => Ok(ObstacleSpec {
            lat: *lat,
            lon: *lon,
            radius_m: *radius_m,
            safe_distance_m: 1.0,
        }),
        [lat, lon, radius_m, safe_distance_m] => Ok(ObstacleSpec {
            lat: *lat,
            lon: *lon,
            radius_m: *radius_m,
            safe_distance_m: *safe_distance_m,
        }),
        _ => bail!("obstacle must be lat,lon,radius_m[,safe_distance_m], got {spec:?}"),
    }
}

fn main() -> anyhow::Result<()> {
    survey_cli::init_tracing()?;
    let args = Args::parse();

    let waypoints = serpentine_grid(
        Waypoint::new(args.lat, args.lon),
        args.line_length,
        args.spacing,
        args.lines,
    );
    if waypoints.is_empty() {
        bail!("grid parameters produced no waypoints");
    }

    let obstacles = args
        .obstacles
        .iter()
        .map(|spec| parse_obstacle(spec))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let plan = MissionPlan {
        waypoints,
        obstacles,
        boundary: None,
    };
    let errors = plan.validate();
    if !errors.is_empty() {
        bail!("invalid mission: {}", errors.join("; "));
    }

    let json = serde_json::to_string_pretty(&plan)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!(
                "Wrote {} scan lines ({} waypoints) to {}",
                args.lines,
                plan.waypoints.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
