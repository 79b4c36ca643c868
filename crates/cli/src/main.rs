//! Headless cockpit simulator.
//!
//! Runs the simulation at a fixed frame rate, feeding scripted key events from
//! an optional scenario file, and prints sampled dashboard readouts.
//!
//! ```sh
//! RUST_LOG=debug cargo run -p cockpit-cli -- --scenario drive.toml --duration 60
//! ```

mod report;
mod scenario;

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use cockpit_sim::{ConfigError, Simulation, SimulationConfig, controls::handle_key};
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use report::{Sample, dashboard_line};
use scenario::{Scenario, ScenarioError};

#[derive(Debug, Parser)]
#[command(name = "cockpit", version, about = "Headless vehicle and climate simulator")]
struct Args {
    /// TOML file with initial conditions and frame pacing.
    #[arg(long)]
    config: Option<PathBuf>,

    /// TOML file with scheduled key events.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Simulated time to run, in seconds.
    #[arg(long, default_value_t = 30.0, value_parser = parse_duration)]
    duration: f64,

    /// Frame delta fed to the pacer, in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Print every n-th tick.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    every: u64,

    /// Emit samples as JSON lines instead of dashboard readouts.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error("failed to encode sample: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let mut sim = match &args.config {
        Some(path) => Simulation::from_config(&SimulationConfig::load(path)?)?,
        None => Simulation::new(),
    };
    let mut queue = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    }
    .into_queue();

    info!(duration_s = args.duration, dt = args.dt, "starting run");

    let mut tick: u64 = 0;
    while sim.state().runtime_s < args.duration {
        while let Some(event) = queue.pop_due(sim.state().runtime_s) {
            handle_key(&mut sim, event);
        }

        sim.tick_paced(args.dt);
        tick += 1;

        if tick.is_multiple_of(args.every) {
            emit(&sim, tick, args.json)?;
        }
    }

    if !tick.is_multiple_of(args.every) {
        emit(&sim, tick, args.json)?;
    }
    if !queue.is_empty() {
        warn!("scenario events scheduled after the end of the run were not delivered");
    }
    info!(
        ticks = tick,
        fuel_pct = sim.state().fuel_pct,
        cabin_c = sim.state().hvac.cabin_temp_c,
        "run complete"
    );

    Ok(())
}

fn emit(sim: &Simulation, tick: u64, json: bool) -> Result<(), CliError> {
    if json {
        let sample = Sample {
            tick,
            state: sim.state(),
            heat_flows: sim.heat_flows(),
        };
        println!("{}", serde_json::to_string(&sample)?);
    } else {
        println!("{}", dashboard_line(sim.state()));
    }
    Ok(())
}

/// Accepts a finite, non-negative number of seconds.
fn parse_duration(text: &str) -> Result<f64, String> {
    let seconds: f64 = text
        .parse()
        .map_err(|err| format!("`{text}` is not a number: {err}"))?;
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(seconds)
    } else {
        Err(format!("`{text}` must be a finite, non-negative number of seconds"))
    }
}
