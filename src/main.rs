//! Electrostatics - 2D potential and field solver
//!
//! Solves a preset electrode layout and writes one quantity to stdout.
//!
//! # Usage
//!
//! ```bash
//! electrostatics --scenario capacitor --quantity magnitude > field.txt
//! electrostatics -m 201 -n 201 --format f32le > potential.f32
//! ```

use std::io::{self, BufWriter};

use clap::Parser;
use electrostatics_core::{
    error::Result,
    output::{self, Format, Quantity},
    solver::{DEFAULT_MAX_ITERATIONS, DEFAULT_OMEGA, DEFAULT_TOLERANCE},
    Scenario, Simulation, SolverConfig, DEFAULT_GRID_SIZE,
};
use log::{info, LevelFilter};

/// 2D electrostatic potential solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid height (rows)
    #[arg(short = 'm', long, default_value_t = DEFAULT_GRID_SIZE)]
    rows: usize,

    /// Grid width (columns)
    #[arg(short = 'n', long, default_value_t = DEFAULT_GRID_SIZE)]
    cols: usize,

    /// Electrode layout (dipole, capacitor)
    #[arg(short, long, default_value_t = Scenario::Dipole)]
    scenario: Scenario,

    /// Voltage to hold the grid boundary at
    #[arg(short, long)]
    boundary: Option<f32>,

    /// Over-relaxation factor (1 <= omega < 2)
    #[arg(short, long, default_value_t = DEFAULT_OMEGA)]
    omega: f32,

    /// Maximum number of sweeps
    #[arg(short = 'i', long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Stop when no cell changes by this much in a sweep (volts)
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f32,

    /// Quantity to write
    #[arg(short, long, value_enum, default_value_t = Quantity::Potential)]
    quantity: Quantity,

    /// Output encoding
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log level (overrides RUST_LOG)
    #[arg(short, long)]
    log_level: Option<LevelFilter>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if let Some(level) = args.log_level {
        logger.filter_level(level);
    }
    logger.init();

    let config = SolverConfig::new()
        .with_omega(args.omega)
        .with_max_iterations(args.max_iterations)
        .with_tolerance(args.tolerance);

    // Build the electrode layout
    let mut sim = Simulation::with_config(args.rows, args.cols, config)?;
    sim.apply_scenario(args.scenario)?;
    if let Some(voltage) = args.boundary {
        sim.set_default_boundary(Some(voltage))?;
    }

    // Relax and extract the field
    let report = sim.run()?;
    info!(
        "{} on {}x{}: {} sweeps, delta = {:e}, converged = {}",
        args.scenario, args.rows, args.cols, report.iterations, report.delta, report.converged
    );

    let mut out = BufWriter::new(io::stdout().lock());
    output::write_grid(&mut out, sim.grid()?, args.quantity, args.format)?;

    Ok(())
}
