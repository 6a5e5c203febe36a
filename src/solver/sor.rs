//! Successive over-relaxation sweeps.

use log::{info, trace, warn};

use crate::error::Result;
use crate::grid::Grid;

use super::config::{validate_omega, SolverConfig};

/// Outcome of a relaxation solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveReport {
    /// Number of sweeps performed
    pub iterations: usize,
    /// Maximum absolute change in the final sweep (volts)
    pub delta: f32,
    /// Whether `delta` dropped below the requested tolerance
    pub converged: bool,
}

/// Perform exactly one sweep over the grid.
///
/// Returns the largest absolute change applied to any cell.
pub fn step(grid: &mut Grid, omega: f32) -> Result<f32> {
    validate_omega(omega)?;
    Ok(sweep(grid, omega))
}

/// Sweep until the change drops below `tolerance` or `max_iterations` sweeps
/// have run, returning the delta of the last sweep.
pub fn solve(grid: &mut Grid, omega: f32, max_iterations: usize, tolerance: f32) -> Result<f32> {
    let config = SolverConfig {
        omega,
        max_iterations,
        tolerance,
    };
    relax(grid, &config).map(|report| report.delta)
}

/// Run a full solve with the given configuration.
///
/// Running out of iterations is not an error; check [`SolveReport::converged`].
pub fn relax(grid: &mut Grid, config: &SolverConfig) -> Result<SolveReport> {
    config.validate()?;

    let mut delta = 0.0;
    let mut iterations = 0;
    while iterations < config.max_iterations {
        delta = sweep(grid, config.omega);
        iterations += 1;
        trace!("sweep {}: delta = {:e}", iterations, delta);
        if delta < config.tolerance {
            break;
        }
    }

    let converged = delta < config.tolerance;
    info!(
        "relaxation complete: {} sweeps on {} grid, delta = {:e}",
        iterations,
        grid.dimensions(),
        delta
    );
    if !converged {
        warn!(
            "tolerance {:e} not reached after {} sweeps (delta = {:e})",
            config.tolerance, iterations, delta
        );
    }

    Ok(SolveReport {
        iterations,
        delta,
        converged,
    })
}

/// One in-place Gauss-Seidel sweep with over-relaxation, row-major order.
fn sweep(grid: &mut Grid, omega: f32) -> f32 {
    let dims = grid.dimensions();
    let (rows, cols) = (dims.rows, dims.cols);
    let (v, fixed) = grid.relaxation_buffers();

    let mut max_delta = 0.0f32;
    for i in 0..rows {
        for j in 0..cols {
            let idx = i * cols + j;
            if fixed[idx] {
                continue;
            }

            let target = if i > 0 && i + 1 < rows && j > 0 && j + 1 < cols {
                (v[idx - cols] + v[idx + cols] + v[idx - 1] + v[idx + 1]) / 4.0
            } else {
                match edge_average(v, rows, cols, i, j) {
                    Some(avg) => avg,
                    None => continue,
                }
            };

            let delta = omega * (target - v[idx]);
            v[idx] += delta;
            max_delta = max_delta.max(delta.abs());
        }
    }
    max_delta
}

/// Average of the in-range neighbours of an edge cell, in the same
/// up/down/left/right order as the interior stencil.
fn edge_average(v: &[f32], rows: usize, cols: usize, i: usize, j: usize) -> Option<f32> {
    let idx = i * cols + j;
    let mut sum = 0.0f32;
    let mut count = 0u8;

    if i > 0 {
        sum += v[idx - cols];
        count += 1;
    }
    if i + 1 < rows {
        sum += v[idx + cols];
        count += 1;
    }
    if j > 0 {
        sum += v[idx - 1];
        count += 1;
    }
    if j + 1 < cols {
        sum += v[idx + 1];
        count += 1;
    }

    (count > 0).then(|| sum / f32::from(count))
}
