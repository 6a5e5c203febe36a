//! Relaxation solver for the discrete Laplace equation.
//!
//! This module drives the potential of every free cell toward the average of
//! its four neighbours using successive over-relaxation (SOR):
//!
//! ```text
//! v*      = (v[i-1,j] + v[i+1,j] + v[i,j-1] + v[i,j+1]) / 4
//! v[i,j] += omega * (v* - v[i,j])
//! ```
//!
//! Updates are applied in place in row-major order, so cells later in a sweep
//! already see the new values of their upper and left neighbours
//! (Gauss-Seidel ordering). The sweep order is fixed; changing it changes the
//! exact trajectory of the iteration.
//!
//! Electrode cells are never written. Free cells on the outer edge of the grid
//! average only the neighbours that exist.

mod config;
mod simulation;
mod sor;

pub use config::{max_iterations_from_f64, SolverConfig};
pub use simulation::Simulation;
pub use sor::{relax, solve, step, SolveReport};

/// Default over-relaxation factor.
pub const DEFAULT_OMEGA: f32 = 1.75;

/// Default maximum number of sweeps per solve.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Default convergence tolerance on the per-sweep maximum change (volts).
pub const DEFAULT_TOLERANCE: f32 = 1e-6;
