//! # Electrostatics Core
//!
//! A 2D electrostatic potential and field solver.
//!
//! This library provides:
//! - A rectangular grid of potentials with fixed-voltage electrode cells
//! - Successive over-relaxation (SOR) for the discrete Laplace equation
//! - Electric field extraction by finite differences
//! - Preset electrode layouts (dipole, parallel-plate capacitor)
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`grid`] - Grid state: potential, electrode mask, field buffers
//! - [`solver`] - Relaxation sweeps, convergence control, and the [`Simulation`] session
//! - [`field`] - Electric field from potential
//! - [`scenario`] - Preset electrode configurations
//! - [`output`] - Grid serialization (CLI only)
//!
//! ## Usage
//!
//! ### Native
//!
//! ```
//! use electrostatics_core::{Simulation, Scenario};
//!
//! let mut sim = Simulation::new(51, 51)?;
//! sim.apply_scenario(Scenario::Capacitor)?;
//! let report = sim.run()?;
//! let (ex, ey) = sim.field()?;
//! # let _ = (report, ex, ey);
//! # Ok::<(), electrostatics_core::ElectrostaticsError>(())
//! ```
//!
//! ### CLI
//!
//! ```bash
//! electrostatics --scenario capacitor --quantity potential > potential.txt
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmSimulation } from 'electrostatics_core';
//!
//! const sim = new WasmSimulation(101, 101);
//! sim.add_electrode(50, 40, 10);
//! sim.add_electrode(50, 60, -10);
//! const delta = sim.run(1.75, 10000, 1e-6);
//! ```
//!
//! ## Method
//!
//! Each free cell is repeatedly replaced by an over-relaxed average of its
//! four neighbours, in place and in row-major order, until the largest change
//! in a sweep drops below the tolerance. Electrode cells (including the grid
//! boundary by default) keep their voltage throughout. The field is then
//! `E = -∇V` estimated with central differences, one-sided at the edges.

pub mod error;
pub mod field;
pub mod grid;
pub mod scenario;
pub mod solver;

#[cfg(feature = "cli")]
pub mod output;

// Re-export main types for convenience
pub use error::{ElectrostaticsError, Result};
pub use grid::{Dimensions, Grid};
pub use scenario::Scenario;
pub use solver::{Simulation, SolveReport, SolverConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmSimulation;

/// Default grid height and width.
pub const DEFAULT_GRID_SIZE: usize = 101;
