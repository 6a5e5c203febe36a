//! Error types for the electrostatics solver.
//!
//! This module provides a unified error type [`ElectrostaticsError`] that covers
//! every precondition the grid, solver, and field extractor check. Errors are
//! discriminated by variant, never by message text.

use thiserror::Error;

/// Result type alias using [`ElectrostaticsError`].
pub type Result<T> = std::result::Result<T, ElectrostaticsError>;

/// Unified error type for all grid and solver operations.
#[derive(Error, Debug)]
pub enum ElectrostaticsError {
    // ============ Grid Errors ============
    /// Grid height or width is not a positive integer
    #[error("Invalid grid dimension for '{axis}': {value} (must be a positive integer)")]
    InvalidDimension { axis: &'static str, value: f64 },

    /// Supplied buffer does not hold exactly m*n elements
    #[error("Buffer '{buffer}' has length {actual}, expected {expected}")]
    ShapeMismatch {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Supplied buffer has the wrong element kind
    #[error("Buffer '{buffer}' must be a {expected}")]
    TypeMismatch {
        buffer: &'static str,
        expected: &'static str,
    },

    /// Cell index outside the grid
    #[error("Index ({i}, {j}) is outside the {m}x{n} grid")]
    IndexOutOfRange { i: i64, j: i64, m: usize, n: usize },

    // ============ Solver Errors ============
    /// Over-relaxation factor outside [1, 2)
    #[error("Relaxation factor omega = {omega} must satisfy 1 <= omega < 2")]
    InvalidRelaxationFactor { omega: f64 },

    /// Iteration bound is not a positive integer
    #[error("Maximum iterations must be a positive integer (got {value})")]
    InvalidIterationBound { value: f64 },

    /// Convergence tolerance is negative or NaN
    #[error("Tolerance must be a non-negative number (got {tolerance})")]
    InvalidTolerance { tolerance: f64 },

    // ============ Field Errors ============
    /// Grid too small along some axis to estimate a gradient
    #[error("A {m}x{n} grid is too small to compute a field (need at least 2x2)")]
    InsufficientResolution { m: usize, n: usize },

    // ============ Scenario Errors ============
    /// Preset name not recognised
    #[error("Unknown scenario '{name}' (expected 'dipole' or 'capacitor')")]
    UnknownScenario { name: String },

    // ============ Lifecycle Errors ============
    /// Operation on a simulation whose grid has been released
    #[error("Simulation used after destroy")]
    UseAfterDestroy,

    // ============ I/O Errors ============
    /// Error writing grid output
    #[error("Failed to write output: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
}

impl ElectrostaticsError {
    /// Create an index out of range error
    pub fn index_out_of_range(i: i64, j: i64, m: usize, n: usize) -> Self {
        Self::IndexOutOfRange { i, j, m, n }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(buffer: &'static str, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            buffer,
            expected,
            actual,
        }
    }
}

impl From<std::io::Error> for ElectrostaticsError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}
