//! Solver configuration and parameter validation.

use crate::error::{ElectrostaticsError, Result};
use crate::grid::validate;

use super::{DEFAULT_MAX_ITERATIONS, DEFAULT_OMEGA, DEFAULT_TOLERANCE};

/// Configuration for a relaxation solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Over-relaxation factor, `1 <= omega < 2`.
    pub omega: f32,
    /// Maximum number of sweeps.
    pub max_iterations: usize,
    /// Stop once a sweep changes no cell by this much or more (volts).
    pub tolerance: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            omega: DEFAULT_OMEGA,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the over-relaxation factor.
    ///
    /// - 1.0: plain Gauss-Seidel
    /// - 1.75 (default): good for grids around 100x100
    /// - closer to 2.0: faster on large grids, oscillates if pushed too far
    pub fn with_omega(mut self, omega: f32) -> Self {
        self.omega = omega;
        self
    }

    /// Set the maximum number of sweeps.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance (in volts).
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Check every parameter against its valid range.
    pub fn validate(&self) -> Result<()> {
        validate_omega(self.omega)?;
        if self.max_iterations == 0 {
            return Err(ElectrostaticsError::InvalidIterationBound { value: 0.0 });
        }
        validate_tolerance(self.tolerance)
    }
}

/// Check `1 <= omega < 2`. NaN is rejected.
pub(crate) fn validate_omega(omega: f32) -> Result<()> {
    if (1.0..2.0).contains(&omega) {
        Ok(())
    } else {
        Err(ElectrostaticsError::InvalidRelaxationFactor {
            omega: f64::from(omega),
        })
    }
}

pub(crate) fn validate_tolerance(tolerance: f32) -> Result<()> {
    if tolerance >= 0.0 {
        Ok(())
    } else {
        Err(ElectrostaticsError::InvalidTolerance {
            tolerance: f64::from(tolerance),
        })
    }
}

/// Convert an untyped iteration count into a positive integer.
pub fn max_iterations_from_f64(value: f64) -> Result<usize> {
    validate::positive_integer(value).ok_or(ElectrostaticsError::InvalidIterationBound { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SolverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_iterations, 10_000);
    }

    #[test]
    fn test_omega_range() {
        assert!(validate_omega(1.0).is_ok());
        assert!(validate_omega(1.999).is_ok());
        for bad in [0.99, 2.0, -1.0, f32::NAN] {
            assert!(matches!(
                validate_omega(bad),
                Err(ElectrostaticsError::InvalidRelaxationFactor { .. })
            ));
        }
    }

    #[test]
    fn test_iteration_bound() {
        let config = SolverConfig::new().with_max_iterations(0);
        assert!(matches!(
            config.validate(),
            Err(ElectrostaticsError::InvalidIterationBound { .. })
        ));
        assert_eq!(max_iterations_from_f64(500.0).unwrap(), 500);
        assert!(max_iterations_from_f64(1.5).is_err());
        assert!(max_iterations_from_f64(0.0).is_err());
        assert!(max_iterations_from_f64(2f64.powi(64)).is_err());
    }

    #[test]
    fn test_tolerance() {
        assert!(SolverConfig::new().with_tolerance(0.0).validate().is_ok());
        assert!(matches!(
            SolverConfig::new().with_tolerance(-1e-3).validate(),
            Err(ElectrostaticsError::InvalidTolerance { .. })
        ));
        assert!(SolverConfig::new().with_tolerance(f32::NAN).validate().is_err());
    }
}
