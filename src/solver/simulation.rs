//! Caller-owned simulation session.

use log::debug;

use crate::error::{ElectrostaticsError, Result};
use crate::field;
use crate::grid::{Dimensions, Grid};
use crate::scenario::Scenario;

use super::config::SolverConfig;
use super::sor::{self, SolveReport};

/// One simulation session: a grid plus the solver settings used by [`run`].
///
/// The session owns its buffers exclusively. After [`destroy`] every
/// operation, including a second `destroy`, fails with
/// [`ElectrostaticsError::UseAfterDestroy`].
///
/// [`run`]: Simulation::run
/// [`destroy`]: Simulation::destroy
#[derive(Debug)]
pub struct Simulation {
    /// `None` once destroyed
    grid: Option<Grid>,
    config: SolverConfig,
}

impl Simulation {
    /// Create a session with a zeroed `rows x cols` grid and grounded boundary.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Self::with_config(rows, cols, SolverConfig::default())
    }

    /// Create a session with custom solver settings.
    pub fn with_config(rows: usize, cols: usize, config: SolverConfig) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(rows, cols)?;
        Ok(Self {
            grid: Some(grid),
            config,
        })
    }

    /// Create a session from caller-supplied potential and mask buffers.
    pub fn from_parts(rows: usize, cols: usize, potential: &[f32], mask: &[bool]) -> Result<Self> {
        let grid = Grid::from_parts(rows, cols, potential, mask)?;
        Ok(Self {
            grid: Some(grid),
            config: SolverConfig::default(),
        })
    }

    /// Solver settings used by [`Simulation::run`].
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Replace the solver settings.
    pub fn set_config(&mut self, config: SolverConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Borrow the grid.
    pub fn grid(&self) -> Result<&Grid> {
        self.grid.as_ref().ok_or(ElectrostaticsError::UseAfterDestroy)
    }

    /// Mutably borrow the grid.
    pub fn grid_mut(&mut self) -> Result<&mut Grid> {
        self.grid.as_mut().ok_or(ElectrostaticsError::UseAfterDestroy)
    }

    /// Grid shape.
    pub fn dimensions(&self) -> Result<Dimensions> {
        Ok(self.grid()?.dimensions())
    }

    /// Potential buffer, row-major.
    pub fn potential(&self) -> Result<&[f32]> {
        Ok(self.grid()?.potential())
    }

    /// Electrode mask, row-major.
    pub fn mask(&self) -> Result<&[bool]> {
        Ok(self.grid()?.mask())
    }

    /// Field components `(Ex, Ey)` as last computed.
    pub fn field(&self) -> Result<(&[f32], &[f32])> {
        Ok(self.grid()?.field())
    }

    /// Overwrite potential and mask.
    pub fn initialize(&mut self, potential: &[f32], mask: &[bool]) -> Result<()> {
        self.grid_mut()?.initialize(potential, mask)
    }

    /// Overwrite potential and mask, mask given as bytes (nonzero = fixed).
    pub fn initialize_bytes(&mut self, potential: &[f32], mask: &[u8]) -> Result<()> {
        self.grid_mut()?.initialize_bytes(potential, mask)
    }

    /// Fix the boundary, optionally at `value` volts.
    pub fn set_default_boundary(&mut self, value: Option<f32>) -> Result<()> {
        self.grid_mut()?.set_default_boundary(value);
        Ok(())
    }

    /// One relaxation sweep.
    pub fn step(&mut self, omega: f32) -> Result<f32> {
        sor::step(self.grid_mut()?, omega)
    }

    /// Relax until `tolerance` or `max_iterations`, returning the last delta.
    pub fn solve(&mut self, omega: f32, max_iterations: usize, tolerance: f32) -> Result<f32> {
        sor::solve(self.grid_mut()?, omega, max_iterations, tolerance)
    }

    /// Compute the field from the current potential.
    pub fn compute_field(&mut self) -> Result<(&[f32], &[f32])> {
        field::compute_field(self.grid_mut()?)
    }

    /// Solve with the session settings, then compute the field.
    ///
    /// Resolution is checked before relaxing, so a grid too small for field
    /// extraction is rejected without being modified.
    pub fn run(&mut self) -> Result<SolveReport> {
        let config = self.config;
        self.run_with(&config)
    }

    /// Like [`Simulation::run`] with one-off settings; the session settings
    /// are left unchanged.
    pub fn run_with(&mut self, config: &SolverConfig) -> Result<SolveReport> {
        let grid = self.grid_mut()?;
        field::check_resolution(grid.dimensions())?;

        let report = sor::relax(grid, config)?;
        field::compute_field(grid)?;
        Ok(report)
    }

    /// Place an electrode.
    pub fn add_electrode(&mut self, i: usize, j: usize, value: f32) -> Result<()> {
        self.grid_mut()?.add_electrode(i, j, value)
    }

    /// Remove an electrode.
    pub fn remove_electrode(&mut self, i: usize, j: usize) -> Result<()> {
        self.grid_mut()?.remove_electrode(i, j)
    }

    /// Zero free cells, keeping electrodes.
    pub fn reset(&mut self) -> Result<()> {
        self.grid_mut()?.reset();
        Ok(())
    }

    /// Return to a blank grid with grounded boundary.
    pub fn clear(&mut self) -> Result<()> {
        self.grid_mut()?.clear();
        Ok(())
    }

    /// Replace the electrode layout with a preset.
    pub fn apply_scenario(&mut self, scenario: Scenario) -> Result<()> {
        scenario.apply(self.grid_mut()?)
    }

    /// Release the grid buffers. The session is unusable afterwards.
    pub fn destroy(&mut self) -> Result<()> {
        let grid = self.grid.take().ok_or(ElectrostaticsError::UseAfterDestroy)?;
        debug!("destroyed {} grid", grid.dimensions());
        Ok(())
    }

    /// Whether [`Simulation::destroy`] has been called.
    pub fn is_destroyed(&self) -> bool {
        self.grid.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_after_destroy() {
        let mut sim = Simulation::new(5, 5).unwrap();
        sim.destroy().unwrap();
        assert!(sim.is_destroyed());

        assert!(matches!(sim.step(1.5), Err(ElectrostaticsError::UseAfterDestroy)));
        assert!(matches!(
            sim.add_electrode(1, 1, 1.0),
            Err(ElectrostaticsError::UseAfterDestroy)
        ));
        assert!(matches!(sim.reset(), Err(ElectrostaticsError::UseAfterDestroy)));
        assert!(matches!(sim.potential(), Err(ElectrostaticsError::UseAfterDestroy)));
        assert!(matches!(sim.destroy(), Err(ElectrostaticsError::UseAfterDestroy)));
    }

    #[test]
    fn test_run_computes_field() {
        let config = SolverConfig::new().with_tolerance(1e-4);
        let mut sim = Simulation::with_config(11, 11, config).unwrap();
        sim.apply_scenario(Scenario::Dipole).unwrap();

        let report = sim.run().unwrap();
        assert!(report.converged);
        assert!(sim.grid().unwrap().field_is_current());

        // between the electrodes the field points from + to -, i.e. +x
        let (ex, _) = sim.field().unwrap();
        assert!(ex[5 * 11 + 5] > 0.0);
    }

    #[test]
    fn test_run_rejects_thin_grid_untouched() {
        let mut sim = Simulation::from_parts(1, 3, &[0.0, 0.0, 6.0], &[true, false, true]).unwrap();
        assert!(matches!(
            sim.run(),
            Err(ElectrostaticsError::InsufficientResolution { .. })
        ));
        assert_eq!(sim.potential().unwrap(), &[0.0, 0.0, 6.0]);
    }

    #[test]
    fn test_run_with_keeps_session_config() {
        let mut sim = Simulation::new(6, 6).unwrap();
        sim.add_electrode(2, 2, 1.0).unwrap();

        let one_off = SolverConfig::new().with_omega(1.2).with_max_iterations(4).with_tolerance(0.0);
        let report = sim.run_with(&one_off).unwrap();
        assert_eq!(report.iterations, 4);
        assert!(sim.grid().unwrap().field_is_current());
        assert_eq!(*sim.config(), SolverConfig::default());

        let bad = SolverConfig::new().with_omega(2.0);
        assert!(matches!(
            sim.run_with(&bad),
            Err(ElectrostaticsError::InvalidRelaxationFactor { .. })
        ));
        assert_eq!(*sim.config(), SolverConfig::default());
    }

    #[test]
    fn test_set_config_validates() {
        let mut sim = Simulation::new(4, 4).unwrap();
        let err = sim.set_config(SolverConfig::new().with_omega(2.5)).unwrap_err();
        assert!(matches!(err, ElectrostaticsError::InvalidRelaxationFactor { .. }));
        assert_eq!(sim.config().omega, 1.75);
    }
}
