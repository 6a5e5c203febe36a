//! WASM bindings for Electrostatics Core.
//!
//! This module provides JavaScript-friendly bindings for use in web browsers.
//! Every method maps an [`ElectrostaticsError`] to a thrown string.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmSimulation } from 'electrostatics_core';
//!
//! await init();
//!
//! const sim = new WasmSimulation(101, 101);
//! sim.apply_scenario('capacitor');
//! const delta = sim.run(1.75, 10000, 1e-6);
//!
//! const potential = sim.potential();        // Float32Array, index i*n + j
//! const [ex, ey] = sim.compute_field();     // Float32Array each
//! sim.destroy();
//! ```

use js_sys::{Array, Float32Array, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::{ElectrostaticsError, Result};
use crate::grid::validate;
use crate::solver::{max_iterations_from_f64, Simulation, SolverConfig};
use crate::Scenario;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: ElectrostaticsError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-compatible simulation session.
///
/// Wraps the native [`Simulation`]; after `destroy()` every call throws.
#[wasm_bindgen]
pub struct WasmSimulation {
    simulation: Simulation,
}

#[wasm_bindgen]
impl WasmSimulation {
    /// Create an `m x n` grid with a grounded boundary.
    ///
    /// Throws if `m` or `n` is not a positive integer.
    #[wasm_bindgen(constructor)]
    pub fn new(m: f64, n: f64) -> std::result::Result<WasmSimulation, JsValue> {
        let rows = validate::dimension_from_f64("m", m).map_err(to_js)?;
        let cols = validate::dimension_from_f64("n", n).map_err(to_js)?;
        let simulation = Simulation::new(rows, cols).map_err(to_js)?;
        Ok(WasmSimulation { simulation })
    }

    /// Overwrite the grid from a `Float32Array` potential and a `Uint8Array` mask.
    #[wasm_bindgen]
    pub fn initialize(&mut self, potential: JsValue, mask: JsValue) -> std::result::Result<(), JsValue> {
        self.try_initialize(potential, mask).map_err(to_js)
    }

    /// Fix the boundary, optionally at `value` volts.
    #[wasm_bindgen]
    pub fn set_default_boundary(&mut self, value: Option<f32>) -> std::result::Result<(), JsValue> {
        self.simulation.set_default_boundary(value).map_err(to_js)
    }

    /// One relaxation sweep; returns the largest change.
    #[wasm_bindgen]
    pub fn step(&mut self, omega: f32) -> std::result::Result<f32, JsValue> {
        self.simulation.step(omega).map_err(to_js)
    }

    /// Relax until `tolerance` or `max_iterations`; returns the last delta.
    #[wasm_bindgen]
    pub fn solve(&mut self, omega: f32, max_iterations: f64, tolerance: f32) -> std::result::Result<f32, JsValue> {
        let max_iterations = max_iterations_from_f64(max_iterations).map_err(to_js)?;
        self.simulation
            .solve(omega, max_iterations, tolerance)
            .map_err(to_js)
    }

    /// Solve, then compute the field; returns the last delta.
    #[wasm_bindgen]
    pub fn run(&mut self, omega: f32, max_iterations: f64, tolerance: f32) -> std::result::Result<f32, JsValue> {
        let max_iterations = max_iterations_from_f64(max_iterations).map_err(to_js)?;
        let config = SolverConfig::new()
            .with_omega(omega)
            .with_max_iterations(max_iterations)
            .with_tolerance(tolerance);
        let report = self.simulation.run_with(&config).map_err(to_js)?;
        Ok(report.delta)
    }

    /// Compute the field; returns `[Ex, Ey]` as two `Float32Array`s.
    #[wasm_bindgen]
    pub fn compute_field(&mut self) -> std::result::Result<Array, JsValue> {
        let (ex, ey) = self.simulation.compute_field().map_err(to_js)?;
        Ok(Array::of2(&Float32Array::from(ex), &Float32Array::from(ey)))
    }

    /// Place an electrode at `(i, j)`.
    #[wasm_bindgen]
    pub fn add_electrode(&mut self, i: f64, j: f64, value: f32) -> std::result::Result<(), JsValue> {
        let (i, j) = self.cell(i, j).map_err(to_js)?;
        self.simulation.add_electrode(i, j, value).map_err(to_js)
    }

    /// Remove the electrode at `(i, j)`.
    #[wasm_bindgen]
    pub fn remove_electrode(&mut self, i: f64, j: f64) -> std::result::Result<(), JsValue> {
        let (i, j) = self.cell(i, j).map_err(to_js)?;
        self.simulation.remove_electrode(i, j).map_err(to_js)
    }

    /// Zero free cells, keeping electrodes.
    #[wasm_bindgen]
    pub fn reset(&mut self) -> std::result::Result<(), JsValue> {
        self.simulation.reset().map_err(to_js)
    }

    /// Return to a blank grid with grounded boundary.
    #[wasm_bindgen]
    pub fn clear(&mut self) -> std::result::Result<(), JsValue> {
        self.simulation.clear().map_err(to_js)
    }

    /// Replace the electrode layout with a named preset (`dipole`, `capacitor`).
    #[wasm_bindgen]
    pub fn apply_scenario(&mut self, name: &str) -> std::result::Result<(), JsValue> {
        let scenario: Scenario = name.parse().map_err(to_js)?;
        self.simulation.apply_scenario(scenario).map_err(to_js)
    }

    /// Release the grid. Every later call throws.
    #[wasm_bindgen]
    pub fn destroy(&mut self) -> std::result::Result<(), JsValue> {
        self.simulation.destroy().map_err(to_js)
    }

    /// Copy of the potential, row-major.
    #[wasm_bindgen]
    pub fn potential(&self) -> std::result::Result<Vec<f32>, JsValue> {
        self.simulation.potential().map(<[f32]>::to_vec).map_err(to_js)
    }

    /// Copy of the electrode mask, one byte per cell.
    #[wasm_bindgen]
    pub fn mask(&self) -> std::result::Result<Vec<u8>, JsValue> {
        self.simulation
            .grid()
            .map(|grid| grid.mask_bytes())
            .map_err(to_js)
    }

    /// Grid height.
    #[wasm_bindgen]
    pub fn m(&self) -> std::result::Result<usize, JsValue> {
        self.simulation.dimensions().map(|d| d.rows).map_err(to_js)
    }

    /// Grid width.
    #[wasm_bindgen]
    pub fn n(&self) -> std::result::Result<usize, JsValue> {
        self.simulation.dimensions().map(|d| d.cols).map_err(to_js)
    }
}

impl WasmSimulation {
    fn try_initialize(&mut self, potential: JsValue, mask: JsValue) -> Result<()> {
        let potential = potential
            .dyn_into::<Float32Array>()
            .map_err(|_| ElectrostaticsError::TypeMismatch {
                buffer: "potential",
                expected: "Float32Array",
            })?;
        let mask = mask
            .dyn_into::<Uint8Array>()
            .map_err(|_| ElectrostaticsError::TypeMismatch {
                buffer: "mask",
                expected: "Uint8Array",
            })?;

        self.simulation
            .initialize_bytes(&potential.to_vec(), &mask.to_vec())
    }

    fn cell(&self, i: f64, j: f64) -> Result<(usize, usize)> {
        validate::cell_from_f64(self.simulation.dimensions()?, i, j)
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_initialize_rejects_wrong_buffer_types() {
        let mut sim = WasmSimulation::new(3.0, 3.0).unwrap();
        sim.add_electrode(1.0, 1.0, 5.0).unwrap();
        let before = sim.potential().unwrap();

        let mask: JsValue = Uint8Array::new_with_length(9).into();
        assert!(sim.initialize(JsValue::from_f64(1.0), mask).is_err());

        let potential: JsValue = Float32Array::new_with_length(9).into();
        let mask: JsValue = Float32Array::new_with_length(9).into();
        assert!(sim.initialize(potential, mask).is_err());

        let after = sim.potential().unwrap();
        assert_eq!(after, before);
        assert_eq!(after[4], 5.0);
        assert_eq!(sim.mask().unwrap()[4], 1);
    }

    #[wasm_bindgen_test]
    fn test_initialize_accepts_typed_arrays() {
        let mut sim = WasmSimulation::new(2.0, 2.0).unwrap();
        let potential = Float32Array::from(&[1.0f32, 2.0, 3.0, 4.0][..]);
        let mask = Uint8Array::from(&[1u8, 0, 0, 1][..]);
        sim.initialize(potential.into(), mask.into()).unwrap();

        assert_eq!(sim.potential().unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(sim.mask().unwrap(), vec![1, 0, 0, 1]);
    }

    #[wasm_bindgen_test]
    fn test_fractional_index_is_out_of_range() {
        let mut sim = WasmSimulation::new(3.0, 3.0).unwrap();
        assert!(sim.add_electrode(1.5, 1.0, 2.0).is_err());
        assert!(sim.remove_electrode(f64::NAN, 1.0).is_err());
        assert_eq!(sim.potential().unwrap(), vec![0.0; 9]);
    }

    #[wasm_bindgen_test]
    fn test_run_leaves_session_config() {
        let mut sim = WasmSimulation::new(5.0, 5.0).unwrap();
        sim.add_electrode(2.0, 2.0, 1.0).unwrap();
        sim.run(1.2, 3.0, 0.0).unwrap();
        assert_eq!(*sim.simulation.config(), SolverConfig::default());
    }
}
