//! Grid state for electrostatic simulation.
//!
//! This module provides the [`Grid`] struct, which owns the potential field,
//! the electrode mask, and the derived field components for one rectangular
//! domain. All buffers are row-major: cell `(i, j)` is stored at `i * n + j`.

mod state;
mod types;
pub mod validate;

pub use state::Grid;
pub use types::Dimensions;
