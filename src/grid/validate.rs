//! Argument validation for grid operations.
//!
//! Every check here runs before any buffer is touched, so a failed call
//! leaves the grid exactly as it was.

use crate::error::{ElectrostaticsError, Result};

use super::Dimensions;

/// Validate a grid shape given as integers.
pub fn dimensions(rows: usize, cols: usize) -> Result<Dimensions> {
    if rows == 0 {
        return Err(ElectrostaticsError::InvalidDimension {
            axis: "m",
            value: 0.0,
        });
    }
    if cols == 0 {
        return Err(ElectrostaticsError::InvalidDimension {
            axis: "n",
            value: 0.0,
        });
    }
    // Cell count must fit in usize so `Dimensions::len` never overflows
    if rows.checked_mul(cols).is_none() {
        return Err(ElectrostaticsError::InvalidDimension {
            axis: "m*n",
            value: rows as f64 * cols as f64,
        });
    }
    Ok(Dimensions { rows, cols })
}

/// Convert an untyped number into a positive integer.
///
/// Returns `None` for NaN, infinities, fractions, zero, negatives, and
/// values too large for `usize`.
pub fn positive_integer(value: f64) -> Option<usize> {
    let valid = value.is_finite() && value.fract() == 0.0 && value >= 1.0 && value < usize::MAX as f64;
    valid.then_some(value as usize)
}

/// Validate one grid dimension received as an untyped number.
pub fn dimension_from_f64(axis: &'static str, value: f64) -> Result<usize> {
    positive_integer(value).ok_or(ElectrostaticsError::InvalidDimension { axis, value })
}

/// Convert an untyped number into a signed cell coordinate.
///
/// Fractions, NaN and infinities map to `-1`, which [`cell`] rejects.
pub fn coordinate(value: f64) -> i64 {
    if value.is_finite() && value.fract() == 0.0 {
        value as i64
    } else {
        -1
    }
}

/// Validate a cell index received as untyped numbers.
pub fn cell_from_f64(dims: Dimensions, i: f64, j: f64) -> Result<(usize, usize)> {
    cell(dims, coordinate(i), coordinate(j))
}

/// Validate a signed cell index against the grid, returning unsigned coordinates.
pub fn cell(dims: Dimensions, i: i64, j: i64) -> Result<(usize, usize)> {
    let in_range = |k: i64, len: usize| k >= 0 && (k as u64) < len as u64;
    if in_range(i, dims.rows) && in_range(j, dims.cols) {
        Ok((i as usize, j as usize))
    } else {
        Err(ElectrostaticsError::index_out_of_range(i, j, dims.rows, dims.cols))
    }
}

/// Validate that a caller-supplied buffer holds exactly one element per cell.
pub fn buffer_len(buffer: &'static str, dims: Dimensions, actual: usize) -> Result<()> {
    if actual == dims.len() {
        Ok(())
    } else {
        Err(ElectrostaticsError::shape_mismatch(buffer, dims.len(), actual))
    }
}
