//! Electric field extraction.
//!
//! Approximates `E = -∇V` on the grid with unit spacing:
//!
//! ```text
//! Ex[i,j] = (V[i,j-1] - V[i,j+1]) / 2     central, 0 < j < n-1
//! Ex[i,0] =  V[i,0]   - V[i,1]            forward
//! Ex[i,n-1] = V[i,n-2] - V[i,n-1]         backward
//! ```
//!
//! and likewise for `Ey` along rows. Each axis is handled independently, so a
//! cell on the top row still gets a central difference along `x`. The field
//! points from high to low potential.

use crate::error::{ElectrostaticsError, Result};
use crate::grid::{Dimensions, Grid};

/// Check that the grid has at least two samples along each axis.
pub fn check_resolution(dims: Dimensions) -> Result<()> {
    if dims.rows < 2 || dims.cols < 2 {
        return Err(ElectrostaticsError::InsufficientResolution {
            m: dims.rows,
            n: dims.cols,
        });
    }
    Ok(())
}

/// Compute the field from the grid's potential into its field buffers.
///
/// Returns `(Ex, Ey)`. The potential and mask are not modified.
pub fn compute_field(grid: &mut Grid) -> Result<(&[f32], &[f32])> {
    let dims = grid.dimensions();
    check_resolution(dims)?;

    let (rows, cols) = (dims.rows, dims.cols);
    let (v, ex, ey) = grid.field_buffers();

    for i in 0..rows {
        for j in 0..cols {
            let idx = i * cols + j;

            ex[idx] = if j == 0 {
                v[idx] - v[idx + 1]
            } else if j + 1 == cols {
                v[idx - 1] - v[idx]
            } else {
                (v[idx - 1] - v[idx + 1]) / 2.0
            };

            ey[idx] = if i == 0 {
                v[idx] - v[idx + cols]
            } else if i + 1 == rows {
                v[idx - cols] - v[idx]
            } else {
                (v[idx - cols] - v[idx + cols]) / 2.0
            };
        }
    }

    grid.mark_field_current();
    Ok(grid.field())
}

/// Per-cell field strength `|E|`.
pub fn magnitude(ex: &[f32], ey: &[f32]) -> Vec<f32> {
    ex.iter().zip(ey).map(|(x, y)| x.hypot(*y)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_linear_potential_gives_uniform_field() {
        // V = 2j - 3i on a 4x5 grid
        let mut potential = vec![0.0; 20];
        for i in 0..4 {
            for j in 0..5 {
                potential[i * 5 + j] = 2.0 * j as f32 - 3.0 * i as f32;
            }
        }
        let mut grid = Grid::from_parts(4, 5, &potential, &[true; 20]).unwrap();

        let (ex, ey) = compute_field(&mut grid).unwrap();
        for k in 0..20 {
            assert_abs_diff_eq!(ex[k], -2.0);
            assert_abs_diff_eq!(ey[k], 3.0);
        }
    }

    #[test]
    fn test_one_sided_differences_at_edges() {
        let mut grid = Grid::from_parts(2, 3, &[0.0, 1.0, 4.0, 2.0, 2.0, 2.0], &[true; 6]).unwrap();
        let (ex, ey) = compute_field(&mut grid).unwrap();

        assert_abs_diff_eq!(ex[0], -1.0); // forward: 0 - 1
        assert_abs_diff_eq!(ex[1], -2.0); // central: (0 - 4) / 2
        assert_abs_diff_eq!(ex[2], -3.0); // backward: 1 - 4
        assert_abs_diff_eq!(ey[0], -2.0); // forward: 0 - 2
        assert_abs_diff_eq!(ey[5], 2.0); // backward: 4 - 2
    }

    #[test]
    fn test_marks_field_current() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert!(!grid.field_is_current());
        compute_field(&mut grid).unwrap();
        assert!(grid.field_is_current());

        grid.add_electrode(1, 1, 1.0).unwrap();
        assert!(!grid.field_is_current());
    }

    #[test]
    fn test_insufficient_resolution() {
        let mut grid = Grid::new(1, 5).unwrap();
        assert!(matches!(
            compute_field(&mut grid),
            Err(ElectrostaticsError::InsufficientResolution { m: 1, n: 5 })
        ));
        assert!(!grid.field_is_current());
    }

    #[test]
    fn test_magnitude() {
        let mag = magnitude(&[3.0, 0.0], &[4.0, -2.0]);
        assert_abs_diff_eq!(mag[0], 5.0);
        assert_abs_diff_eq!(mag[1], 2.0);
    }
}
