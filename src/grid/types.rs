//! Core types for grid representation.

use std::fmt;

/// Height and width of a grid, fixed for its lifetime.
///
/// Cells are stored row-major: cell `(i, j)` lives at `i * cols + j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Number of rows (`m`)
    pub rows: usize,
    /// Number of columns (`n`)
    pub cols: usize,
}

impl Dimensions {
    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Dimensions are validated positive, so a grid is never empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat row-major index of `(i, j)`. Callers must have checked bounds.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(self.contains(i, j), "cell ({i}, {j}) outside {self}");
        i * self.cols + j
    }

    /// Check whether `(i, j)` lies inside the grid.
    pub fn contains(&self, i: usize, j: usize) -> bool {
        i < self.rows && j < self.cols
    }

    /// Check whether `(i, j)` lies on the first/last row or column.
    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        i == 0 || j == 0 || i + 1 == self.rows || j + 1 == self.cols
    }

    /// Iterate over every boundary cell as `(i, j)`, each exactly once.
    pub fn boundary_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows).flat_map(move |i| {
            let cols = self.cols;
            (0..cols).filter(move |&j| self.is_boundary(i, j)).map(move |j| (i, j))
        })
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
