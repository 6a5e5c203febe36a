//! Grid state: potential, electrode mask, and derived field buffers.

use log::debug;

use super::types::Dimensions;
use super::validate;
use crate::error::{ElectrostaticsError, Result};

/// A rectangular grid of potentials with fixed-voltage electrode cells.
///
/// All four buffers have exactly `rows * cols` elements, stored row-major.
/// The field buffers are derived from the potential and only meaningful
/// while [`Grid::field_is_current`] returns `true`.
#[derive(Debug, Clone)]
pub struct Grid {
    dims: Dimensions,
    /// Potential in volts
    potential: Vec<f32>,
    /// `true` marks an electrode whose potential is never relaxed
    fixed: Vec<bool>,
    /// Field component along columns (j)
    ex: Vec<f32>,
    /// Field component along rows (i)
    ey: Vec<f32>,
    /// Whether `ex`/`ey` reflect the current potential
    field_current: bool,
}

impl Grid {
    /// Create a zeroed grid whose boundary cells are fixed at 0 V.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let dims = validate::dimensions(rows, cols)?;
        let len = dims.len();
        let mut grid = Self {
            dims,
            potential: vec![0.0; len],
            fixed: vec![false; len],
            ex: vec![0.0; len],
            ey: vec![0.0; len],
            field_current: false,
        };
        grid.set_default_boundary(None);
        debug!("created {} grid", dims);
        Ok(grid)
    }

    /// Create a grid from caller-supplied potential and mask buffers.
    ///
    /// No default boundary is applied; the mask is taken as given.
    pub fn from_parts(rows: usize, cols: usize, potential: &[f32], mask: &[bool]) -> Result<Self> {
        let mut grid = Self::new(rows, cols)?;
        grid.initialize(potential, mask)?;
        Ok(grid)
    }

    /// Overwrite potential and mask from row-major buffers.
    pub fn initialize(&mut self, potential: &[f32], mask: &[bool]) -> Result<()> {
        validate::buffer_len("potential", self.dims, potential.len())?;
        validate::buffer_len("mask", self.dims, mask.len())?;

        self.potential.copy_from_slice(potential);
        self.fixed.copy_from_slice(mask);
        self.field_current = false;
        Ok(())
    }

    /// Overwrite potential and mask, with the mask given one byte per cell
    /// (0 = free, nonzero = fixed).
    pub fn initialize_bytes(&mut self, potential: &[f32], mask: &[u8]) -> Result<()> {
        validate::buffer_len("potential", self.dims, potential.len())?;
        validate::buffer_len("mask", self.dims, mask.len())?;

        self.potential.copy_from_slice(potential);
        for (dst, &byte) in self.fixed.iter_mut().zip(mask) {
            *dst = byte != 0;
        }
        self.field_current = false;
        Ok(())
    }

    /// Mark every boundary cell fixed, optionally setting its potential.
    ///
    /// Without a value, boundary cells keep whatever potential they hold.
    pub fn set_default_boundary(&mut self, value: Option<f32>) {
        let dims = self.dims;
        for (i, j) in dims.boundary_cells() {
            let idx = dims.index(i, j);
            self.fixed[idx] = true;
            if let Some(v) = value {
                self.potential[idx] = v;
            }
        }
        if value.is_some() {
            self.field_current = false;
        }
    }

    /// Place an electrode at `(i, j)` held at `value` volts.
    pub fn add_electrode(&mut self, i: usize, j: usize, value: f32) -> Result<()> {
        let idx = self.checked_index(i, j)?;
        self.potential[idx] = value;
        self.fixed[idx] = true;
        self.field_current = false;
        Ok(())
    }

    /// Remove the electrode at `(i, j)`, leaving a free cell at 0 V.
    pub fn remove_electrode(&mut self, i: usize, j: usize) -> Result<()> {
        let idx = self.checked_index(i, j)?;
        self.potential[idx] = 0.0;
        self.fixed[idx] = false;
        self.field_current = false;
        Ok(())
    }

    /// Zero every free cell, keeping the electrode configuration.
    ///
    /// Field buffers are left as they are (and become stale).
    pub fn reset(&mut self) {
        for (v, &fixed) in self.potential.iter_mut().zip(&self.fixed) {
            if !fixed {
                *v = 0.0;
            }
        }
        self.field_current = false;
    }

    /// Zero all buffers, drop every electrode, and reapply the default boundary.
    pub fn clear(&mut self) {
        self.potential.fill(0.0);
        self.fixed.fill(false);
        self.ex.fill(0.0);
        self.ey.fill(0.0);
        self.field_current = false;
        self.set_default_boundary(None);
        debug!("cleared {} grid", self.dims);
    }

    /// Grid shape.
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Number of rows (`m`).
    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    /// Number of columns (`n`).
    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    /// Potential buffer, row-major.
    pub fn potential(&self) -> &[f32] {
        &self.potential
    }

    /// Electrode mask, row-major.
    pub fn mask(&self) -> &[bool] {
        &self.fixed
    }

    /// Electrode mask as one byte per cell (1 = fixed).
    pub fn mask_bytes(&self) -> Vec<u8> {
        self.fixed.iter().map(|&f| u8::from(f)).collect()
    }

    /// Field components `(Ex, Ey)` as last computed.
    pub fn field(&self) -> (&[f32], &[f32]) {
        (&self.ex, &self.ey)
    }

    /// Whether the field buffers were computed from the current potential.
    pub fn field_is_current(&self) -> bool {
        self.field_current
    }

    /// Potential at `(i, j)`.
    pub fn potential_at(&self, i: usize, j: usize) -> Result<f32> {
        let idx = self.checked_index(i, j)?;
        Ok(self.potential[idx])
    }

    /// Whether `(i, j)` is an electrode.
    pub fn is_fixed(&self, i: usize, j: usize) -> Result<bool> {
        let idx = self.checked_index(i, j)?;
        Ok(self.fixed[idx])
    }

    /// Number of fixed cells.
    pub fn fixed_count(&self) -> usize {
        self.fixed.iter().filter(|&&f| f).count()
    }

    /// Mutable potential and read-only mask for relaxation.
    pub(crate) fn relaxation_buffers(&mut self) -> (&mut [f32], &[bool]) {
        self.field_current = false;
        (&mut self.potential, &self.fixed)
    }

    /// Read-only potential and mutable field buffers for extraction.
    pub(crate) fn field_buffers(&mut self) -> (&[f32], &mut [f32], &mut [f32]) {
        (&self.potential, &mut self.ex, &mut self.ey)
    }

    pub(crate) fn mark_field_current(&mut self) {
        self.field_current = true;
    }

    fn checked_index(&self, i: usize, j: usize) -> Result<usize> {
        if self.dims.contains(i, j) {
            Ok(self.dims.index(i, j))
        } else {
            Err(ElectrostaticsError::index_out_of_range(
                i as i64,
                j as i64,
                self.dims.rows,
                self.dims.cols,
            ))
        }
    }
}
