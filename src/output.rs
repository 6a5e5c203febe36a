//! Grid output for the CLI frontend.
//!
//! Writes one grid quantity to any writer, either as text rows or as raw
//! little-endian `f32` in row-major order.

use std::io::Write;

use clap::ValueEnum;

use crate::error::Result;
use crate::field;
use crate::grid::Grid;

/// Which buffer to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Quantity {
    /// Potential in volts
    #[default]
    Potential,
    /// Field component along columns
    Ex,
    /// Field component along rows
    Ey,
    /// Field strength |E|
    Magnitude,
}

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// One line per row, values separated by spaces
    #[default]
    Text,
    /// Raw little-endian f32, row-major
    F32le,
}

/// Extract the values of `quantity` from the grid, row-major.
pub fn select(grid: &Grid, quantity: Quantity) -> Vec<f32> {
    let (ex, ey) = grid.field();
    match quantity {
        Quantity::Potential => grid.potential().to_vec(),
        Quantity::Ex => ex.to_vec(),
        Quantity::Ey => ey.to_vec(),
        Quantity::Magnitude => field::magnitude(ex, ey),
    }
}

/// Write `values` (a row-major grid with `cols` columns) in the given format.
pub fn write_values<W: Write>(writer: &mut W, values: &[f32], cols: usize, format: Format) -> Result<()> {
    match format {
        Format::Text => {
            for row in values.chunks(cols) {
                let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
                writeln!(writer, "{}", line.join(" "))?;
            }
        }
        Format::F32le => {
            let mut buffer = Vec::with_capacity(values.len() * 4);
            for v in values {
                buffer.extend_from_slice(&v.to_le_bytes());
            }
            writer.write_all(&buffer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write one quantity of the grid.
pub fn write_grid<W: Write>(writer: &mut W, grid: &Grid, quantity: Quantity, format: Format) -> Result<()> {
    let values = select(grid, quantity);
    write_values(writer, &values, grid.cols(), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_rows() {
        let grid = Grid::from_parts(2, 3, &[0.0, 1.5, 2.0, -1.0, 0.0, 4.0], &[true; 6]).unwrap();
        let mut out = Vec::new();
        write_grid(&mut out, &grid, Quantity::Potential, Format::Text).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0 1.5 2\n-1 0 4\n");
    }

    #[test]
    fn test_f32le_bytes() {
        let mut out = Vec::new();
        write_values(&mut out, &[1.0, -2.0], 2, Format::F32le).unwrap();
        assert_eq!(out.len(), 8);
        assert_eq!(f32::from_le_bytes([out[4], out[5], out[6], out[7]]), -2.0);
    }

    #[test]
    fn test_select_field() {
        let mut grid = Grid::from_parts(2, 2, &[0.0, 3.0, 4.0, 7.0], &[true; 4]).unwrap();
        crate::field::compute_field(&mut grid).unwrap();

        assert_eq!(select(&grid, Quantity::Ex), vec![-3.0; 4]);
        assert_eq!(select(&grid, Quantity::Ey), vec![-4.0; 4]);
        assert_eq!(select(&grid, Quantity::Magnitude), vec![5.0; 4]);
    }
}
