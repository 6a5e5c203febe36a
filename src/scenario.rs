//! Preset electrode configurations.
//!
//! Positions are given as fractions of the grid size so a preset looks the
//! same at any resolution. On a 101x101 grid the dipole sits at (50, 40) and
//! (50, 60), and the capacitor plates span rows 29..70 at columns 40 and 60.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::{ElectrostaticsError, Result};
use crate::grid::Grid;

/// Electrode voltage used by the presets (volts).
pub const SCENARIO_VOLTAGE: f32 = 10.0;

/// A preset electrode layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scenario {
    /// Two point electrodes of opposite sign on the middle row
    #[default]
    Dipole,
    /// Two vertical plates of opposite sign
    Capacitor,
}

impl Scenario {
    /// All presets, in display order.
    pub const ALL: [Scenario; 2] = [Scenario::Dipole, Scenario::Capacitor];

    /// Lowercase preset name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dipole => "dipole",
            Self::Capacitor => "capacitor",
        }
    }

    /// Clear the grid and place this preset's electrodes.
    ///
    /// Needs at least 3 rows and 5 columns so both electrodes land on
    /// distinct interior cells.
    pub fn apply(&self, grid: &mut Grid) -> Result<()> {
        let (rows, cols) = (grid.rows(), grid.cols());
        if rows < 3 || cols < 5 {
            return Err(ElectrostaticsError::InsufficientResolution { m: rows, n: cols });
        }

        let left = cols * 40 / 100;
        let right = cols * 60 / 100;

        grid.clear();
        match self {
            Self::Dipole => {
                let row = rows / 2;
                grid.add_electrode(row, left, SCENARIO_VOLTAGE)?;
                grid.add_electrode(row, right, -SCENARIO_VOLTAGE)?;
            }
            Self::Capacitor => {
                let top = (rows * 29 / 100).max(1);
                let bottom = rows * 70 / 100;
                for i in top..bottom {
                    grid.add_electrode(i, left, SCENARIO_VOLTAGE)?;
                    grid.add_electrode(i, right, -SCENARIO_VOLTAGE)?;
                }
            }
        }

        debug!("applied '{}' scenario to {} grid", self, grid.dimensions());
        Ok(())
    }
}

impl FromStr for Scenario {
    type Err = ElectrostaticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "dipole" => Ok(Self::Dipole),
            "capacitor" => Ok(Self::Capacitor),
            _ => Err(ElectrostaticsError::UnknownScenario { name: s.to_string() }),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
