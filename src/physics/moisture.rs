//! Surface moisture from water-table depth
//!
//! The water-table solution is turned into a surface moisture field through
//! a van Genuchten soil water retention curve, applied pointwise to the
//! depth of the table below the bed. The transform itself is stateless; the
//! field constructor additionally blanks every position seaward of the
//! instantaneous shoreline, where "surface moisture" has no meaning.

use nalgebra::DVector;

use crate::error::SimulationError;
use crate::physics::grid::CrossShoreGrid;
use crate::physics::sample::{Sample, SampleField};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Row count above which the field construction switches to parallel
/// iteration when the `parallel` feature is enabled. Below this the
/// dispatch overhead outweighs the pointwise work.
#[cfg(feature = "parallel")]
const PARALLEL_ROW_THRESHOLD: usize = 256;

// =================================================================================================
// Van Genuchten retention curve
// =================================================================================================

/// Van Genuchten soil water retention parameters.
///
/// Maps depth-to-water-table to a volumetric moisture fraction:
///
/// ```text
/// theta(d) = theta_res + (theta_sat - theta_res) / (1 + (alpha·d)^n)^(1 - 1/n)
/// ```
///
/// Depth is clamped to zero before the transform, so submerged points yield
/// exactly `theta_sat`.
///
/// # Example
///
/// ```rust
/// use aeolian_rs::physics::VanGenuchten;
///
/// let curve = VanGenuchten::new(0.02, 0.35, 3.5, 2.5).unwrap();
/// assert_eq!(curve.moisture(0.0), 0.35);
/// assert!(curve.moisture(2.0) < curve.moisture(0.5));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct VanGenuchten {
    theta_res: f64,
    theta_sat: f64,
    alpha: f64,
    n: f64,
}

impl VanGenuchten {
    /// Create a retention curve, validating the parameter ranges.
    pub fn new(
        theta_res: f64,
        theta_sat: f64,
        alpha: f64,
        n: f64,
    ) -> Result<Self, SimulationError> {
        if !(0.0..1.0).contains(&theta_res) || !(0.0..=1.0).contains(&theta_sat) {
            return Err(SimulationError::config(format!(
                "retention fractions must lie in [0, 1], got theta_res = {}, theta_sat = {}",
                theta_res, theta_sat
            )));
        }
        if theta_res >= theta_sat {
            return Err(SimulationError::config(format!(
                "theta_res {} must be below theta_sat {}",
                theta_res, theta_sat
            )));
        }
        if alpha <= 0.0 {
            return Err(SimulationError::config(format!(
                "retention alpha must be positive, got {}",
                alpha
            )));
        }
        if n <= 1.0 {
            return Err(SimulationError::config(format!(
                "retention n must exceed 1, got {}",
                n
            )));
        }
        Ok(Self {
            theta_res,
            theta_sat,
            alpha,
            n,
        })
    }

    /// Residual moisture fraction.
    pub fn theta_res(&self) -> f64 {
        self.theta_res
    }

    /// Saturated moisture fraction.
    pub fn theta_sat(&self) -> f64 {
        self.theta_sat
    }

    /// Moisture fraction at a given depth below the bed, in metres.
    ///
    /// Negative depths (water table above the bed) are clamped to zero.
    pub fn moisture(&self, depth: f64) -> f64 {
        let d = depth.max(0.0);
        if d == 0.0 {
            return self.theta_sat;
        }
        let m = 1.0 - 1.0 / self.n;
        let ad = self.alpha * d;
        self.theta_res + (self.theta_sat - self.theta_res) / (1.0 + ad.powf(self.n)).powf(m)
    }
}

// =================================================================================================
// MoistureField
// =================================================================================================

/// Time×position surface moisture field.
///
/// Every defined cell lies within `[theta_res, theta_sat]`; cells seaward
/// of the instantaneous shoreline are [`Sample::Missing`].
#[derive(Debug, Clone)]
pub struct MoistureField {
    /// Recorded times, one per row.
    pub times: Vec<f64>,
    /// The moisture samples.
    pub data: SampleField,
}

impl MoistureField {
    /// Build the field from recorded water-table rows.
    ///
    /// `rows` holds one water-table profile per recorded time and
    /// `shoreline` the matching shoreline index; positions seaward of the
    /// shoreline come out missing.
    pub fn from_water_table_rows(
        times: &[f64],
        rows: &[DVector<f64>],
        shoreline: &[usize],
        grid: &CrossShoreGrid,
        curve: &VanGenuchten,
    ) -> Result<Self, SimulationError> {
        if rows.len() != times.len() || shoreline.len() != times.len() {
            return Err(SimulationError::config(
                "water-table rows, times and shoreline series must have equal length",
            ));
        }

        let cols = grid.len();
        let build_row = |r: usize| -> Vec<Sample> {
            let table = &rows[r];
            (0..cols)
                .map(|j| {
                    if j < shoreline[r] {
                        Sample::Missing
                    } else {
                        Sample::Value(curve.moisture(grid.elevation(j) - table[j]))
                    }
                })
                .collect()
        };

        #[cfg(feature = "parallel")]
        let computed: Vec<Vec<Sample>> = if times.len() >= PARALLEL_ROW_THRESHOLD {
            (0..times.len()).into_par_iter().map(build_row).collect()
        } else {
            (0..times.len()).map(build_row).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let computed: Vec<Vec<Sample>> = (0..times.len()).map(build_row).collect();

        let mut data = SampleField::missing(times.len(), cols);
        for (r, row) in computed.iter().enumerate() {
            data.set_row(r, row);
        }

        Ok(Self {
            times: times.to_vec(),
            data,
        })
    }

    /// Number of recorded time rows.
    pub fn rows(&self) -> usize {
        self.data.rows()
    }

    /// Number of cross-shore positions.
    pub fn cols(&self) -> usize {
        self.data.cols()
    }

    /// Moisture sample at (row, position).
    pub fn get(&self, row: usize, col: usize) -> Sample {
        self.data.get(row, col)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
