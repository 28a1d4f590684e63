//! Uniform cross-shore grid
//!
//! All solvers in this crate operate on a uniform grid built once from a
//! measured beach profile of arbitrary resolution. The grid is immutable
//! after construction: the groundwater solver and the fetch sweep both
//! borrow it read-only.

use nalgebra::DVector;

use crate::error::SimulationError;

// =================================================================================================
// CrossShoreGrid
// =================================================================================================

/// Uniform cross-shore grid with bed elevations.
///
/// Positions run from the seaward origin (`x = 0`) landward with constant
/// spacing `dx`. Bed elevations are linearly resampled from the source
/// profile at construction.
///
/// # Example
///
/// ```rust
/// use aeolian_rs::physics::CrossShoreGrid;
///
/// // A planar 1:30 beach, 60 m long, resampled at 1 m.
/// let positions: Vec<f64> = (0..=6).map(|i| i as f64 * 10.0).collect();
/// let elevations: Vec<f64> = positions.iter().map(|x| x / 30.0 - 1.0).collect();
///
/// let grid = CrossShoreGrid::from_profile(&positions, &elevations, 1.0).unwrap();
/// assert_eq!(grid.len(), 61);
/// assert!((grid.elevation(30) - 0.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct CrossShoreGrid {
    positions: DVector<f64>,
    elevations: DVector<f64>,
    spacing: f64,
}

impl CrossShoreGrid {
    /// Build a uniform grid by linear resampling of a source profile.
    ///
    /// The source `(position, elevation)` pairs may have arbitrary spacing
    /// but must be strictly increasing in position and must cover the
    /// origin; the grid spans `[0, max_position]` at spacing `dx`.
    pub fn from_profile(
        source_positions: &[f64],
        source_elevations: &[f64],
        dx: f64,
    ) -> Result<Self, SimulationError> {
        if source_positions.len() != source_elevations.len() {
            return Err(SimulationError::config(format!(
                "profile has {} positions but {} elevations",
                source_positions.len(),
                source_elevations.len()
            )));
        }
        if source_positions.len() < 2 {
            return Err(SimulationError::config(
                "profile needs at least two points",
            ));
        }
        if !dx.is_finite() || dx <= 0.0 {
            return Err(SimulationError::config(format!(
                "grid spacing must be positive, got {}",
                dx
            )));
        }
        for pair in source_positions.windows(2) {
            if pair[1] <= pair[0] {
                return Err(SimulationError::config(
                    "profile positions must be strictly increasing",
                ));
            }
        }
        if source_positions[0] > 0.0 {
            return Err(SimulationError::config(
                "profile must start at or seaward of the origin",
            ));
        }

        let max_position = *source_positions.last().unwrap();
        let points = (max_position / dx).floor() as usize + 1;
        if points < 3 {
            return Err(SimulationError::config(format!(
                "grid spacing {} leaves only {} points on a {} m profile",
                dx, points, max_position
            )));
        }

        let positions = DVector::from_fn(points, |i, _| i as f64 * dx);
        let elevations = DVector::from_fn(points, |i, _| {
            interpolate(source_positions, source_elevations, i as f64 * dx)
        });

        Ok(Self {
            positions,
            elevations,
            spacing: dx,
        })
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// A grid is never empty; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Grid spacing `dx` in metres.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Cross-shore position of point `i` in metres from the origin.
    pub fn position(&self, i: usize) -> f64 {
        self.positions[i]
    }

    /// Bed elevation of point `i`.
    pub fn elevation(&self, i: usize) -> f64 {
        self.elevations[i]
    }

    /// All positions.
    pub fn positions(&self) -> &DVector<f64> {
        &self.positions
    }

    /// All bed elevations.
    pub fn elevations(&self) -> &DVector<f64> {
        &self.elevations
    }

    /// First grid point whose bed elevation exceeds `level`, scanning from
    /// the seaward origin. `None` when the whole profile sits at or below
    /// the level.
    pub fn first_index_above(&self, level: f64) -> Option<usize> {
        (0..self.len()).find(|&i| self.elevations[i] > level)
    }

    /// Index of the unique crossing of the bed profile with `level`.
    ///
    /// Returns the last grid point at or below the level, i.e. the seaward
    /// side of the crossing. The profile must cross the level exactly once
    /// within range; zero or multiple crossings are a geometry error.
    pub fn single_crossing_index(&self, level: f64) -> Result<usize, SimulationError> {
        let mut crossing: Option<usize> = None;
        let mut count = 0usize;

        for i in 0..self.len() - 1 {
            let below = self.elevations[i] <= level;
            let above_next = self.elevations[i + 1] > level;
            if below && above_next {
                crossing = Some(i);
                count += 1;
            } else if !below && self.elevations[i + 1] <= level {
                count += 1;
            }
        }

        match (crossing, count) {
            (Some(i), 1) => Ok(i),
            (_, 0) => Err(SimulationError::geometry(format!(
                "bed profile does not cross elevation {}",
                level
            ))),
            _ => Err(SimulationError::geometry(format!(
                "bed profile crosses elevation {} more than once",
                level
            ))),
        }
    }
}

/// Linear interpolation of `ys` over strictly increasing `xs`, clamped at
/// the ends.
fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[xs.len() - 1] {
        return ys[ys.len() - 1];
    }
    let right = xs.partition_point(|&v| v < x).max(1);
    let left = right - 1;
    let t = (x - xs[left]) / (xs[right] - xs[left]);
    ys[left] + t * (ys[right] - ys[left])
}

// =================================================================================================
// Tests
// =================================================================================================
