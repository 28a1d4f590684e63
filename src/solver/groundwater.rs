//! Moving-boundary groundwater solver
//!
//! Integrates the Boussinesq equation for the beach water table over a
//! cross-shore grid:
//!
//! ```text
//! dη/dt = (K·D/ne)·η_xx + toggle·(K/ne)·(η·η_xx + η_x²)
//! ```
//!
//! with second-order central differences in space and the classical
//! fourth-order Runge-Kutta scheme in time.
//!
//! # Moving Boundary
//!
//! The tide moves the shoreline, and with it the boundary conditions of
//! the PDE:
//!
//! - seaward of the shoreline the table is pinned to the instantaneous sea
//!   level,
//! - between the shoreline and the outcrop point the seepage face is fully
//!   saturated (table = bed),
//! - the landward edge carries a zero-gradient condition.
//!
//! The outcrop point depends on the water table itself, so the boundary
//! fix is recomputed from each Runge-Kutta *stage* state, not just at the
//! start of the step. Skipping the per-stage fix produces a visible bias
//! next to a migrating shoreline.
//!
//! # Stability
//!
//! The scheme is explicit and conditionally stable; choosing a time step
//! below [`GroundwaterConfig::diffusion_stability_limit`] is the caller's
//! responsibility. A state that still blows up is detected at the next
//! recorded row and reported as a configuration error.

use nalgebra::{DMatrix, DVector};

use crate::error::SimulationError;
use crate::physics::{CrossShoreGrid, MoistureField, Sample, TemporalForcing, VanGenuchten};
use crate::solver::config::{GroundwaterConfig, RunupInfiltration};

// =================================================================================================
// WaterTableSolution
// =================================================================================================

/// Recorded water-table field with the boundary tracking series.
///
/// One row is recorded per `output_interval` of simulated time; the
/// initial state is row 0. At any recorded row the table equals the
/// instantaneous sea level seaward of the recorded shoreline index and
/// stays at or below the bed landward of the outcrop.
#[derive(Debug, Clone)]
pub struct WaterTableSolution {
    /// Recorded times \[s\].
    pub times: Vec<f64>,
    /// One water-table profile per recorded time.
    pub rows: Vec<DVector<f64>>,
    /// Shoreline index per recorded time.
    pub shoreline: Vec<usize>,
    /// Outcrop index per recorded time; `None` when no point outcrops.
    pub outcrop: Vec<Option<usize>>,
}

impl WaterTableSolution {
    /// Number of recorded rows.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether anything was recorded (never true for a completed run).
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// The full time×position field as a dense matrix.
    pub fn table(&self) -> DMatrix<f64> {
        let rows = self.rows.len();
        let cols = self.rows.first().map_or(0, |r| r.len());
        DMatrix::from_fn(rows, cols, |r, c| self.rows[r][c])
    }

    /// Shoreline position series in metres.
    pub fn shoreline_positions(&self, grid: &CrossShoreGrid) -> Vec<f64> {
        self.shoreline.iter().map(|&i| grid.position(i)).collect()
    }

    /// Outcrop position series in metres; missing where no point outcrops.
    pub fn outcrop_positions(&self, grid: &CrossShoreGrid) -> Vec<Sample> {
        self.outcrop
            .iter()
            .map(|o| match o {
                Some(i) => Sample::Value(grid.position(*i)),
                None => Sample::Missing,
            })
            .collect()
    }

    /// Derive the surface moisture field through a retention curve.
    ///
    /// Positions seaward of the recorded shoreline come out missing.
    pub fn moisture(
        &self,
        grid: &CrossShoreGrid,
        curve: &VanGenuchten,
    ) -> Result<MoistureField, SimulationError> {
        MoistureField::from_water_table_rows(&self.times, &self.rows, &self.shoreline, grid, curve)
    }
}

// =================================================================================================
// GroundwaterSolver
// =================================================================================================

/// Boussinesq water-table solver over one cross-shore grid.
///
/// Borrows the grid and configuration immutably; all mutable state lives
/// inside [`run`](Self::run) for the duration of one simulation.
#[derive(Debug)]
pub struct GroundwaterSolver<'a> {
    grid: &'a CrossShoreGrid,
    config: &'a GroundwaterConfig,
}

impl<'a> GroundwaterSolver<'a> {
    /// Create a solver, re-validating the configuration at entry.
    pub fn new(
        grid: &'a CrossShoreGrid,
        config: &'a GroundwaterConfig,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self { grid, config })
    }

    /// Integrate the water table over the span of the forcing.
    ///
    /// The tide and runup series are linearly interpolated onto the
    /// solver's own fixed-step axis; everything else in the forcing is
    /// ignored here.
    pub fn run(&self, forcing: &TemporalForcing) -> Result<WaterTableSolution, SimulationError> {
        forcing.validate()?;

        let n = self.grid.len();
        let dt = self.config.time_step;
        let t0 = forcing.time[0];
        let steps = (forcing.duration() / dt).round() as usize;
        if steps == 0 {
            return Err(SimulationError::config(format!(
                "forcing spans {} s, shorter than one time step of {} s",
                forcing.duration(),
                dt
            )));
        }

        // Working buffers, sized once; the step loop never allocates.
        let mut table = DVector::from_element(n, forcing.tide_at(t0));
        let mut stage = DVector::zeros(n);
        let mut k1 = DVector::zeros(n);
        let mut k2 = DVector::zeros(n);
        let mut k3 = DVector::zeros(n);
        let mut k4 = DVector::zeros(n);

        let mut solution = WaterTableSolution {
            times: Vec::new(),
            rows: Vec::new(),
            shoreline: Vec::new(),
            outcrop: Vec::new(),
        };

        // Row 0: the boundary-fixed initial state.
        let tide = forcing.tide_at(t0);
        let shoreline = self.shoreline_index(tide)?;
        let outcrop = self.apply_boundary(&mut table, shoreline, tide);
        record_row(&mut solution, t0, &table, shoreline, outcrop)?;

        let mut next_record = self.config.output_interval;

        for step in 0..steps {
            let t = t0 + step as f64 * dt;

            // The boundary fix is recomputed from every stage state, with
            // the tide evaluated at the stage time: both the shoreline and
            // the outcrop can shift inside one step, and freezing either
            // one degrades the scheme's fourth-order convergence.
            let tide_start = forcing.tide_at(t);
            let tide_mid = forcing.tide_at(t + dt / 2.0);
            let tide_end = forcing.tide_at(t + dt);
            let shore_start = self.shoreline_index(tide_start)?;
            let shore_mid = self.shoreline_index(tide_mid)?;
            let shore_end = self.shoreline_index(tide_end)?;

            self.apply_boundary(&mut table, shore_start, tide_start);
            self.rate_into(&table, &mut k1);

            stage.copy_from(&table);
            stage.axpy(dt / 2.0, &k1, 1.0);
            self.apply_boundary(&mut stage, shore_mid, tide_mid);
            self.rate_into(&stage, &mut k2);

            stage.copy_from(&table);
            stage.axpy(dt / 2.0, &k2, 1.0);
            self.apply_boundary(&mut stage, shore_mid, tide_mid);
            self.rate_into(&stage, &mut k3);

            stage.copy_from(&table);
            stage.axpy(dt, &k3, 1.0);
            self.apply_boundary(&mut stage, shore_end, tide_end);
            self.rate_into(&stage, &mut k4);

            table.axpy(dt / 6.0, &k1, 1.0);
            table.axpy(dt / 3.0, &k2, 1.0);
            table.axpy(dt / 3.0, &k3, 1.0);
            table.axpy(dt / 6.0, &k4, 1.0);
            let mut outcrop = self.apply_boundary(&mut table, shore_end, tide_end);

            if let Some(infiltration) = &self.config.runup {
                self.infiltrate(&mut table, infiltration, forcing.runup_at(t + dt), dt)?;
                outcrop = self.apply_boundary(&mut table, shore_end, tide_end);
            }
            let shoreline = shore_end;

            let elapsed = (step + 1) as f64 * dt;
            if elapsed >= next_record - 1e-9 * dt {
                record_row(&mut solution, t0 + elapsed, &table, shoreline, outcrop)?;
                next_record += self.config.output_interval;
            }
        }

        Ok(solution)
    }

    /// First grid point above the instantaneous sea level.
    fn shoreline_index(&self, tide: f64) -> Result<usize, SimulationError> {
        self.grid.first_index_above(tide).ok_or_else(|| {
            SimulationError::geometry(format!(
                "bed profile does not span the sea level {}",
                tide
            ))
        })
    }

    /// Apply the moving-boundary fix to a state vector and return the
    /// outcrop index used.
    ///
    /// The outcrop is the most landward point, above sea level, where the
    /// table has reached the bed; everything between the shoreline and the
    /// outcrop is a fully saturated seepage face. When no point outcrops
    /// the saturation fix is skipped for this state only.
    fn apply_boundary(
        &self,
        state: &mut DVector<f64>,
        shoreline: usize,
        tide: f64,
    ) -> Option<usize> {
        let n = state.len();

        for j in 0..shoreline {
            state[j] = tide;
        }

        let outcrop = (shoreline..n)
            .rev()
            .find(|&j| state[j] >= self.grid.elevation(j) && self.grid.elevation(j) > tide);
        if let Some(o) = outcrop {
            for j in shoreline..=o {
                state[j] = self.grid.elevation(j);
            }
        }

        state[n - 1] = state[n - 2];
        outcrop
    }

    /// Spatial operator of the Boussinesq equation, written into `out`.
    fn rate_into(&self, state: &DVector<f64>, out: &mut DVector<f64>) {
        let n = state.len();
        let dx = self.grid.spacing();
        let inv_dx2 = 1.0 / (dx * dx);
        let linear = self.config.diffusivity();
        let kinematic = self.config.conductivity / self.config.porosity;

        out[0] = 0.0;
        out[n - 1] = 0.0;
        for j in 1..n - 1 {
            let curvature = (state[j + 1] - 2.0 * state[j] + state[j - 1]) * inv_dx2;
            let mut rate = linear * curvature;
            if self.config.nonlinear {
                let gradient = (state[j + 1] - state[j - 1]) / (2.0 * dx);
                rate += kinematic * (state[j] * curvature + gradient * gradient);
            }
            out[j] = rate;
        }
    }

    /// Add runup infiltration to the table for one step.
    ///
    /// The ramp is 1 at the first point whose water-table depth exceeds
    /// the minimum-depth threshold, decays linearly to 0 at the runup
    /// index, and is 0 outside that span; the added head is capped at the
    /// bed.
    fn infiltrate(
        &self,
        table: &mut DVector<f64>,
        infiltration: &RunupInfiltration,
        runup_level: f64,
        dt: f64,
    ) -> Result<(), SimulationError> {
        let runup_index = self.grid.first_index_above(runup_level).ok_or_else(|| {
            SimulationError::geometry(format!(
                "bed profile does not cross the runup level {}",
                runup_level
            ))
        })?;

        let deep_index = (0..self.grid.len())
            .find(|&j| self.grid.elevation(j) - table[j] > infiltration.minimum_depth);
        let Some(start) = deep_index else {
            return Ok(());
        };
        if start >= runup_index {
            return Ok(());
        }

        let velocity =
            infiltration.coefficient * self.config.conductivity / self.config.porosity;
        let span = (runup_index - start) as f64;
        for j in start..=runup_index {
            let ramp = (runup_index - j) as f64 / span;
            table[j] = (table[j] + velocity * ramp * dt).min(self.grid.elevation(j));
        }
        Ok(())
    }
}

/// Append one recorded row, rejecting non-finite states.
fn record_row(
    solution: &mut WaterTableSolution,
    time: f64,
    table: &DVector<f64>,
    shoreline: usize,
    outcrop: Option<usize>,
) -> Result<(), SimulationError> {
    if table.iter().any(|v| !v.is_finite()) {
        return Err(SimulationError::config(format!(
            "water table became non-finite at t = {} s; the explicit scheme is \
             unstable for this time step, reduce it below the diffusion limit",
            time
        )));
    }
    solution.times.push(time);
    solution.rows.push(table.clone());
    solution.shoreline.push(shoreline);
    solution.outcrop.push(outcrop);
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::config::RunupInfiltration;
    use approx::assert_relative_eq;

    /// Planar 1:30 beach from -1 m to +3 m over 120 m.
    fn planar_grid() -> CrossShoreGrid {
        let positions = vec![0.0, 30.0, 60.0, 90.0, 120.0];
        let elevations: Vec<f64> = positions.iter().map(|x| x / 30.0 - 1.0).collect();
        CrossShoreGrid::from_profile(&positions, &elevations, 1.0).unwrap()
    }

    fn config(dt: f64, interval: f64) -> GroundwaterConfig {
        GroundwaterConfig::new(dt, interval, 2e-4, 5.0, 0.35, false, None).unwrap()
    }

    fn constant_forcing(duration: f64, tide: f64) -> TemporalForcing {
        TemporalForcing::new(
            vec![0.0, duration],
            vec![tide, tide],
            vec![tide + 0.5, tide + 0.5],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
        )
        .unwrap()
    }

    /// Forcing whose tide starts at `high` and settles at `low` after the
    /// first minute.
    fn step_down_forcing(duration: f64, high: f64, low: f64) -> TemporalForcing {
        TemporalForcing::new(
            vec![0.0, 60.0, duration],
            vec![high, low, low],
            vec![high + 0.5, low + 0.5, low + 0.5],
            vec![0.0; 3],
            vec![0.0; 3],
            vec![0.0; 3],
            vec![0.0; 3],
        )
        .unwrap()
    }

    #[test]
    fn test_tide_above_profile_is_geometry_error() {
        let grid = planar_grid();
        let config = config(10.0, 600.0);
        let solver = GroundwaterSolver::new(&grid, &config).unwrap();

        let result = solver.run(&constant_forcing(1200.0, 10.0));
        assert!(matches!(result, Err(SimulationError::Geometry(_))));
    }

    #[test]
    fn test_output_cadence() {
        let grid = planar_grid();
        let config = config(10.0, 600.0);
        let solver = GroundwaterSolver::new(&grid, &config).unwrap();

        let solution = solver.run(&constant_forcing(3600.0, 0.0)).unwrap();

        // Initial row plus one per interval.
        assert_eq!(solution.len(), 7);
        assert_relative_eq!(solution.times[1], 600.0);
        assert_relative_eq!(solution.times[6], 3600.0);
        assert_eq!(solution.table().nrows(), 7);
        assert_eq!(solution.table().ncols(), grid.len());
    }

    #[test]
    fn test_seaward_zone_is_pinned_to_tide() {
        let grid = planar_grid();
        let config = config(10.0, 600.0);
        let solver = GroundwaterSolver::new(&grid, &config).unwrap();

        let tide = 0.4;
        let solution = solver.run(&constant_forcing(1800.0, tide)).unwrap();

        for (row, &s) in solution.rows.iter().zip(&solution.shoreline) {
            assert_eq!(s, grid.first_index_above(tide).unwrap());
            for j in 0..s {
                assert_relative_eq!(row[j], tide);
            }
        }
    }

    #[test]
    fn test_table_never_exceeds_bed_above_shoreline() {
        let grid = planar_grid();
        let config = config(5.0, 300.0);
        let solver = GroundwaterSolver::new(&grid, &config).unwrap();

        let solution = solver.run(&step_down_forcing(7200.0, 1.5, 0.0)).unwrap();

        for (row, &s) in solution.rows.iter().zip(&solution.shoreline) {
            for j in s..grid.len() {
                assert!(
                    row[j] <= grid.elevation(j) + 1e-12,
                    "table {} above bed {} at index {}",
                    row[j],
                    grid.elevation(j),
                    j
                );
            }
        }
    }

    #[test]
    fn test_falling_tide_leaves_a_saturated_seepage_face() {
        let grid = planar_grid();
        let config = config(5.0, 300.0);
        let solver = GroundwaterSolver::new(&grid, &config).unwrap();

        let solution = solver.run(&step_down_forcing(7200.0, 1.5, 0.0)).unwrap();

        // Shortly after the drop the table still touches the bed above the
        // new shoreline: an outcrop must exist and the zone between
        // shoreline and outcrop must sit exactly on the bed.
        let row = 1;
        let s = solution.shoreline[row];
        let o = solution.outcrop[row].expect("an outcrop point after a falling tide");
        assert!(o >= s);
        for j in s..=o {
            assert_relative_eq!(solution.rows[row][j], grid.elevation(j), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_landward_edge_has_zero_gradient() {
        let grid = planar_grid();
        let config = config(10.0, 600.0);
        let solver = GroundwaterSolver::new(&grid, &config).unwrap();

        let solution = solver.run(&step_down_forcing(3600.0, 0.9, 0.1)).unwrap();

        let n = grid.len();
        for row in &solution.rows {
            assert_relative_eq!(row[n - 1], row[n - 2]);
        }
    }

    #[test]
    fn test_unstable_time_step_is_reported() {
        let grid = planar_grid();
        // Far above the diffusion limit for dx = 1 m. The saturation fix
        // caps positive excursions at the bed, so the divergence needs a
        // few hundred steps to reach a non-finite value.
        let limit = config(1.0, 600.0).diffusion_stability_limit(1.0);
        let config = config(limit * 50.0, limit * 50.0);
        let solver = GroundwaterSolver::new(&grid, &config).unwrap();

        let result = solver.run(&step_down_forcing(limit * 50.0 * 400.0, 1.5, 0.0));
        assert!(matches!(result, Err(SimulationError::Configuration(_))));
    }

    #[test]
    fn test_runup_infiltration_raises_the_table() {
        let grid = planar_grid();
        let dry = config(5.0, 300.0);
        let wet = GroundwaterConfig::new(
            5.0,
            300.0,
            2e-4,
            5.0,
            0.35,
            false,
            Some(RunupInfiltration::new(2.0, 0.05).unwrap()),
        )
        .unwrap();

        // Constant tide at 0 with runup at 0.5: without infiltration the
        // uniform table is already steady, so any rise is the infiltration.
        let forcing = constant_forcing(3600.0, 0.0);
        let without = GroundwaterSolver::new(&grid, &dry)
            .unwrap()
            .run(&forcing)
            .unwrap();
        let with = GroundwaterSolver::new(&grid, &wet)
            .unwrap()
            .run(&forcing)
            .unwrap();

        // Infiltration can only add water.
        let last = without.len() - 1;
        let mut raised = false;
        for j in 0..grid.len() {
            assert!(with.rows[last][j] >= without.rows[last][j] - 1e-12);
            if with.rows[last][j] > without.rows[last][j] + 1e-9 {
                raised = true;
            }
        }
        assert!(raised, "infiltration should raise the table somewhere");
    }

    #[test]
    fn test_runup_above_profile_is_geometry_error() {
        let grid = planar_grid();
        let config = GroundwaterConfig::new(
            10.0,
            600.0,
            2e-4,
            5.0,
            0.35,
            false,
            Some(RunupInfiltration::new(2.0, 0.05).unwrap()),
        )
        .unwrap();
        let solver = GroundwaterSolver::new(&grid, &config).unwrap();

        // Runup series far above the 3 m crest.
        let forcing = TemporalForcing::new(
            vec![0.0, 1200.0],
            vec![0.0, 0.0],
            vec![8.0, 8.0],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
        )
        .unwrap();

        let result = solver.run(&forcing);
        assert!(matches!(result, Err(SimulationError::Geometry(_))));
    }
}
