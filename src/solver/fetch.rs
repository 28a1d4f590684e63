//! Fetch-limited transport accumulator
//!
//! For every time step the accumulator sweeps the profile once from the
//! water line toward the dune and grows cumulative transport along the
//! wind:
//!
//! 1. positions that are submerged or at the moisture ceiling are masked,
//! 2. the remaining span is partitioned into maximal runs of identical
//!    critical fetch — contiguous runs only, a change of value or a masked
//!    gap always starts a new run,
//! 3. within a run the local fetch grows by the downwind grid spacing and
//!    cumulative transport rises from the run's upwind value toward the
//!    potential rate as a quarter sine of the fetch ratio, never exceeding
//!    the potential.
//!
//! Transport is accounted at the unique crossing of the bed profile with
//! the configured accounting elevation; landward of that crossing the
//! cumulative field is out of scope and stays missing.
//!
//! The sweep is an inherently serial prefix scan — each position depends
//! on its upwind neighbour — so a profile sweep is never parallelised.

use std::f64::consts::FRAC_PI_2;

use crate::error::SimulationError;
use crate::models::TransportModel;
use crate::physics::{CrossShoreGrid, MoistureField, Sample, SampleField, TemporalForcing};
use crate::solver::config::FetchConfig;

// =================================================================================================
// Output containers
// =================================================================================================

/// Per-step transport scalars.
#[derive(Debug, Clone, Default)]
pub struct TransportSeries {
    /// Potential dry-sand transport rate.
    pub potential: Vec<f64>,
    /// Potential rate projected by the cosine of the foredune-level wind
    /// direction.
    pub potential_cosine: Vec<f64>,
    /// Transport crossing the accounting elevation.
    pub actual: Vec<f64>,
    /// Crossing transport projected by the foredune cosine.
    pub actual_cosine: Vec<f64>,
}

/// Fetch state fields plus the transport series for one run.
#[derive(Debug, Clone)]
pub struct FetchSolution {
    /// Times of the swept rows \[s\].
    pub times: Vec<f64>,
    /// Grid index of the accounting crossing.
    pub cutoff_index: usize,
    /// Downwind distance since the last reset \[m\]; capped at the run's
    /// critical fetch.
    pub local_fetch: SampleField,
    /// Critical fetch per position \[m\]; missing where masked.
    pub critical_fetch: SampleField,
    /// Cumulative transport per position; missing landward of the cutoff
    /// and seaward of the swept span.
    pub cumulative_transport: SampleField,
    /// Per-step scalars.
    pub series: TransportSeries,
}

// =================================================================================================
// FetchAccumulator
// =================================================================================================

/// Cross-shore transport accumulator over one grid.
///
/// Owns its output for the duration of one [`run`](Self::run); the
/// moisture field and forcing are only borrowed.
pub struct FetchAccumulator<'a> {
    grid: &'a CrossShoreGrid,
    config: &'a FetchConfig,
    model: &'a dyn TransportModel,
    cutoff: usize,
}

impl<'a> FetchAccumulator<'a> {
    /// Create an accumulator, locating the accounting crossing once.
    ///
    /// The bed profile must cross the accounting elevation exactly once
    /// within range; anything else is a geometry error.
    pub fn new(
        grid: &'a CrossShoreGrid,
        config: &'a FetchConfig,
        model: &'a dyn TransportModel,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let cutoff = grid.single_crossing_index(config.accounting_elevation)?;
        Ok(Self {
            grid,
            config,
            model,
            cutoff,
        })
    }

    /// Grid index at which transport is accounted.
    pub fn cutoff_index(&self) -> usize {
        self.cutoff
    }

    /// Sweep every time row of the moisture field.
    ///
    /// The wind and rain series must already be keyed to the moisture
    /// rows; the accumulator never resamples.
    pub fn run(
        &self,
        moisture: &MoistureField,
        forcing: &TemporalForcing,
    ) -> Result<FetchSolution, SimulationError> {
        forcing.validate()?;
        if moisture.cols() != self.grid.len() {
            return Err(SimulationError::config(format!(
                "moisture field has {} positions but the grid has {}",
                moisture.cols(),
                self.grid.len()
            )));
        }
        if forcing.len() != moisture.rows() {
            return Err(SimulationError::config(format!(
                "forcing has {} samples but the moisture field has {} rows",
                forcing.len(),
                moisture.rows()
            )));
        }

        let steps = moisture.rows();
        let cols = moisture.cols();
        let mut solution = FetchSolution {
            times: moisture.times.clone(),
            cutoff_index: self.cutoff,
            local_fetch: SampleField::missing(steps, cols),
            critical_fetch: SampleField::missing(steps, cols),
            cumulative_transport: SampleField::missing(steps, cols),
            series: TransportSeries {
                potential: vec![0.0; steps],
                potential_cosine: vec![0.0; steps],
                actual: vec![0.0; steps],
                actual_cosine: vec![0.0; steps],
            },
        };

        for step in 0..steps {
            self.sweep_row(step, moisture, forcing, &mut solution);
        }

        Ok(solution)
    }

    /// One upwind-to-downwind sweep.
    fn sweep_row(
        &self,
        step: usize,
        moisture: &MoistureField,
        forcing: &TemporalForcing,
        solution: &mut FetchSolution,
    ) {
        let beach_dir = forcing.wind_dir_beach[step];

        // No onshore component: every output stays zero and no critical
        // fetch is computed.
        if beach_dir.abs() >= 90.0 {
            self.zero_transport_row(step, solution);
            return;
        }

        let rain = forcing.rain[step];
        let wind = forcing.wind_speed[step];
        let potential = self.model.potential_rate(wind, rain > 0.0);
        let dune_cosine = forcing.wind_dir_dune[step].to_radians().cos();
        solution.series.potential[step] = potential;
        solution.series.potential_cosine[step] = potential * dune_cosine;

        if potential == 0.0 {
            self.zero_transport_row(step, solution);
            return;
        }

        // Potential transport exists but no dry sand is exposed anywhere
        // in scope: nothing can move.
        let any_supply = (0..=self.cutoff).any(|j| match moisture.get(step, j) {
            Sample::Value(theta) => theta < self.config.moisture_ceiling,
            Sample::Missing => false,
        });
        if !any_supply {
            self.zero_transport_row(step, solution);
            return;
        }

        if rain >= self.config.rain_ceiling {
            self.zero_transport_row(step, solution);
            return;
        }

        // Critical fetch per position; masked positions stay missing. A
        // non-positive fetch term (very light wind with a nonzero
        // potential rate) clamps to the instantly saturated limit.
        let fetch_term = 4.38 * wind - 8.23;
        for j in 0..=self.cutoff {
            let critical = match moisture.get(step, j) {
                Sample::Missing => Sample::Missing,
                Sample::Value(theta) if theta >= self.config.moisture_ceiling => Sample::Missing,
                Sample::Value(theta) => Sample::Value((fetch_alpha(theta) * fetch_term).max(0.0)),
            };
            solution.critical_fetch.set(step, j, critical);
        }

        // The sweep starts just past the most landward masked position.
        let last_masked = (0..=self.cutoff)
            .rev()
            .find(|&j| solution.critical_fetch.get(step, j).is_missing());
        let start = match last_masked {
            Some(j) if j == self.cutoff => {
                // The cutoff itself is masked: no run reaches it.
                return;
            }
            Some(j) => j + 1,
            None => 0,
        };

        let downwind_spacing = self.grid.spacing() / beach_dir.to_radians().cos();

        // Partition [start, cutoff] into maximal runs of identical
        // critical fetch and grow the saturating transport curve run by
        // run. `upwind` carries the cumulative value immediately upwind
        // of the current run; zero at the masked boundary.
        let mut j = start;
        let mut upwind = 0.0;
        while j <= self.cutoff {
            let critical = solution.critical_fetch.get(step, j);
            let mut end = j;
            while end + 1 <= self.cutoff && solution.critical_fetch.get(step, end + 1) == critical
            {
                end += 1;
            }
            let critical = critical.value().expect("swept span has no masked cells");

            let mut fetch = 0.0;
            let mut last = upwind;
            for p in j..=end {
                if p > j {
                    fetch += downwind_spacing;
                }
                let (capped, ratio) = if critical > 0.0 {
                    let capped = fetch.min(critical);
                    (capped, capped / critical)
                } else {
                    (0.0, 1.0)
                };
                let q = (upwind + potential * (FRAC_PI_2 * ratio).sin()).min(potential);
                solution.local_fetch.set(step, p, Sample::Value(capped));
                solution.cumulative_transport.set(step, p, Sample::Value(q));
                last = q;
            }
            upwind = last;
            j = end + 1;
        }

        let actual = solution
            .cumulative_transport
            .get(step, self.cutoff)
            .value()
            .expect("the swept span ends at the cutoff");
        solution.series.actual[step] = actual;
        solution.series.actual_cosine[step] = actual * dune_cosine;
    }

    /// Zero the in-scope cumulative transport for a step with no
    /// transport; the fetch fields stay missing because no critical fetch
    /// was computed.
    fn zero_transport_row(&self, step: usize, solution: &mut FetchSolution) {
        for j in 0..=self.cutoff {
            solution
                .cumulative_transport
                .set(step, j, Sample::Value(0.0));
        }
    }
}

/// Moisture multiplier of the critical fetch: a step function of the
/// moisture fraction.
fn fetch_alpha(moisture: f64) -> f64 {
    if moisture < 0.04 {
        1.0
    } else if moisture < 0.06 {
        1.25
    } else if moisture <= 0.10 {
        1.75
    } else {
        2.5
    }
}

// =================================================================================================
// Tests
// =================================================================================================
