//! Synthetic scenarios with known behaviour
//!
//! The documented reference case is a planar 1:30 beach under a 2 m range,
//! 12 h tide with a superimposed Gaussian surge. The builders here produce
//! that geometry and forcing at any cadence, plus a fixed-rate transport
//! model for tests that want to isolate the sweep from the wind physics.

use aeolian_rs::models::TransportModel;
use aeolian_rs::physics::{CrossShoreGrid, MoistureField, Sample, SampleField, TemporalForcing};

/// Planar 1:30 beach from -2 m to +2 m over 120 m, resampled at `dx`.
pub fn planar_beach(dx: f64) -> CrossShoreGrid {
    let positions = vec![0.0, 30.0, 60.0, 90.0, 120.0];
    let elevations: Vec<f64> = positions.iter().map(|x| x / 30.0 - 2.0).collect();
    CrossShoreGrid::from_profile(&positions, &elevations, dx).expect("valid planar profile")
}

/// Forcing sampled every `step` seconds over `duration`: a 2 m range, 12 h
/// tide plus a Gaussian surge (0.5 m peak, 2 h spread, centred mid-run),
/// constant shore-normal wind and no rain.
pub fn gaussian_surge_tide(duration: f64, step: f64, wind_speed: f64) -> TemporalForcing {
    let samples = (duration / step).round() as usize + 1;
    let centre = duration / 2.0;
    let sigma = 7200.0;

    let time: Vec<f64> = (0..samples).map(|i| i as f64 * step).collect();
    let tide: Vec<f64> = time
        .iter()
        .map(|&t| {
            let astronomical = 1.0 * (2.0 * std::f64::consts::PI * t / 43_200.0).sin();
            let surge = 0.5 * (-((t - centre) / sigma).powi(2) / 2.0).exp();
            astronomical + surge
        })
        .collect();
    let runup: Vec<f64> = tide.iter().map(|&level| level + 0.3).collect();

    TemporalForcing::new(
        time,
        tide,
        runup,
        vec![wind_speed; samples],
        vec![0.0; samples],
        vec![0.0; samples],
        vec![0.0; samples],
    )
    .expect("valid synthetic forcing")
}

/// Moisture field with `rows` identical rows of fully dry sand.
pub fn uniform_dry_moisture(grid: &CrossShoreGrid, rows: usize, step: f64) -> MoistureField {
    let row: Vec<Sample> = vec![Sample::Value(0.0); grid.len()];
    let mut data = SampleField::missing(rows, grid.len());
    for r in 0..rows {
        data.set_row(r, &row);
    }
    MoistureField {
        times: (0..rows).map(|r| r as f64 * step).collect(),
        data,
    }
}

/// Fixed-rate transport model, independent of wind and rain.
pub struct ConstantRate {
    pub rate: f64,
}

impl TransportModel for ConstantRate {
    fn potential_rate(&self, _wind_speed: f64, _rain_active: bool) -> f64 {
        self.rate
    }

    fn name(&self) -> &str {
        "Constant Rate"
    }
}
