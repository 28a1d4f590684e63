//! Temporal forcing series
//!
//! One time axis plus the parallel series that drive both engines: still
//! water (shoreline) level and runup level for the groundwater solver, wind
//! speed, the two wind-direction series and rain intensity for the fetch
//! sweep.
//!
//! The core never resamples wind or rain — those series must already be
//! keyed to the time axis the caller wants the fetch sweep to run on. The
//! two elevation series are the single exception: the groundwater solver
//! interpolates them linearly onto its own fixed-step axis through
//! [`TemporalForcing::tide_at`] and [`TemporalForcing::runup_at`].

use crate::error::SimulationError;

// =================================================================================================
// TemporalForcing
// =================================================================================================

/// Time axis and parallel forcing series.
///
/// Wind directions are referenced to shore-normal, in degrees within
/// `(-180, 180]`; `0°` blows straight onshore. `wind_dir_beach` is measured
/// at beach level and steers the fetch geometry, `wind_dir_dune` at
/// foredune level and projects transport onto the dune-normal.
#[derive(Debug, Clone)]
pub struct TemporalForcing {
    /// Time axis in seconds, strictly increasing.
    pub time: Vec<f64>,
    /// Still-water shoreline elevation series.
    pub tide: Vec<f64>,
    /// Runup elevation series.
    pub runup: Vec<f64>,
    /// Wind speed series in m/s.
    pub wind_speed: Vec<f64>,
    /// Beach-level wind direction series, degrees from shore-normal.
    pub wind_dir_beach: Vec<f64>,
    /// Foredune-level wind direction series, degrees from shore-normal.
    pub wind_dir_dune: Vec<f64>,
    /// Rain intensity series, mm/h.
    pub rain: Vec<f64>,
}

impl TemporalForcing {
    /// Create a forcing set, validating series lengths and value ranges.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        time: Vec<f64>,
        tide: Vec<f64>,
        runup: Vec<f64>,
        wind_speed: Vec<f64>,
        wind_dir_beach: Vec<f64>,
        wind_dir_dune: Vec<f64>,
        rain: Vec<f64>,
    ) -> Result<Self, SimulationError> {
        let forcing = Self {
            time,
            tide,
            runup,
            wind_speed,
            wind_dir_beach,
            wind_dir_dune,
            rain,
        };
        forcing.validate()?;
        Ok(forcing)
    }

    /// Validate the forcing set.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.time.len() < 2 {
            return Err(SimulationError::config(
                "forcing needs at least two time samples",
            ));
        }
        for pair in self.time.windows(2) {
            if pair[1] <= pair[0] {
                return Err(SimulationError::config(
                    "forcing time axis must be strictly increasing",
                ));
            }
        }

        let n = self.time.len();
        let series: [(&str, &[f64]); 6] = [
            ("tide", &self.tide),
            ("runup", &self.runup),
            ("wind_speed", &self.wind_speed),
            ("wind_dir_beach", &self.wind_dir_beach),
            ("wind_dir_dune", &self.wind_dir_dune),
            ("rain", &self.rain),
        ];
        for (name, values) in series {
            if values.len() != n {
                return Err(SimulationError::config(format!(
                    "series '{}' has {} samples but the time axis has {}",
                    name,
                    values.len(),
                    n
                )));
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(SimulationError::config(format!(
                    "series '{}' contains a non-finite sample",
                    name
                )));
            }
        }

        for (name, values) in [
            ("wind_dir_beach", &self.wind_dir_beach),
            ("wind_dir_dune", &self.wind_dir_dune),
        ] {
            if values.iter().any(|&d| d <= -180.0 || d > 180.0) {
                return Err(SimulationError::config(format!(
                    "series '{}' must lie in (-180, 180] degrees",
                    name
                )));
            }
        }

        if self.wind_speed.iter().any(|&u| u < 0.0) {
            return Err(SimulationError::config("wind speed must be non-negative"));
        }
        if self.rain.iter().any(|&r| r < 0.0) {
            return Err(SimulationError::config(
                "rain intensity must be non-negative",
            ));
        }

        Ok(())
    }

    /// Number of samples on the time axis.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the forcing is empty (never true for a validated set).
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Simulated span covered by the time axis, in seconds.
    pub fn duration(&self) -> f64 {
        self.time[self.time.len() - 1] - self.time[0]
    }

    /// Shoreline level at an arbitrary time, linearly interpolated and
    /// clamped to the ends of the axis.
    pub fn tide_at(&self, t: f64) -> f64 {
        interpolate_series(&self.time, &self.tide, t)
    }

    /// Runup level at an arbitrary time, linearly interpolated and clamped
    /// to the ends of the axis.
    pub fn runup_at(&self, t: f64) -> f64 {
        interpolate_series(&self.time, &self.runup, t)
    }
}

fn interpolate_series(time: &[f64], values: &[f64], t: f64) -> f64 {
    if t <= time[0] {
        return values[0];
    }
    if t >= time[time.len() - 1] {
        return values[values.len() - 1];
    }
    let right = time.partition_point(|&v| v < t).max(1);
    let left = right - 1;
    let w = (t - time[left]) / (time[right] - time[left]);
    values[left] + w * (values[right] - values[left])
}

// =================================================================================================
// Tests
// =================================================================================================
