//! Lettau transport-rate model
//!
//! Steady-state drag law:
//!
//! ```text
//! q = C · (rho_air / g) · u*² · (u* − u*t)     for u* > u*t
//! q = 0                                        otherwise
//! ```
//!
//! Grows roughly with the cube of the shear velocity far above threshold,
//! which makes it the most aggressive of the three models in storms.

use crate::error::SimulationError;
use crate::models::threshold::{GRAVITY, SaltationThreshold, WindProfile};
use crate::models::TransportModel;

/// Steady-state drag model.
#[derive(Debug, Clone, Copy)]
pub struct LettauModel {
    coefficient: f64,
    wind: WindProfile,
    threshold: SaltationThreshold,
}

impl LettauModel {
    /// Create the model, validating the coefficient.
    pub fn new(
        coefficient: f64,
        wind: WindProfile,
        threshold: SaltationThreshold,
    ) -> Result<Self, SimulationError> {
        if !coefficient.is_finite() || coefficient <= 0.0 {
            return Err(SimulationError::config(format!(
                "lettau coefficient must be positive, got {}",
                coefficient
            )));
        }
        Ok(Self {
            coefficient,
            wind,
            threshold,
        })
    }
}

impl TransportModel for LettauModel {
    fn potential_rate(&self, wind_speed: f64, rain_active: bool) -> f64 {
        let shear = self.wind.shear_velocity(wind_speed);
        let cutoff = self.threshold.shear_velocity_threshold(rain_active);
        if shear <= cutoff {
            return 0.0;
        }

        self.coefficient * (self.threshold.air_density() / GRAVITY)
            * shear
            * shear
            * (shear - cutoff)
    }

    fn name(&self) -> &str {
        "Lettau"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
