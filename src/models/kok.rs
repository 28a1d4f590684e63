//! Kok transport-rate model
//!
//! Threshold-saturation law:
//!
//! ```text
//! q = C · (rho_air / g) · u*t · (u*² − u*t²)     for u* > u*t
//! q = 0                                          otherwise
//! ```
//!
//! The threshold shear velocity appears both as the cutoff and inside the
//! rate itself, so the curve leaves zero with zero slope and saturates more
//! gently than the drag-law family.

use crate::error::SimulationError;
use crate::models::threshold::{GRAVITY, SaltationThreshold, WindProfile};
use crate::models::TransportModel;

/// Threshold-saturation model.
#[derive(Debug, Clone, Copy)]
pub struct KokModel {
    coefficient: f64,
    wind: WindProfile,
    threshold: SaltationThreshold,
}

impl KokModel {
    /// Create the model, validating the coefficient.
    pub fn new(
        coefficient: f64,
        wind: WindProfile,
        threshold: SaltationThreshold,
    ) -> Result<Self, SimulationError> {
        if !coefficient.is_finite() || coefficient <= 0.0 {
            return Err(SimulationError::config(format!(
                "kok coefficient must be positive, got {}",
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

impl TransportModel for KokModel {
    fn potential_rate(&self, wind_speed: f64, rain_active: bool) -> f64 {
        let shear = self.wind.shear_velocity(wind_speed);
        let cutoff = self.threshold.shear_velocity_threshold(rain_active);
        if shear <= cutoff {
            return 0.0;
        }

        self.coefficient * (self.threshold.air_density() / GRAVITY)
            * cutoff
            * (shear * shear - cutoff * cutoff)
    }

    fn name(&self) -> &str {
        "Kok"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
