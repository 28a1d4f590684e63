//! Hsu transport-rate model
//!
//! Power law in the grain Froude number:
//!
//! ```text
//! q = C · (u* / sqrt(g · d50))³
//! ```
//!
//! The coefficient absorbs the published empirical calibration. The
//! original author flagged the Froude-number units of this family as
//! possibly inconsistent with the source paper; the formula is reproduced
//! here exactly as documented rather than "corrected".
//!
//! Threshold checking is optional for this model: without a
//! [`SaltationThreshold`] the power law applies at every wind speed.

use crate::error::SimulationError;
use crate::models::threshold::{GRAVITY, SaltationThreshold, WindProfile};
use crate::models::TransportModel;

/// Froude-number power-law model.
///
/// # Example
///
/// ```rust
/// use aeolian_rs::models::{HsuModel, TransportModel, WindProfile};
///
/// let wind = WindProfile::new(10.0, 0.001).unwrap();
/// let model = HsuModel::new(1.5e-4, 0.00025, wind, None).unwrap();
///
/// assert!(model.potential_rate(10.0, false) > 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HsuModel {
    coefficient: f64,
    grain_diameter: f64,
    wind: WindProfile,
    threshold: Option<SaltationThreshold>,
}

impl HsuModel {
    /// Create the model, validating the coefficient and grain diameter.
    pub fn new(
        coefficient: f64,
        grain_diameter: f64,
        wind: WindProfile,
        threshold: Option<SaltationThreshold>,
    ) -> Result<Self, SimulationError> {
        if !coefficient.is_finite() || coefficient <= 0.0 {
            return Err(SimulationError::config(format!(
                "hsu coefficient must be positive, got {}",
                coefficient
            )));
        }
        if !grain_diameter.is_finite() || grain_diameter <= 0.0 {
            return Err(SimulationError::config(format!(
                "grain diameter must be positive, got {}",
                grain_diameter
            )));
        }
        Ok(Self {
            coefficient,
            grain_diameter,
            wind,
            threshold,
        })
    }
}

impl TransportModel for HsuModel {
    fn potential_rate(&self, wind_speed: f64, rain_active: bool) -> f64 {
        let shear = self.wind.shear_velocity(wind_speed);

        if let Some(threshold) = &self.threshold
            && shear <= threshold.shear_velocity_threshold(rain_active)
        {
            return 0.0;
        }

        let froude = shear / (GRAVITY * self.grain_diameter).sqrt();
        self.coefficient * froude.powi(3)
    }

    fn name(&self) -> &str {
        "Hsu"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wind() -> WindProfile {
        WindProfile::new(10.0, 0.001).unwrap()
    }

    fn threshold() -> SaltationThreshold {
        SaltationThreshold::new(0.1, 0.00025, 2650.0, 1.225, 1.5).unwrap()
    }

    #[test]
    fn test_rate_follows_cube_of_shear() {
        let model = HsuModel::new(1.5e-4, 0.00025, wind(), None).unwrap();

        let q1 = model.potential_rate(5.0, false);
        let q2 = model.potential_rate(10.0, false);

        // Without a threshold, doubling the wind speed multiplies the rate
        // by exactly 2³.
        assert_relative_eq!(q2, 8.0 * q1, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_below_threshold_when_enabled() {
        let model = HsuModel::new(1.5e-4, 0.00025, wind(), Some(threshold())).unwrap();

        // u* at 3 m/s is ~0.13, well below the ~0.23 threshold.
        assert_eq!(model.potential_rate(3.0, false), 0.0);
        assert!(model.potential_rate(10.0, false) > 0.0);
    }

    #[test]
    fn test_rain_widens_the_dead_band() {
        let model = HsuModel::new(1.5e-4, 0.00025, wind(), Some(threshold())).unwrap();

        // 6 m/s sits between the dry and wet thresholds.
        assert!(model.potential_rate(6.0, false) > 0.0);
        assert_eq!(model.potential_rate(6.0, true), 0.0);
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(HsuModel::new(0.0, 0.00025, wind(), None).is_err());
        assert!(HsuModel::new(1.5e-4, -1.0, wind(), None).is_err());
    }
}
