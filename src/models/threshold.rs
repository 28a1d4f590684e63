//! Wind shear and saltation threshold helpers
//!
//! Every transport-rate model in this crate works from the shear velocity
//! `u*` rather than the raw wind speed, and most of them shut off below a
//! grain-entrainment threshold. Both conversions live here so the models
//! stay small algebraic expressions.

use crate::error::SimulationError;

/// Von Kármán constant.
pub const VON_KARMAN: f64 = 0.4;

/// Gravitational acceleration \[m/s²\].
pub const GRAVITY: f64 = 9.81;

// =================================================================================================
// Wind profile
// =================================================================================================

/// Logarithmic wind profile parameters.
///
/// Converts a wind speed measured at `anemometer_height` to a shear
/// velocity through the law of the wall:
///
/// ```text
/// u* = kappa · U / ln(z / z0)
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WindProfile {
    anemometer_height: f64,
    roughness_length: f64,
}

impl WindProfile {
    /// Create a wind profile, validating that the anemometer sits above the
    /// roughness length.
    pub fn new(anemometer_height: f64, roughness_length: f64) -> Result<Self, SimulationError> {
        if roughness_length <= 0.0 {
            return Err(SimulationError::config(format!(
                "roughness length must be positive, got {}",
                roughness_length
            )));
        }
        if anemometer_height <= roughness_length {
            return Err(SimulationError::config(format!(
                "anemometer height {} must exceed the roughness length {}",
                anemometer_height, roughness_length
            )));
        }
        Ok(Self {
            anemometer_height,
            roughness_length,
        })
    }

    /// Shear velocity for a wind speed measured at the anemometer height.
    pub fn shear_velocity(&self, wind_speed: f64) -> f64 {
        VON_KARMAN * wind_speed / (self.anemometer_height / self.roughness_length).ln()
    }
}

// =================================================================================================
// Saltation threshold
// =================================================================================================

/// Bagnold-type saltation threshold.
///
/// ```text
/// u*t = A · sqrt(g · d50 · (rho_grain - rho_air) / rho_air)
/// ```
///
/// When rain is falling the surface is harder to mobilise; the threshold is
/// raised by `wet_factor` for rain-active steps.
#[derive(Debug, Clone, Copy)]
pub struct SaltationThreshold {
    coefficient: f64,
    grain_diameter: f64,
    grain_density: f64,
    air_density: f64,
    wet_factor: f64,
}

impl SaltationThreshold {
    /// Create a threshold helper, validating every parameter.
    pub fn new(
        coefficient: f64,
        grain_diameter: f64,
        grain_density: f64,
        air_density: f64,
        wet_factor: f64,
    ) -> Result<Self, SimulationError> {
        for (name, value) in [
            ("threshold coefficient", coefficient),
            ("grain diameter", grain_diameter),
            ("grain density", grain_density),
            ("air density", air_density),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimulationError::config(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if grain_density <= air_density {
            return Err(SimulationError::config(
                "grain density must exceed air density",
            ));
        }
        if wet_factor < 1.0 {
            return Err(SimulationError::config(format!(
                "wet threshold factor must be at least 1, got {}",
                wet_factor
            )));
        }
        Ok(Self {
            coefficient,
            grain_diameter,
            grain_density,
            air_density,
            wet_factor,
        })
    }

    /// Air density \[kg/m³\].
    pub fn air_density(&self) -> f64 {
        self.air_density
    }

    /// Grain diameter \[m\].
    pub fn grain_diameter(&self) -> f64 {
        self.grain_diameter
    }

    /// Threshold shear velocity, raised by the wet factor when rain is
    /// active.
    pub fn shear_velocity_threshold(&self, rain_active: bool) -> f64 {
        let dry = self.coefficient
            * (GRAVITY * self.grain_diameter * (self.grain_density - self.air_density)
                / self.air_density)
                .sqrt();
        if rain_active { dry * self.wet_factor } else { dry }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
