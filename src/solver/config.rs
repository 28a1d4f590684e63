//! Typed, validated engine configuration
//!
//! Both engines take an immutable configuration object validated once at
//! construction. A missing or out-of-range field is a fatal
//! [`SimulationError::Configuration`] raised before any numerics run;
//! there is no dynamic presence-checking downstream.

use crate::error::SimulationError;

// =================================================================================================
// Groundwater configuration
// =================================================================================================

/// Runup infiltration parameters.
///
/// Active only when attached to a [`GroundwaterConfig`]; both fields are
/// required once the mechanism is enabled.
#[derive(Debug, Clone, Copy)]
pub struct RunupInfiltration {
    /// Dimensionless infiltration coefficient `Cl`.
    pub coefficient: f64,
    /// Water-table depth below which no infiltration is added \[m\].
    pub minimum_depth: f64,
}

impl RunupInfiltration {
    /// Create and validate the infiltration parameters.
    pub fn new(coefficient: f64, minimum_depth: f64) -> Result<Self, SimulationError> {
        if !coefficient.is_finite() || coefficient <= 0.0 {
            return Err(SimulationError::config(format!(
                "runup infiltration coefficient must be positive, got {}",
                coefficient
            )));
        }
        if !minimum_depth.is_finite() || minimum_depth <= 0.0 {
            return Err(SimulationError::config(format!(
                "runup minimum depth must be positive, got {}",
                minimum_depth
            )));
        }
        Ok(Self {
            coefficient,
            minimum_depth,
        })
    }
}

/// Configuration of the groundwater solver.
///
/// # Stability
///
/// The scheme is explicit and conditionally stable. The time step is taken
/// as given — the solver never adjusts it — so the caller must keep `dt`
/// below the diffusion bound for the chosen grid;
/// [`diffusion_stability_limit`](Self::diffusion_stability_limit) computes
/// that bound.
#[derive(Debug, Clone)]
pub struct GroundwaterConfig {
    /// Integration time step \[s\].
    pub time_step: f64,
    /// Simulated seconds between recorded output rows.
    pub output_interval: f64,
    /// Hydraulic conductivity `K` \[m/s\].
    pub conductivity: f64,
    /// Aquifer thickness `D` \[m\].
    pub aquifer_thickness: f64,
    /// Effective porosity `ne`.
    pub porosity: f64,
    /// Whether the nonlinear Boussinesq term is included.
    pub nonlinear: bool,
    /// Runup infiltration, when enabled.
    pub runup: Option<RunupInfiltration>,
}

impl GroundwaterConfig {
    /// Create a configuration, validating every field.
    pub fn new(
        time_step: f64,
        output_interval: f64,
        conductivity: f64,
        aquifer_thickness: f64,
        porosity: f64,
        nonlinear: bool,
        runup: Option<RunupInfiltration>,
    ) -> Result<Self, SimulationError> {
        let config = Self {
            time_step,
            output_interval,
            conductivity,
            aquifer_thickness,
            porosity,
            nonlinear,
            runup,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), SimulationError> {
        for (name, value) in [
            ("time step", self.time_step),
            ("output interval", self.output_interval),
            ("conductivity", self.conductivity),
            ("aquifer thickness", self.aquifer_thickness),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimulationError::config(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !(self.porosity > 0.0 && self.porosity < 1.0) {
            return Err(SimulationError::config(format!(
                "porosity must lie in (0, 1), got {}",
                self.porosity
            )));
        }
        if self.output_interval < self.time_step {
            return Err(SimulationError::config(format!(
                "output interval {} must be at least one time step {}",
                self.output_interval, self.time_step
            )));
        }
        Ok(())
    }

    /// Linear diffusivity `K·D/ne` \[m²/s\].
    pub fn diffusivity(&self) -> f64 {
        self.conductivity * self.aquifer_thickness / self.porosity
    }

    /// Largest stable time step for pure diffusion on spacing `dx`:
    /// `dx² / (2·K·D/ne)`. The nonlinear term tightens this further, so
    /// stay well below it.
    pub fn diffusion_stability_limit(&self, dx: f64) -> f64 {
        dx * dx / (2.0 * self.diffusivity())
    }
}

// =================================================================================================
// Fetch configuration
// =================================================================================================

/// Configuration of the fetch accumulator.
#[derive(Debug, Clone, Copy)]
pub struct FetchConfig {
    /// Moisture fraction at or above which a position cannot supply sand.
    pub moisture_ceiling: f64,
    /// Bed elevation above which deposition is assumed aeolian; transport
    /// is accounted at the unique crossing of this level.
    pub accounting_elevation: f64,
    /// Rain intensity at or above which transport shuts down \[mm/h\].
    pub rain_ceiling: f64,
}

impl FetchConfig {
    /// Create a configuration, validating every field.
    pub fn new(
        moisture_ceiling: f64,
        accounting_elevation: f64,
        rain_ceiling: f64,
    ) -> Result<Self, SimulationError> {
        let config = Self {
            moisture_ceiling,
            accounting_elevation,
            rain_ceiling,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.moisture_ceiling > 0.0 && self.moisture_ceiling < 1.0) {
            return Err(SimulationError::config(format!(
                "moisture ceiling must lie in (0, 1), got {}",
                self.moisture_ceiling
            )));
        }
        if !self.accounting_elevation.is_finite() {
            return Err(SimulationError::config(
                "accounting elevation must be finite",
            ));
        }
        if !self.rain_ceiling.is_finite() || self.rain_ceiling <= 0.0 {
            return Err(SimulationError::config(format!(
                "rain ceiling must be positive, got {}",
                self.rain_ceiling
            )));
        }
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_groundwater_config_accepts_valid_fields() {
        let config =
            GroundwaterConfig::new(10.0, 600.0, 2e-4, 5.0, 0.35, true, None).unwrap();

        assert_relative_eq!(config.diffusivity(), 2e-4 * 5.0 / 0.35);
    }

    #[test]
    fn test_groundwater_config_rejects_nonpositive_step() {
        let result = GroundwaterConfig::new(0.0, 600.0, 2e-4, 5.0, 0.35, false, None);
        assert!(matches!(result, Err(SimulationError::Configuration(_))));
    }

    #[test]
    fn test_groundwater_config_rejects_porosity_out_of_range() {
        let result = GroundwaterConfig::new(10.0, 600.0, 2e-4, 5.0, 1.2, false, None);
        assert!(matches!(result, Err(SimulationError::Configuration(_))));
    }

    #[test]
    fn test_groundwater_config_rejects_interval_below_step() {
        let result = GroundwaterConfig::new(10.0, 5.0, 2e-4, 5.0, 0.35, false, None);
        assert!(matches!(result, Err(SimulationError::Configuration(_))));
    }

    #[test]
    fn test_stability_limit() {
        let config =
            GroundwaterConfig::new(10.0, 600.0, 2e-4, 5.0, 0.35, false, None).unwrap();

        // dx²/(2·K·D/ne) with dx = 1 m.
        assert_relative_eq!(
            config.diffusion_stability_limit(1.0),
            0.35 / (2.0 * 2e-4 * 5.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_runup_infiltration_validation() {
        assert!(RunupInfiltration::new(1.5, 0.05).is_ok());
        assert!(RunupInfiltration::new(0.0, 0.05).is_err());
        assert!(RunupInfiltration::new(1.5, -0.1).is_err());
    }

    #[test]
    fn test_fetch_config_validation() {
        assert!(FetchConfig::new(0.1, 1.0, 5.0).is_ok());
        assert!(FetchConfig::new(0.0, 1.0, 5.0).is_err());
        assert!(FetchConfig::new(0.1, f64::NAN, 5.0).is_err());
        assert!(FetchConfig::new(0.1, 1.0, 0.0).is_err());
    }
}
