//! Run configuration loading
//!
//! A whole simulation is described by one TOML document with five
//! sections: `[grid]`, `[groundwater]`, `[moisture]`, `[fetch]` and
//! `[transport]`. The raw document is deserialized into a schema where
//! every field is optional, then [`RunConfigFile::build`] turns it into
//! the typed configuration objects — failing fast with a
//! [`SimulationError::Configuration`] that names the first absent or
//! invalid field.
//!
//! ```toml
//! [grid]
//! spacing = 0.5
//!
//! [groundwater]
//! time_step = 10.0
//! output_interval = 600.0
//! conductivity = 2e-4
//! aquifer_thickness = 5.0
//! porosity = 0.35
//! nonlinear = true
//! runup_infiltration = false
//!
//! [moisture]
//! theta_res = 0.02
//! theta_sat = 0.35
//! alpha = 3.5
//! n = 2.5
//!
//! [fetch]
//! moisture_ceiling = 0.10
//! accounting_elevation = 1.0
//! rain_ceiling = 5.0
//!
//! [transport]
//! model = "lettau"
//! coefficient = 6.7
//! grain_diameter = 0.00025
//! grain_density = 2650.0
//! air_density = 1.225
//! anemometer_height = 10.0
//! roughness_length = 0.001
//! threshold_coefficient = 0.1
//! wet_threshold_factor = 1.5
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::SimulationError;
use crate::models::{
    HsuModel, KokModel, LettauModel, SaltationThreshold, TransportModel, TransportModelKind,
    WindProfile,
};
use crate::physics::VanGenuchten;
use crate::solver::{FetchConfig, GroundwaterConfig, RunupInfiltration};

// =================================================================================================
// Raw schema (everything optional)
// =================================================================================================

/// Raw, unvalidated run configuration as it appears on disk.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfigFile {
    grid: Option<RawGrid>,
    groundwater: Option<RawGroundwater>,
    moisture: Option<RawMoisture>,
    fetch: Option<RawFetch>,
    transport: Option<RawTransport>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGrid {
    spacing: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGroundwater {
    time_step: Option<f64>,
    output_interval: Option<f64>,
    conductivity: Option<f64>,
    aquifer_thickness: Option<f64>,
    porosity: Option<f64>,
    nonlinear: Option<bool>,
    runup_infiltration: Option<bool>,
    runup_coefficient: Option<f64>,
    runup_minimum_depth: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMoisture {
    theta_res: Option<f64>,
    theta_sat: Option<f64>,
    alpha: Option<f64>,
    n: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFetch {
    moisture_ceiling: Option<f64>,
    accounting_elevation: Option<f64>,
    rain_ceiling: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTransport {
    model: Option<TransportModelKind>,
    coefficient: Option<f64>,
    grain_diameter: Option<f64>,
    grain_density: Option<f64>,
    air_density: Option<f64>,
    anemometer_height: Option<f64>,
    roughness_length: Option<f64>,
    threshold_coefficient: Option<f64>,
    wet_threshold_factor: Option<f64>,
    /// Hsu only: whether the saltation threshold gates the power law.
    /// Defaults to true.
    apply_threshold: Option<bool>,
}

// =================================================================================================
// Validated configuration
// =================================================================================================

/// Fully validated run configuration.
pub struct RunConfig {
    /// Grid spacing for profile resampling \[m\].
    pub grid_spacing: f64,
    /// Groundwater solver parameters.
    pub groundwater: GroundwaterConfig,
    /// Retention curve for the moisture transform.
    pub retention: VanGenuchten,
    /// Fetch sweep parameters.
    pub fetch: FetchConfig,
    /// Which transport model was selected.
    pub transport_kind: TransportModelKind,
    /// The constructed transport model.
    pub transport: Box<dyn TransportModel>,
}

impl std::fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunConfig")
            .field("grid_spacing", &self.grid_spacing)
            .field("groundwater", &self.groundwater)
            .field("fetch", &self.fetch)
            .field("transport", &self.transport_kind)
            .finish()
    }
}

impl RunConfigFile {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, SimulationError> {
        toml::from_str(text)
            .map_err(|e| SimulationError::config(format!("malformed run configuration: {}", e)))
    }

    /// Read and parse a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let text = fs::read_to_string(path.as_ref()).map_err(|e| {
            SimulationError::config(format!(
                "cannot read run configuration {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&text)
    }

    /// Validate into the typed configuration, failing on the first absent
    /// field.
    pub fn build(self) -> Result<RunConfig, SimulationError> {
        let grid = self.grid.unwrap_or_default();
        let gw = self.groundwater.unwrap_or_default();
        let moisture = self.moisture.unwrap_or_default();
        let fetch = self.fetch.unwrap_or_default();
        let transport = self.transport.unwrap_or_default();

        let grid_spacing = require(grid.spacing, "grid", "spacing")?;

        let runup = if require(gw.runup_infiltration, "groundwater", "runup_infiltration")? {
            Some(RunupInfiltration::new(
                require(gw.runup_coefficient, "groundwater", "runup_coefficient")?,
                require(gw.runup_minimum_depth, "groundwater", "runup_minimum_depth")?,
            )?)
        } else {
            None
        };
        let groundwater = GroundwaterConfig::new(
            require(gw.time_step, "groundwater", "time_step")?,
            require(gw.output_interval, "groundwater", "output_interval")?,
            require(gw.conductivity, "groundwater", "conductivity")?,
            require(gw.aquifer_thickness, "groundwater", "aquifer_thickness")?,
            require(gw.porosity, "groundwater", "porosity")?,
            require(gw.nonlinear, "groundwater", "nonlinear")?,
            runup,
        )?;

        let retention = VanGenuchten::new(
            require(moisture.theta_res, "moisture", "theta_res")?,
            require(moisture.theta_sat, "moisture", "theta_sat")?,
            require(moisture.alpha, "moisture", "alpha")?,
            require(moisture.n, "moisture", "n")?,
        )?;

        let fetch = FetchConfig::new(
            require(fetch.moisture_ceiling, "fetch", "moisture_ceiling")?,
            require(fetch.accounting_elevation, "fetch", "accounting_elevation")?,
            require(fetch.rain_ceiling, "fetch", "rain_ceiling")?,
        )?;

        let transport_kind = require(transport.model, "transport", "model")?;
        let wind = WindProfile::new(
            require(transport.anemometer_height, "transport", "anemometer_height")?,
            require(transport.roughness_length, "transport", "roughness_length")?,
        )?;
        let threshold = || -> Result<SaltationThreshold, SimulationError> {
            SaltationThreshold::new(
                require(
                    transport.threshold_coefficient,
                    "transport",
                    "threshold_coefficient",
                )?,
                require(transport.grain_diameter, "transport", "grain_diameter")?,
                require(transport.grain_density, "transport", "grain_density")?,
                require(transport.air_density, "transport", "air_density")?,
                require(
                    transport.wet_threshold_factor,
                    "transport",
                    "wet_threshold_factor",
                )?,
            )
        };
        let coefficient = require(transport.coefficient, "transport", "coefficient")?;

        let model: Box<dyn TransportModel> = match transport_kind {
            TransportModelKind::Hsu => {
                let gate = if transport.apply_threshold.unwrap_or(true) {
                    Some(threshold()?)
                } else {
                    None
                };
                Box::new(HsuModel::new(
                    coefficient,
                    require(transport.grain_diameter, "transport", "grain_diameter")?,
                    wind,
                    gate,
                )?)
            }
            TransportModelKind::Kok => Box::new(KokModel::new(coefficient, wind, threshold()?)?),
            TransportModelKind::Lettau => {
                Box::new(LettauModel::new(coefficient, wind, threshold()?)?)
            }
        };

        Ok(RunConfig {
            grid_spacing,
            groundwater,
            retention,
            fetch,
            transport_kind,
            transport: model,
        })
    }
}

/// Pull a required field out of its option, naming it on failure.
fn require<T>(value: Option<T>, section: &str, key: &str) -> Result<T, SimulationError> {
    value.ok_or_else(|| {
        SimulationError::config(format!(
            "required field '{}.{}' is absent",
            section, key
        ))
    })
}

// =================================================================================================
// Tests
// =================================================================================================
