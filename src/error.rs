//! Fatal error classes for simulation runs
//!
//! There are exactly two ways a run can fail, and both abort immediately:
//!
//! - [`SimulationError::Configuration`]: a required parameter is absent or
//!   outside its valid range. Checked at the entry of every component and
//!   every transport model constructor.
//! - [`SimulationError::Geometry`]: the bed profile does not cross the sea
//!   level, the accounting elevation or the runup level as expected.
//!
//! Both represent programmer or configuration mistakes, not transient
//! conditions — there is no retry or degraded mode. Numerical edge cases
//! (shear velocity below the saltation threshold, a non-positive critical
//! fetch) are handled locally by clamping to the physically valid "no
//! transport" outcome and never surface as errors.

use thiserror::Error;

/// Error raised by solvers, models and configuration builders.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A required configuration field is missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The bed profile does not intersect a required level.
    #[error("geometry error: {0}")]
    Geometry(String),
}

impl SimulationError {
    /// Shorthand for a configuration failure.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Shorthand for a geometry failure.
    pub fn geometry(message: impl Into<String>) -> Self {
        Self::Geometry(message.into())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_display() {
        let error = SimulationError::config("porosity is required");
        assert_eq!(
            error.to_string(),
            "configuration error: porosity is required"
        );
    }

    #[test]
    fn test_geometry_display() {
        let error = SimulationError::geometry("profile does not cross the sea level");
        assert_eq!(
            error.to_string(),
            "geometry error: profile does not cross the sea level"
        );
    }
}
