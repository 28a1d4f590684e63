//! Potential transport-rate models
//!
//! All models implement the [`TransportModel`] trait. The fetch sweep calls
//! `potential_rate` once per time step — models are responsible for the
//! dry-sand transport physics, the sweep for the moisture limitation.
//!
//! # Available Models
//!
//! ## [`HsuModel`] — Froude-number power law
//!
//! `q = C · (u*/sqrt(g·d50))³`. Threshold checking is optional; the
//! documented formula is reproduced as published, including its debated
//! Froude-number units.
//!
//! ## [`KokModel`] — threshold-saturation law
//!
//! `q = C · (rho/g) · u*t · (u*² − u*t²)`, exactly zero at or below the
//! saltation threshold.
//!
//! ## [`LettauModel`] — steady-state drag law
//!
//! `q = C · (rho/g) · u*² · (u* − u*t)`, exactly zero at or below the
//! saltation threshold.
//!
//! # Selection
//!
//! Models are chosen at configuration time through [`TransportModelKind`];
//! there is no string dispatch anywhere downstream of configuration
//! parsing. All three rates are non-negative and monotonically
//! non-decreasing in wind speed above the threshold.

use serde::Deserialize;

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod hsu;
pub mod kok;
pub mod lettau;
pub mod threshold;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use hsu::HsuModel;
pub use kok::KokModel;
pub use lettau::LettauModel;
pub use threshold::{GRAVITY, SaltationThreshold, VON_KARMAN, WindProfile};

// =================================================================================================
// Transport Model Trait
// =================================================================================================

/// Trait for potential transport-rate models.
///
/// # Responsibility
///
/// Computes the dry-sand potential transport rate for one wind sample. The
/// moisture limitation, the fetch geometry and the accounting cutoff are
/// all the fetch sweep's job, never the model's.
///
/// # Contract
///
/// - The returned rate is in mass per unit width per unit time
///   \[kg·m⁻¹·s⁻¹\] and is never negative.
/// - A shear velocity at or below the saltation threshold yields exactly
///   zero, not an error — calm air is a valid input.
/// - All parameters are validated at construction; evaluation is
///   infallible.
pub trait TransportModel: Send + Sync {
    /// Potential transport rate for the given wind speed.
    ///
    /// `rain_active` marks steps with nonzero rain intensity; models that
    /// carry a saltation threshold raise it by their wet factor on those
    /// steps.
    fn potential_rate(&self, wind_speed: f64, rain_active: bool) -> f64;

    /// Name of the model (used for display and export metadata).
    fn name(&self) -> &str;
}

// =================================================================================================
// Model Selection
// =================================================================================================

/// Fixed set of transport-rate model variants, selected at configuration
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportModelKind {
    /// Froude-number power law ([`HsuModel`]).
    Hsu,
    /// Threshold-saturation law ([`KokModel`]).
    Kok,
    /// Steady-state drag law ([`LettauModel`]).
    Lettau,
}

impl std::fmt::Display for TransportModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportModelKind::Hsu => write!(f, "hsu"),
            TransportModelKind::Kok => write!(f, "kok"),
            TransportModelKind::Lettau => write!(f, "lettau"),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
