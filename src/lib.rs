//! aeolian-rs: Beach Groundwater and Fetch-Limited Transport Simulation
//!
//! Predicts, over a beach cross-section and a multi-day-to-seasonal span,
//! the subsurface water-table elevation, the resulting surface moisture,
//! and the cross-shore accumulation of wind-blown sand on its way from
//! the wet beach to the dune, limited by a moisture-dependent critical
//! fetch.
//!
//! # Architecture
//!
//! Two numerical engines do the real work:
//!
//! 1. **Groundwater** — a moving-boundary Boussinesq solver: explicit
//!    fourth-order Runge-Kutta in time, central differences in space,
//!    with shoreline and outcrop tracking that rewrites the PDE boundary
//!    conditions at every stage of every step.
//! 2. **Fetch** — a per-step cross-shore sweep: the profile is
//!    partitioned into runs of constant critical fetch and a saturating
//!    transport curve grows along the wind, bounded by the potential rate
//!    of a pluggable transport model.
//!
//! Everything else is data plumbing around them: an immutable grid, a
//! forcing set, a retention curve, typed configuration and CSV export.
//!
//! # Quick Start
//!
//! ```rust
//! use aeolian_rs::physics::{CrossShoreGrid, TemporalForcing, VanGenuchten};
//! use aeolian_rs::models::{LettauModel, SaltationThreshold, WindProfile};
//! use aeolian_rs::solver::{
//!     FetchAccumulator, FetchConfig, GroundwaterConfig, GroundwaterSolver,
//! };
//!
//! # fn main() -> Result<(), aeolian_rs::SimulationError> {
//! // A planar 1:30 beach, resampled to a 1 m grid.
//! let positions: Vec<f64> = (0..=4).map(|i| i as f64 * 30.0).collect();
//! let elevations: Vec<f64> = positions.iter().map(|x| x / 30.0 - 1.0).collect();
//! let grid = CrossShoreGrid::from_profile(&positions, &elevations, 1.0)?;
//!
//! // Half a day of calm weather sampled hourly.
//! let time: Vec<f64> = (0..=12).map(|h| h as f64 * 3600.0).collect();
//! let n = time.len();
//! let forcing = TemporalForcing::new(
//!     time,
//!     vec![0.0; n],
//!     vec![0.5; n],
//!     vec![10.0; n],
//!     vec![0.0; n],
//!     vec![0.0; n],
//!     vec![0.0; n],
//! )?;
//!
//! // Water table, then moisture, then transport.
//! let gw_config = GroundwaterConfig::new(30.0, 3600.0, 2e-4, 5.0, 0.35, true, None)?;
//! let solution = GroundwaterSolver::new(&grid, &gw_config)?.run(&forcing)?;
//!
//! let curve = VanGenuchten::new(0.02, 0.35, 3.5, 2.5)?;
//! let moisture = solution.moisture(&grid, &curve)?;
//!
//! let wind = WindProfile::new(10.0, 0.001)?;
//! let threshold = SaltationThreshold::new(0.1, 0.00025, 2650.0, 1.225, 1.5)?;
//! let model = LettauModel::new(6.7, wind, threshold)?;
//! let fetch_config = FetchConfig::new(0.10, 1.5, 5.0)?;
//! let transport = FetchAccumulator::new(&grid, &fetch_config, &model)?
//!     .run(&moisture, &forcing)?;
//!
//! assert_eq!(transport.series.actual.len(), solution.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: grid, forcing, retention curve and missing-aware fields
//! - [`models`]: potential transport-rate models (Hsu, Kok, Lettau)
//! - [`solver`]: the two engines and their configuration
//! - [`output`]: CSV export
//! - [`config`]: TOML run configuration

// Core modules
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod physics;
pub mod solver;

pub use error::SimulationError;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use aeolian_rs::prelude::*;
    //! ```
    pub use crate::error::SimulationError;
    pub use crate::models::{
        HsuModel, KokModel, LettauModel, SaltationThreshold, TransportModel, TransportModelKind,
        WindProfile,
    };
    pub use crate::physics::{
        CrossShoreGrid, MoistureField, Sample, SampleField, TemporalForcing, VanGenuchten,
    };
    pub use crate::solver::{
        FetchAccumulator, FetchConfig, FetchSolution, GroundwaterConfig, GroundwaterSolver,
        RunupInfiltration, TransportSeries, WaterTableSolution,
    };
}
