//! Numerical engines
//!
//! The two engines of the simulation live here, together with their typed
//! configuration objects.
//!
//! # Architecture
//!
//! The crate separates concerns into three layers:
//!
//! 1. **Data** ([`physics`](crate::physics)) — the grid, the forcing and
//!    the fields. Immutable once built, shared by reference.
//! 2. **Configuration** ([`GroundwaterConfig`], [`FetchConfig`]) — every
//!    numerical and physical parameter, validated once at construction.
//!    A missing field never survives past the constructor.
//! 3. **Engines** ([`GroundwaterSolver`], [`FetchAccumulator`]) — own
//!    their working state for the duration of one run and hand the result
//!    off as an immutable solution object.
//!
//! # Workflow
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │ CrossShoreGrid   │     │ TemporalForcing  │
//! └────────┬─────────┘     └────────┬─────────┘
//!          │                        │
//!          ▼                        ▼
//!     ┌─────────────────────────────────┐
//!     │ GroundwaterSolver (RK4, moving  │
//!     │ shoreline/outcrop boundary)     │
//!     └────────────────┬────────────────┘
//!                      ▼
//!          WaterTableSolution ──▶ MoistureField (Van Genuchten)
//!                                       │
//!                                       ▼
//!     ┌─────────────────────────────────┐
//!     │ FetchAccumulator (run-wise      │◀── TransportModel
//!     │ saturating sweep per step)      │    (Hsu / Kok / Lettau)
//!     └────────────────┬────────────────┘
//!                      ▼
//!          FetchSolution + TransportSeries
//! ```
//!
//! # Sequencing
//!
//! Everything is single-threaded and sequential by design. The RK4 step
//! has a hard time dependency (each step consumes the previous profile,
//! each stage the previous stage) and the fetch sweep is a serial prefix
//! scan across the profile. Grid sizes are O(10²)–O(10³) points, so there
//! is nothing to win from parallelising the engines themselves; only the
//! pointwise moisture transform optionally fans out under the `parallel`
//! feature.

// =================================================================================================
// Module Declarations
// =================================================================================================

mod config;
mod fetch;
mod groundwater;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use config::{FetchConfig, GroundwaterConfig, RunupInfiltration};
pub use fetch::{FetchAccumulator, FetchSolution, TransportSeries};
pub use groundwater::{GroundwaterSolver, WaterTableSolution};
