//! Physical data model
//!
//! This module holds the passive data the two engines operate on:
//!
//! - [`Sample`] / [`SampleField`]: explicit missing-value marker and the
//!   time×position fields built from it
//! - [`CrossShoreGrid`]: immutable uniform grid resampled from a measured
//!   beach profile
//! - [`TemporalForcing`]: the shared time axis with tide, runup, wind and
//!   rain series
//! - [`VanGenuchten`] / [`MoistureField`]: the retention curve and the
//!   surface moisture field derived from the water table
//!
//! Nothing in here integrates or sweeps; the numerics live in
//! [`solver`](crate::solver).

// =================================================================================================
// Module Declarations
// =================================================================================================

mod forcing;
mod grid;
mod moisture;
mod sample;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use forcing::TemporalForcing;
pub use grid::CrossShoreGrid;
pub use moisture::{MoistureField, VanGenuchten};
pub use sample::{Sample, SampleField};
