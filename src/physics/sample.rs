//! Missing-aware sample values and time×position fields
//!
//! Several outputs of the simulation are only defined over part of the
//! cross-shore profile: moisture is meaningless seaward of the instantaneous
//! shoreline, cumulative transport is out of accounting scope landward of the
//! elevation cutoff, and critical fetch is masked wherever the surface is too
//! moist. Instead of abusing floating-point NaN for those holes, the crate
//! carries an explicit [`Sample`] marker through every computation.
//!
//! # Propagation Rule
//!
//! Any arithmetic operation touching a [`Sample::Missing`] input yields a
//! missing output. This is deliberate and total: there is no context in which
//! a missing moisture value can contribute a number downstream.
//!
//! # Example
//!
//! ```rust
//! use aeolian_rs::physics::Sample;
//!
//! let wet = Sample::Value(0.08);
//! let hole = Sample::Missing;
//!
//! assert_eq!(wet * 2.0, Sample::Value(0.16));
//! assert_eq!(wet + hole, Sample::Missing);
//! assert!(hole.is_missing());
//! ```

use std::fmt;

// =================================================================================================
// Sample
// =================================================================================================

/// A single measurement that may be absent.
///
/// # Design
///
/// A dedicated two-variant enum rather than `Option<f64>` so that the
/// missing-propagation arithmetic can live on the type itself and so that
/// "missing" reads as a domain concept at call sites, not as an absent
/// container slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    /// A defined value.
    Value(f64),

    /// No value is defined at this (time, position).
    Missing,
}

impl Sample {
    /// Extract the value, if defined.
    pub fn value(self) -> Option<f64> {
        match self {
            Sample::Value(v) => Some(v),
            Sample::Missing => None,
        }
    }

    /// Check whether this sample is missing.
    pub fn is_missing(self) -> bool {
        matches!(self, Sample::Missing)
    }

    /// Extract the value or substitute a default.
    pub fn unwrap_or(self, default: f64) -> f64 {
        match self {
            Sample::Value(v) => v,
            Sample::Missing => default,
        }
    }

    /// Apply a function to the value, keeping missing samples missing.
    pub fn map<F>(self, f: F) -> Sample
    where
        F: FnOnce(f64) -> f64,
    {
        match self {
            Sample::Value(v) => Sample::Value(f(v)),
            Sample::Missing => Sample::Missing,
        }
    }
}

impl From<Option<f64>> for Sample {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Sample::Value(v),
            None => Sample::Missing,
        }
    }
}

// Missing-propagating arithmetic

impl std::ops::Add for Sample {
    type Output = Sample;

    fn add(self, rhs: Sample) -> Sample {
        match (self, rhs) {
            (Sample::Value(a), Sample::Value(b)) => Sample::Value(a + b),
            _ => Sample::Missing,
        }
    }
}

impl std::ops::Sub for Sample {
    type Output = Sample;

    fn sub(self, rhs: Sample) -> Sample {
        match (self, rhs) {
            (Sample::Value(a), Sample::Value(b)) => Sample::Value(a - b),
            _ => Sample::Missing,
        }
    }
}

impl std::ops::Mul<f64> for Sample {
    type Output = Sample;

    fn mul(self, scalar: f64) -> Sample {
        self.map(|v| v * scalar)
    }
}

impl std::ops::Mul<Sample> for Sample {
    type Output = Sample;

    fn mul(self, rhs: Sample) -> Sample {
        match (self, rhs) {
            (Sample::Value(a), Sample::Value(b)) => Sample::Value(a * b),
            _ => Sample::Missing,
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sample::Value(v) => write!(f, "{}", v),
            Sample::Missing => write!(f, "missing"),
        }
    }
}

// =================================================================================================
// SampleField
// =================================================================================================

/// Dense time×position field of [`Sample`] values.
///
/// Rows index recorded time steps, columns index cross-shore grid positions.
/// The backing storage is a single row-major `Vec`, sized once at
/// construction; field producers overwrite cells in place rather than
/// reallocating per step.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleField {
    rows: usize,
    cols: usize,
    data: Vec<Sample>,
}

impl SampleField {
    /// Create a field with every cell missing.
    pub fn missing(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![Sample::Missing; rows * cols],
        }
    }

    /// Number of time rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of position columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read a cell.
    ///
    /// # Panics
    ///
    /// Panics when the index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Sample {
        assert!(row < self.rows && col < self.cols, "field index out of bounds");
        self.data[row * self.cols + col]
    }

    /// Write a cell.
    ///
    /// # Panics
    ///
    /// Panics when the index is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: Sample) {
        assert!(row < self.rows && col < self.cols, "field index out of bounds");
        self.data[row * self.cols + col] = value;
    }

    /// Borrow one time row as a slice.
    pub fn row(&self, row: usize) -> &[Sample] {
        assert!(row < self.rows, "field row out of bounds");
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Overwrite one time row from a slice.
    ///
    /// # Panics
    ///
    /// Panics when `values` does not have exactly `cols()` entries.
    pub fn set_row(&mut self, row: usize, values: &[Sample]) {
        assert_eq!(values.len(), self.cols, "row length mismatch");
        self.data[row * self.cols..(row + 1) * self.cols].copy_from_slice(values);
    }

    /// Apply a function to every defined cell, leaving missing cells missing.
    pub fn apply<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        self.data.iter_mut().for_each(|s| *s = s.map(&f));
    }

    /// Smallest and largest defined value, if any cell is defined.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for sample in &self.data {
            if let Sample::Value(v) = sample {
                range = Some(match range {
                    Some((lo, hi)) => (lo.min(*v), hi.max(*v)),
                    None => (*v, *v),
                });
            }
        }
        range
    }
}

impl std::ops::Index<(usize, usize)> for SampleField {
    type Output = Sample;

    fn index(&self, (row, col): (usize, usize)) -> &Sample {
        assert!(row < self.rows && col < self.cols, "field index out of bounds");
        &self.data[row * self.cols + col]
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_extraction() {
        assert_eq!(Sample::Value(2.5).value(), Some(2.5));
        assert_eq!(Sample::Missing.value(), None);
        assert_eq!(Sample::Missing.unwrap_or(7.0), 7.0);
    }

    #[test]
    fn test_missing_propagates_through_addition() {
        assert_eq!(Sample::Value(1.0) + Sample::Value(2.0), Sample::Value(3.0));
        assert_eq!(Sample::Value(1.0) + Sample::Missing, Sample::Missing);
        assert_eq!(Sample::Missing + Sample::Value(2.0), Sample::Missing);
        assert_eq!(Sample::Missing + Sample::Missing, Sample::Missing);
    }

    #[test]
    fn test_missing_propagates_through_subtraction() {
        assert_eq!(Sample::Value(5.0) - Sample::Value(2.0), Sample::Value(3.0));
        assert_eq!(Sample::Missing - Sample::Value(2.0), Sample::Missing);
    }

    #[test]
    fn test_missing_propagates_through_multiplication() {
        assert_eq!(Sample::Value(3.0) * 2.0, Sample::Value(6.0));
        assert_eq!(Sample::Missing * 2.0, Sample::Missing);
        assert_eq!(Sample::Value(3.0) * Sample::Missing, Sample::Missing);
    }

    #[test]
    fn test_map_keeps_missing() {
        assert_eq!(Sample::Value(4.0).map(f64::sqrt), Sample::Value(2.0));
        assert_eq!(Sample::Missing.map(f64::sqrt), Sample::Missing);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Sample::from(Some(1.0)), Sample::Value(1.0));
        assert_eq!(Sample::from(None), Sample::Missing);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Sample::Value(1.5)), "1.5");
        assert_eq!(format!("{}", Sample::Missing), "missing");
    }

    #[test]
    fn test_field_starts_missing() {
        let field = SampleField::missing(3, 4);
        assert_eq!(field.rows(), 3);
        assert_eq!(field.cols(), 4);
        assert!(field.get(2, 3).is_missing());
        assert!(field.value_range().is_none());
    }

    #[test]
    fn test_field_set_and_get() {
        let mut field = SampleField::missing(2, 3);
        field.set(1, 2, Sample::Value(0.07));

        assert_eq!(field[(1, 2)], Sample::Value(0.07));
        assert!(field[(0, 0)].is_missing());
        assert_eq!(field.value_range(), Some((0.07, 0.07)));
    }

    #[test]
    fn test_field_rows_are_independent() {
        let mut field = SampleField::missing(2, 2);
        field.set_row(0, &[Sample::Value(1.0), Sample::Value(2.0)]);

        assert_eq!(field.row(0), &[Sample::Value(1.0), Sample::Value(2.0)]);
        assert_eq!(field.row(1), &[Sample::Missing, Sample::Missing]);
    }

    #[test]
    fn test_field_apply_skips_missing() {
        let mut field = SampleField::missing(1, 3);
        field.set(0, 0, Sample::Value(2.0));
        field.set(0, 2, Sample::Value(3.0));

        field.apply(|v| v * 10.0);

        assert_eq!(field[(0, 0)], Sample::Value(20.0));
        assert!(field[(0, 1)].is_missing());
        assert_eq!(field[(0, 2)], Sample::Value(30.0));
    }

    #[test]
    #[should_panic(expected = "field index out of bounds")]
    fn test_field_out_of_bounds_panics() {
        let field = SampleField::missing(2, 2);
        let _ = field.get(2, 0);
    }
}
