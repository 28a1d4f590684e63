//! CSV export of simulation results
//!
//! Plain comma-separated output readable by Excel, pandas and friends.
//! Field exports write one row per recorded time with the cross-shore
//! positions as columns; missing samples are rendered as empty cells so
//! downstream tools read them as NA rather than as zero.
//!
//! # Example
//!
//! ```rust,ignore
//! use aeolian_rs::output::{export_transport_csv, CsvConfig};
//!
//! export_transport_csv("transport.csv", &solution.times, &solution.series, None)?;
//! ```

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::physics::{CrossShoreGrid, SampleField};
use crate::solver::{TransportSeries, WaterTableSolution};

// =================================================================================================
// Configuration
// =================================================================================================

/// CSV formatting options.
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column separator.
    pub delimiter: char,
    /// Decimal places written for every value.
    pub precision: usize,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            precision: 6,
        }
    }
}

// =================================================================================================
// Export functions
// =================================================================================================

/// Export the recorded water-table field.
///
/// Columns: time, then one column per grid position. The shoreline and
/// outcrop series are exported separately by
/// [`export_boundary_series_csv`].
pub fn export_water_table_csv(
    path: impl AsRef<Path>,
    solution: &WaterTableSolution,
    grid: &CrossShoreGrid,
    config: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    let defaults = CsvConfig::default();
    let config = config.unwrap_or(&defaults);
    let mut writer = BufWriter::new(File::create(path)?);

    write_position_header(&mut writer, grid, config)?;
    for (row, &time) in solution.times.iter().enumerate() {
        write!(writer, "{:.p$}", time, p = config.precision)?;
        for j in 0..grid.len() {
            write!(
                writer,
                "{}{:.p$}",
                config.delimiter,
                solution.rows[row][j],
                p = config.precision
            )?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Export a time×position sample field (moisture, fetch, critical fetch or
/// cumulative transport); missing cells come out empty.
pub fn export_field_csv(
    path: impl AsRef<Path>,
    times: &[f64],
    field: &SampleField,
    grid: &CrossShoreGrid,
    config: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    if times.len() != field.rows() {
        return Err(format!(
            "field has {} rows but {} times were supplied",
            field.rows(),
            times.len()
        )
        .into());
    }
    if grid.len() != field.cols() {
        return Err(format!(
            "field has {} columns but the grid has {} points",
            field.cols(),
            grid.len()
        )
        .into());
    }

    let defaults = CsvConfig::default();
    let config = config.unwrap_or(&defaults);
    let mut writer = BufWriter::new(File::create(path)?);

    write_position_header(&mut writer, grid, config)?;
    for (row, &time) in times.iter().enumerate() {
        write!(writer, "{:.p$}", time, p = config.precision)?;
        for j in 0..field.cols() {
            write!(writer, "{}", config.delimiter)?;
            if let Some(value) = field.get(row, j).value() {
                write!(writer, "{:.p$}", value, p = config.precision)?;
            }
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Export the per-step transport series.
pub fn export_transport_csv(
    path: impl AsRef<Path>,
    times: &[f64],
    series: &TransportSeries,
    config: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    if times.len() != series.actual.len() {
        return Err(format!(
            "series has {} steps but {} times were supplied",
            series.actual.len(),
            times.len()
        )
        .into());
    }

    let defaults = CsvConfig::default();
    let config = config.unwrap_or(&defaults);
    let d = config.delimiter;
    let mut writer = BufWriter::new(File::create(path)?);

    writeln!(
        writer,
        "Time (s){d}Potential (kg/m/s){d}Potential cosine (kg/m/s){d}Actual (kg/m/s){d}Actual cosine (kg/m/s)"
    )?;
    for (i, &time) in times.iter().enumerate() {
        writeln!(
            writer,
            "{:.p$}{d}{:.p$}{d}{:.p$}{d}{:.p$}{d}{:.p$}",
            time,
            series.potential[i],
            series.potential_cosine[i],
            series.actual[i],
            series.actual_cosine[i],
            p = config.precision
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Export the shoreline and outcrop position series of a water-table
/// solution; steps without an outcrop come out empty.
pub fn export_boundary_series_csv(
    path: impl AsRef<Path>,
    solution: &WaterTableSolution,
    grid: &CrossShoreGrid,
    config: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    let defaults = CsvConfig::default();
    let config = config.unwrap_or(&defaults);
    let d = config.delimiter;
    let mut writer = BufWriter::new(File::create(path)?);

    let shoreline = solution.shoreline_positions(grid);
    let outcrop = solution.outcrop_positions(grid);

    writeln!(writer, "Time (s){d}Shoreline (m){d}Outcrop (m)")?;
    for (i, &time) in solution.times.iter().enumerate() {
        write!(
            writer,
            "{:.p$}{d}{:.p$}{d}",
            time,
            shoreline[i],
            p = config.precision
        )?;
        if let Some(position) = outcrop[i].value() {
            write!(writer, "{:.p$}", position, p = config.precision)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_position_header(
    writer: &mut impl Write,
    grid: &CrossShoreGrid,
    config: &CsvConfig,
) -> Result<(), Box<dyn Error>> {
    write!(writer, "Time (s)")?;
    for j in 0..grid.len() {
        write!(
            writer,
            "{}x={:.p$}",
            config.delimiter,
            grid.position(j),
            p = config.precision
        )?;
    }
    writeln!(writer)?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Sample;
    use nalgebra::DVector;
    use std::fs;

    fn grid() -> CrossShoreGrid {
        CrossShoreGrid::from_profile(&[0.0, 4.0], &[0.0, 2.0], 1.0).unwrap()
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("aeolian_rs_csv_test_{}", name));
        path
    }

    #[test]
    fn test_field_export_renders_missing_as_empty() {
        let grid = grid();
        let mut field = SampleField::missing(1, grid.len());
        field.set(0, 0, Sample::Value(0.5));
        field.set(0, 2, Sample::Value(1.5));

        let path = temp_path("field.csv");
        export_field_csv(&path, &[0.0], &field, &grid, None).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Time (s),x=0.000000,x=1.000000,x=2.000000,x=3.000000,x=4.000000"
        );
        assert_eq!(
            lines.next().unwrap(),
            "0.000000,0.500000,,1.500000,,"
        );
    }

    #[test]
    fn test_water_table_export_shape() {
        let grid = grid();
        let solution = WaterTableSolution {
            times: vec![0.0, 600.0],
            rows: vec![
                DVector::from_element(grid.len(), 0.25),
                DVector::from_element(grid.len(), 0.5),
            ],
            shoreline: vec![1, 1],
            outcrop: vec![None, Some(2)],
        };

        let path = temp_path("table.csv");
        export_water_table_csv(&path, &solution, &grid, None).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().nth(2).unwrap().starts_with("600.000000,0.500000"));
    }

    #[test]
    fn test_boundary_series_export() {
        let grid = grid();
        let solution = WaterTableSolution {
            times: vec![0.0, 600.0],
            rows: vec![
                DVector::from_element(grid.len(), 0.0),
                DVector::from_element(grid.len(), 0.0),
            ],
            shoreline: vec![1, 2],
            outcrop: vec![None, Some(3)],
        };

        let path = temp_path("boundary.csv");
        export_boundary_series_csv(&path, &solution, &grid, None).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "Time (s),Shoreline (m),Outcrop (m)");
        // No outcrop: trailing empty cell.
        assert_eq!(lines.next().unwrap(), "0.000000,1.000000,");
        assert_eq!(lines.next().unwrap(), "600.000000,2.000000,3.000000");
    }

    #[test]
    fn test_transport_export() {
        let series = TransportSeries {
            potential: vec![1.0],
            potential_cosine: vec![0.5],
            actual: vec![0.8],
            actual_cosine: vec![0.4],
        };

        let path = temp_path("transport.csv");
        export_transport_csv(&path, &[0.0], &series, None).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        assert!(text.contains("0.000000,1.000000,0.500000,0.800000,0.400000"));
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let series = TransportSeries {
            potential: vec![1.0],
            potential_cosine: vec![0.5],
            actual: vec![0.8],
            actual_cosine: vec![0.4],
        };

        let path = temp_path("mismatch.csv");
        let result = export_transport_csv(&path, &[0.0, 600.0], &series, None);
        fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
