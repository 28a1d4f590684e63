//! Result export
//!
//! Persists simulation artifacts as CSV: the water-table field, the
//! derived sample fields (moisture, fetch, critical fetch, cumulative
//! transport), the per-step transport series and the shoreline/outcrop
//! tracking series. There is no wire protocol — files are the interface.

// =================================================================================================
// Module Declarations
// =================================================================================================

mod csv;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use csv::{
    CsvConfig, export_boundary_series_csv, export_field_csv, export_transport_csv,
    export_water_table_csv,
};
