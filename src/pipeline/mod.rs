//! Pipeline entry points for lookup operations.
//!
//! - `run_lookup`: validate input, fetch, map and optionally export one term
//! - `export`: CSV export of lookup results

pub mod export;
pub mod lookup;

pub use export::{ExportSummary, ExportTable, export_csv, rows_for_export, to_csv_bytes};
pub use lookup::{LookupOptions, run_lookup};
