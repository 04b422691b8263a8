//! Export module for the finance tracker
//!
//! - CSV: one row per transaction (spreadsheet-compatible), readable back
//! - JSON: machine-readable full ledger export
//! - YAML: human-readable full ledger export

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_csv, read_csv, read_csv_file, write_csv, CSV_HEADER};
pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};
