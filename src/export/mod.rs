//! Export module for propledger
//!
//! - CSV: filtered entries in a fixed, spreadsheet-friendly column layout
//! - Receipts: template-rendered text per entry
//! - JSON / YAML: full backups of entries and settings

pub mod csv;
pub mod json;
pub mod template;
pub mod yaml;

pub use csv::{entry_record, export_entries_csv, CSV_COLUMNS};
pub use json::{export_full_json, import_from_json, restore, FullExport, EXPORT_SCHEMA_VERSION};
pub use template::{render_receipt, render_template, sanitize_filename, Receipt};
pub use yaml::{export_full_yaml, import_from_yaml};
