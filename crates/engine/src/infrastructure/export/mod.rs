//! Bulk character export/import.

mod json_exporter;

pub use json_exporter::{export_characters, import_characters, ExportError};
