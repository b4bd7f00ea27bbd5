mod export_service;

pub use export_service::{csv_escape, ExportService};
