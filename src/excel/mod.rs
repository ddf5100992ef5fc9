//! Excel report module
//!
//! - Export: ReportResult → Excel (.xlsx) with bold header and totals rows
//! - Import: exported workbook → ReportResult (round-trip check, `yard show`)

mod exporter;
mod importer;

pub use exporter::{column_widths, ReportExporter};
pub use importer::ReportImporter;
