//! Excel exporter implementation

use crate::config::{REPORT_HEADERS, TOTAL_LABEL, WORKSHEET_NAME};
use crate::error::{YardError, YardResult};
use crate::types::{MaterialResult, ReportResult};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const COLUMN_COUNT: usize = REPORT_HEADERS.len();

/// Writes a calculation report to an .xlsx workbook
pub struct ReportExporter<'a> {
    report: &'a ReportResult,
}

impl<'a> ReportExporter<'a> {
    pub fn new(report: &'a ReportResult) -> Self {
        Self { report }
    }

    /// Zero-based worksheet row holding the totals. One blank row separates
    /// it from the last material.
    pub fn total_row(&self) -> u32 {
        (self.report.results.len() + 2) as u32
    }

    /// Export the report to `output_path`.
    ///
    /// The workbook is serialized in memory, written next to the destination
    /// and renamed over it, so a failed export never leaves a truncated file
    /// at `output_path`.
    pub fn export(&self, output_path: &Path) -> YardResult<()> {
        let mut workbook = Workbook::new();
        self.write_sheet(workbook.add_worksheet())?;

        let buffer = workbook
            .save_to_buffer()
            .map_err(|e| YardError::Export(format!("Failed to build Excel file: {}", e)))?;

        let temp_path = temp_path_for(output_path)?;
        if let Err(e) = fs::write(&temp_path, &buffer).and_then(|_| fs::rename(&temp_path, output_path)) {
            let _ = fs::remove_file(&temp_path);
            return Err(YardError::Io(e));
        }

        info!(
            path = %output_path.display(),
            materials = self.report.results.len(),
            "report exported"
        );
        Ok(())
    }

    fn write_sheet(&self, worksheet: &mut Worksheet) -> YardResult<()> {
        worksheet
            .set_name(WORKSHEET_NAME)
            .map_err(|e| YardError::Export(format!("Failed to set worksheet name: {}", e)))?;

        let bold = Format::new().set_bold();
        let two_decimals = Format::new().set_num_format("0.00");
        let one_decimal = Format::new().set_num_format("0.0");
        let bold_two_decimals = Format::new().set_bold().set_num_format("0.00");

        // Header row
        for (col, header) in REPORT_HEADERS.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *header, &bold)
                .map_err(|e| YardError::Export(format!("Failed to write header: {}", e)))?;
        }

        // One row per material
        for (idx, result) in self.report.results.iter().enumerate() {
            let row = (idx + 1) as u32;
            worksheet
                .write_string(row, 0, result.material.name())
                .map_err(|e| YardError::Export(format!("Failed to write material: {}", e)))?;

            let numbers = [
                (result.volume_m3, &two_decimals),
                (result.q_coefficient, &one_decimal),
                (result.kis_coefficient, &two_decimals),
                (result.area_m2, &two_decimals),
            ];
            for (offset, (value, format)) in numbers.into_iter().enumerate() {
                worksheet
                    .write_number_with_format(row, (offset + 1) as u16, value, format)
                    .map_err(|e| YardError::Export(format!("Failed to write number: {}", e)))?;
            }
        }

        // Totals row
        let total_row = self.total_row();
        worksheet
            .write_string_with_format(total_row, 0, TOTAL_LABEL, &bold)
            .map_err(|e| YardError::Export(format!("Failed to write totals label: {}", e)))?;
        worksheet
            .write_number_with_format(
                total_row,
                (COLUMN_COUNT - 1) as u16,
                self.report.total_area_m2,
                &bold_two_decimals,
            )
            .map_err(|e| YardError::Export(format!("Failed to write total area: {}", e)))?;

        for (col, width) in column_widths(self.report).into_iter().enumerate() {
            worksheet
                .set_column_width(col as u16, width)
                .map_err(|e| YardError::Export(format!("Failed to set column width: {}", e)))?;
        }

        Ok(())
    }
}

fn row_cells(result: &MaterialResult) -> [String; COLUMN_COUNT] {
    [
        result.material.name().to_string(),
        result.volume_m3.to_string(),
        result.q_coefficient.to_string(),
        result.kis_coefficient.to_string(),
        result.area_m2.to_string(),
    ]
}

/// Column widths sized to the longest stringified value: (len + 2) * 1.2
pub fn column_widths(report: &ReportResult) -> [f64; COLUMN_COUNT] {
    let mut longest = REPORT_HEADERS.map(|h| h.chars().count());

    for result in &report.results {
        for (col, cell) in row_cells(result).iter().enumerate() {
            longest[col] = longest[col].max(cell.chars().count());
        }
    }
    longest[0] = longest[0].max(TOTAL_LABEL.chars().count());
    longest[COLUMN_COUNT - 1] =
        longest[COLUMN_COUNT - 1].max(report.total_area_m2.to_string().chars().count());

    longest.map(|len| (len + 2) as f64 * 1.2)
}

/// Hidden sibling of `path` used while writing
fn temp_path_for(path: &Path) -> YardResult<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        YardError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("'{}' is not a file path", path.display()),
        ))
    })?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}
