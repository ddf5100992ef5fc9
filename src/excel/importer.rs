//! Excel importer implementation - exported report (.xlsx) → ReportResult

use crate::config::{REPORT_HEADERS, TOTAL_LABEL, WORKSHEET_NAME};
use crate::error::{YardError, YardResult};
use crate::types::{Material, MaterialResult, ReportResult};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::{Path, PathBuf};
use tracing::info;

/// Reads a workbook written by `ReportExporter` back into a report
pub struct ReportImporter {
    path: PathBuf,
}

impl ReportImporter {
    /// Create a new report importer
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Import the results worksheet
    pub fn import(&self) -> YardResult<ReportResult> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path)
            .map_err(|e| YardError::Import(format!("Failed to open Excel file: {}", e)))?;

        let range = workbook.worksheet_range(WORKSHEET_NAME).map_err(|e| {
            YardError::Import(format!("Missing worksheet '{}': {}", WORKSHEET_NAME, e))
        })?;

        let report = parse_range(&range)?;
        info!(
            path = %self.path.display(),
            materials = report.results.len(),
            "report imported"
        );
        Ok(report)
    }
}

fn cell_text(range: &Range<Data>, row: usize, col: usize) -> Option<&str> {
    match range.get((row, col)) {
        Some(Data::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

fn cell_number(range: &Range<Data>, row: usize, col: usize) -> YardResult<f64> {
    match range.get((row, col)) {
        Some(Data::Float(f)) => Ok(*f),
        Some(Data::Int(i)) => Ok(*i as f64),
        other => Err(YardError::Import(format!(
            "Expected a number at row {}, column {}, found {:?}",
            row + 1,
            col + 1,
            other
        ))),
    }
}

fn is_blank_row(range: &Range<Data>, row: usize, width: usize) -> bool {
    (0..width).all(|col| matches!(range.get((row, col)), None | Some(Data::Empty)))
}

fn parse_range(range: &Range<Data>) -> YardResult<ReportResult> {
    let (height, width) = range.get_size();

    if height == 0 || cell_text(range, 0, 0) != Some(REPORT_HEADERS[0]) {
        return Err(YardError::Import(format!(
            "Worksheet does not start with a '{}' header",
            REPORT_HEADERS[0]
        )));
    }

    let mut results = Vec::new();
    let mut total_area_m2 = None;

    for row in 1..height {
        if is_blank_row(range, row, width) {
            continue;
        }

        let label = cell_text(range, row, 0).ok_or_else(|| {
            YardError::Import(format!("Missing material name at row {}", row + 1))
        })?;

        if label == TOTAL_LABEL {
            total_area_m2 = Some(cell_number(range, row, REPORT_HEADERS.len() - 1)?);
            break;
        }

        let material: Material = label
            .parse()
            .map_err(|e: YardError| YardError::Import(e.to_string()))?;
        results.push(MaterialResult {
            material,
            volume_m3: cell_number(range, row, 1)?,
            q_coefficient: cell_number(range, row, 2)?,
            kis_coefficient: cell_number(range, row, 3)?,
            area_m2: cell_number(range, row, 4)?,
        });
    }

    let total_area_m2 = total_area_m2
        .ok_or_else(|| YardError::Import(format!("No '{}' row found", TOTAL_LABEL)))?;

    Ok(ReportResult {
        results,
        total_area_m2,
    })
}
