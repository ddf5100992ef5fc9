//! Fixed presets and defaults, read-only for the lifetime of the process

use crate::types::CoefficientRange;
use chrono::NaiveDateTime;

/// q range for the "Open stacked yard" preset (m³/m²)
pub const OPEN_YARD_Q_RANGE: CoefficientRange = CoefficientRange::new(3.0, 4.0);

/// Stack height for the "Open stacked yard" preset (m)
pub const OPEN_YARD_HEIGHT_RANGE: CoefficientRange = CoefficientRange::new(5.0, 6.0);

/// q range for "Other yard types" (m³/m²)
pub const OTHER_YARD_Q_RANGE: CoefficientRange = CoefficientRange::new(5.0, 7.0);

/// q bounds before any storage type is selected
pub const Q_UNSELECTED_RANGE: CoefficientRange = CoefficientRange::new(3.0, 7.0);

pub const DEFAULT_Q: f64 = 3.0;

/// Kис does not depend on the storage type
pub const KIS_RANGE: CoefficientRange = CoefficientRange::new(0.7, 0.8);

pub const DEFAULT_KIS: f64 = 0.7;

pub const WORKSHEET_NAME: &str = "Calculation Results";

pub const REPORT_HEADERS: [&str; 5] = ["Material", "Volume (m³)", "q (m³/m²)", "Kис", "Area (m²)"];

pub const TOTAL_LABEL: &str = "TOTAL";

/// Suggested export file name, e.g. `Report_2025-01-31_14-05-09.xlsx`
pub fn default_report_filename(now: NaiveDateTime) -> String {
    format!("Report_{}.xlsx", now.format("%Y-%m-%d_%H-%M-%S"))
}
