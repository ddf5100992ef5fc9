//! Human-readable rendering of a calculation report

use crate::types::{MaterialResult, ReportResult};
use std::fmt::Write;

pub const REPORT_TITLE: &str = "CALCULATION RESULTS (S = V / (q·Kис)):";

/// Block for one material; volume and area to 2 decimals, q to 1, Kис to 2
pub fn format_material(result: &MaterialResult) -> String {
    format!(
        "{}:\n - Yard volume (V): {:.2} m³\n - Quantity per 1 m² (q): {:.1} m³/m²\n - Utilization coefficient (Kис): {:.2}\n - Calculated area: {:.2} m²\n",
        result.material.name(),
        result.volume_m3,
        result.q_coefficient,
        result.kis_coefficient,
        result.area_m2,
    )
}

/// Full multi-line text block: title, one block per material, total line
pub fn format_report(report: &ReportResult) -> String {
    let mut out = String::new();
    out.push_str(REPORT_TITLE);
    out.push_str("\n\n");
    for result in &report.results {
        out.push_str(&format_material(result));
        out.push('\n');
    }
    let _ = write!(out, "TOTAL YARD AREA: {:.2} m²", report.total_area_m2);
    out
}
