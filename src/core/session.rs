//! Presentation state: form values per material, the last computed report
//! and a one-line status, mirroring what the interactive form keeps.

use crate::config;
use crate::core::calculator::Calculator;
use crate::error::{YardError, YardResult};
use crate::excel::ReportExporter;
use crate::types::{CoefficientRange, Material, MaterialInput, ReportResult, StorageType};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Editable inputs for one material
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialForm {
    material: Material,
    pub volume_m3: f64,
    storage_type: Option<StorageType>,
    q: f64,
    kis: f64,
}

impl MaterialForm {
    pub fn new(material: Material) -> Self {
        Self {
            material,
            volume_m3: 0.0,
            storage_type: None,
            q: config::DEFAULT_Q,
            kis: config::DEFAULT_KIS,
        }
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn storage_type(&self) -> Option<StorageType> {
        self.storage_type
    }

    pub fn q(&self) -> f64 {
        self.q
    }

    pub fn kis(&self) -> f64 {
        self.kis
    }

    /// Bounds currently applied to q
    pub fn q_range(&self) -> CoefficientRange {
        self.storage_type
            .map(|t| t.q_range())
            .unwrap_or(config::Q_UNSELECTED_RANGE)
    }

    /// Select a storage preset; q is reset to the bottom of its range
    pub fn select_storage_type(&mut self, storage_type: StorageType) {
        self.storage_type = Some(storage_type);
        self.q = storage_type.q_range().min;
    }

    /// Set q, clamped into the active range. Returns the applied value.
    pub fn set_q(&mut self, q: f64) -> f64 {
        let range = self.q_range();
        let applied = range.clamp(q);
        if !range.contains(q) {
            warn!(
                material = self.material.name(),
                requested = q,
                applied,
                "q outside {range}, clamped"
            );
        }
        self.q = applied;
        applied
    }

    /// Set Kис, clamped into [0.7, 0.8]. Returns the applied value.
    pub fn set_kis(&mut self, kis: f64) -> f64 {
        let applied = config::KIS_RANGE.clamp(kis);
        if !config::KIS_RANGE.contains(kis) {
            warn!(
                material = self.material.name(),
                requested = kis,
                applied,
                "Kис outside {}, clamped",
                config::KIS_RANGE
            );
        }
        self.kis = applied;
        applied
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.material);
    }

    pub fn to_input(&self) -> MaterialInput {
        MaterialInput::new(self.material, self.volume_m3, self.q, self.kis)
    }
}

/// Status line shown after each action
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Ready,
    Calculated,
    CalculationFailed,
    Saved(PathBuf),
    SaveFailed,
    Cleared,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => f.write_str("Ready"),
            Status::Calculated => f.write_str("Calculation completed successfully"),
            Status::CalculationFailed => f.write_str("Calculation failed"),
            Status::Saved(path) => write!(f, "Results saved to {}", path.display()),
            Status::SaveFailed => f.write_str("Failed to save the file"),
            Status::Cleared => f.write_str("Fields cleared. Ready"),
        }
    }
}

/// Result of an export request
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    /// The destination picker was dismissed; nothing was written
    Cancelled,
}

/// Form state for all materials plus the most recent report
#[derive(Debug, Clone)]
pub struct Session {
    forms: [MaterialForm; 3],
    last_result: Option<ReportResult>,
    status: Status,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            forms: Material::ALL.map(MaterialForm::new),
            last_result: None,
            status: Status::Ready,
        }
    }

    pub fn forms(&self) -> &[MaterialForm] {
        &self.forms
    }

    pub fn form(&self, material: Material) -> &MaterialForm {
        &self.forms[material.index()]
    }

    pub fn form_mut(&mut self, material: Material) -> &mut MaterialForm {
        &mut self.forms[material.index()]
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Report from the last successful calculation, if any
    pub fn last_result(&self) -> Option<&ReportResult> {
        self.last_result.as_ref()
    }

    /// Snapshot of the current form values in material order
    pub fn inputs(&self) -> Vec<MaterialInput> {
        self.forms.iter().map(MaterialForm::to_input).collect()
    }

    /// Run the calculator on the current form values.
    ///
    /// On failure the previous report (if any) is kept.
    pub fn calculate(&mut self) -> YardResult<&ReportResult> {
        match Calculator::new(self.inputs()).calculate_all() {
            Ok(report) => {
                self.status = Status::Calculated;
                Ok(&*self.last_result.insert(report))
            }
            Err(e) => {
                warn!("calculation failed: {e}");
                self.status = Status::CalculationFailed;
                Err(e)
            }
        }
    }

    /// Export the last report to `destination`.
    ///
    /// `None` means the user declined to pick a destination and is not an
    /// error. Exporting before any successful calculation is.
    pub fn export(&mut self, destination: Option<&Path>) -> YardResult<ExportOutcome> {
        let Some(report) = self.last_result.as_ref() else {
            return Err(YardError::NotCalculated);
        };
        let Some(path) = destination else {
            info!("export cancelled");
            return Ok(ExportOutcome::Cancelled);
        };

        match ReportExporter::new(report).export(path) {
            Ok(()) => {
                self.status = Status::Saved(path.to_path_buf());
                Ok(ExportOutcome::Saved(path.to_path_buf()))
            }
            Err(e) => {
                warn!("export to {} failed: {e}", path.display());
                self.status = Status::SaveFailed;
                Err(e)
            }
        }
    }

    /// Reset every form to its defaults. The last report stays available.
    pub fn clear(&mut self) {
        for form in &mut self.forms {
            form.reset();
        }
        self.status = Status::Cleared;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn filled_session() -> Session {
        let mut session = Session::new();
        for (material, volume) in [
            (Material::AggregateA, 100.0),
            (Material::AggregateB, 50.0),
            (Material::Sand, 200.0),
        ] {
            session.form_mut(material).volume_m3 = volume;
        }
        session
    }

    #[test]
    fn test_form_defaults() {
        let form = MaterialForm::new(Material::Sand);
        assert_eq!(form.volume_m3, 0.0);
        assert_eq!(form.storage_type(), None);
        assert_eq!(form.q(), 3.0);
        assert_eq!(form.kis(), 0.7);
        assert_eq!(form.q_range(), config::Q_UNSELECTED_RANGE);
    }

    #[test]
    fn test_select_open_yard_sets_q_range_and_min() {
        let mut form = MaterialForm::new(Material::AggregateA);
        form.set_q(6.0);
        form.select_storage_type(StorageType::OpenStackedYard);

        assert_eq!(form.q_range(), CoefficientRange::new(3.0, 4.0));
        assert_eq!(form.q(), 3.0);
    }

    #[test]
    fn test_set_q_is_clamped_to_preset() {
        let mut form = MaterialForm::new(Material::AggregateA);
        form.select_storage_type(StorageType::OtherYard);
        assert_eq!(form.q(), 5.0);
        assert_eq!(form.set_q(9.0), 7.0);
        assert_eq!(form.set_q(6.5), 6.5);
    }

    #[test]
    fn test_form_material_matches_slot() {
        let session = Session::new();
        for material in Material::ALL {
            assert_eq!(session.form(material).material(), material);
        }
        let order: Vec<Material> = session.inputs().iter().map(|i| i.material).collect();
        assert_eq!(order, Material::ALL.to_vec());
    }

    #[test]
    fn test_set_kis_is_clamped() {
        let mut form = MaterialForm::new(Material::AggregateB);
        assert_eq!(form.set_kis(0.95), 0.8);
        assert_eq!(form.set_kis(0.75), 0.75);
    }

    #[test]
    fn test_calculate_stores_last_result() {
        let mut session = filled_session();
        assert!(session.last_result().is_none());

        let total = session.calculate().unwrap().total_area_m2;
        assert_eq!(session.status(), &Status::Calculated);
        assert_eq!(session.last_result().map(|r| r.total_area_m2), Some(total));
    }

    #[test]
    fn test_failed_calculation_keeps_previous_result() {
        let mut session = filled_session();
        session.calculate().unwrap();
        session.form_mut(Material::Sand).volume_m3 = 0.0;

        let err = session.calculate().unwrap_err();
        assert_eq!(err.material(), Some("Sand"));
        assert_eq!(session.status(), &Status::CalculationFailed);
        assert!(session.last_result().is_some());
    }

    #[test]
    fn test_export_requires_calculation() {
        let mut session = filled_session();
        let dir = TempDir::new().unwrap();
        let result = session.export(Some(&dir.path().join("r.xlsx")));
        assert!(matches!(result, Err(YardError::NotCalculated)));
    }

    #[test]
    fn test_export_cancelled_is_noop() {
        let mut session = filled_session();
        session.calculate().unwrap();

        let outcome = session.export(None).unwrap();
        assert_eq!(outcome, ExportOutcome::Cancelled);
        assert_eq!(session.status(), &Status::Calculated);
    }

    #[test]
    fn test_export_writes_file() {
        let mut session = filled_session();
        session.calculate().unwrap();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.xlsx");

        let outcome = session.export(Some(&path)).unwrap();
        assert_eq!(outcome, ExportOutcome::Saved(path.clone()));
        assert!(path.exists());
        assert_eq!(session.status(), &Status::Saved(path));
    }

    #[test]
    fn test_failed_export_keeps_result_for_retry() {
        let mut session = filled_session();
        session.calculate().unwrap();
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("missing").join("report.xlsx");

        assert!(session.export(Some(&bad)).is_err());
        assert_eq!(session.status(), &Status::SaveFailed);
        assert!(session.last_result().is_some());
    }

    #[test]
    fn test_clear_resets_forms() {
        let mut session = filled_session();
        session
            .form_mut(Material::AggregateA)
            .select_storage_type(StorageType::OtherYard);
        session.clear();

        for form in session.forms() {
            assert_eq!(form, &MaterialForm::new(form.material()));
        }
        assert_eq!(session.status(), &Status::Cleared);
    }
}
