use crate::error::{YardError, YardResult};
use crate::types::{MaterialInput, MaterialResult, ReportResult};
use tracing::debug;

/// Yard area for one material: S = V / (q · Kис)
#[must_use]
pub fn area(volume_m3: f64, q_coefficient: f64, kis_coefficient: f64) -> f64 {
    volume_m3 / (q_coefficient * kis_coefficient)
}

/// Area calculator over the per-material inputs of one submission
pub struct Calculator {
    inputs: Vec<MaterialInput>,
}

impl Calculator {
    #[must_use]
    pub fn new(inputs: Vec<MaterialInput>) -> Self {
        Self { inputs }
    }

    /// Compute every area and the total.
    ///
    /// All inputs are checked before any area is computed, so an invalid
    /// volume yields an error and no partial report.
    pub fn calculate_all(&self) -> YardResult<ReportResult> {
        compute(&self.inputs)
    }
}

/// Compute areas in input order and sum them in the same order.
///
/// Fails with [`YardError::InvalidInput`] naming the first material whose
/// volume is not a finite, strictly positive number.
pub fn compute(inputs: &[MaterialInput]) -> YardResult<ReportResult> {
    if let Some(bad) = inputs
        .iter()
        .find(|input| !(input.volume_m3 > 0.0 && input.volume_m3.is_finite()))
    {
        return Err(YardError::InvalidInput {
            material: bad.material.name().to_string(),
        });
    }

    let mut results = Vec::with_capacity(inputs.len());
    let mut total_area_m2 = 0.0;

    for input in inputs {
        let area_m2 = area(input.volume_m3, input.q_coefficient, input.kis_coefficient);
        debug!(
            material = input.material.name(),
            volume = input.volume_m3,
            q = input.q_coefficient,
            kis = input.kis_coefficient,
            area = area_m2,
            "computed yard area"
        );
        total_area_m2 += area_m2;
        results.push(MaterialResult {
            material: input.material,
            volume_m3: input.volume_m3,
            q_coefficient: input.q_coefficient,
            kis_coefficient: input.kis_coefficient,
            area_m2,
        });
    }

    Ok(ReportResult {
        results,
        total_area_m2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Material;

    fn sample_inputs() -> Vec<MaterialInput> {
        vec![
            MaterialInput::new(Material::AggregateA, 100.0, 3.0, 0.7),
            MaterialInput::new(Material::AggregateB, 50.0, 5.0, 0.75),
            MaterialInput::new(Material::Sand, 200.0, 4.0, 0.8),
        ]
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_reference_scenario() {
        let report = compute(&sample_inputs()).unwrap();

        assert_eq!(report.results.len(), 3);
        assert_close(report.results[0].area_m2, 100.0 / 2.1);
        assert_close(report.results[1].area_m2, 50.0 / 3.75);
        assert_close(report.results[2].area_m2, 62.5);
        assert_eq!(format!("{:.2}", report.results[0].area_m2), "47.62");
        assert_eq!(format!("{:.2}", report.results[1].area_m2), "13.33");
        assert_eq!(format!("{:.2}", report.total_area_m2), "123.45");
    }

    #[test]
    fn test_total_is_sum_of_areas() {
        let report = compute(&sample_inputs()).unwrap();
        let sum: f64 = report.results.iter().map(|r| r.area_m2).sum();
        assert_close(report.total_area_m2, sum);
    }

    #[test]
    fn test_results_keep_input_order() {
        let report = compute(&sample_inputs()).unwrap();
        let order: Vec<Material> = report.results.iter().map(|r| r.material).collect();
        assert_eq!(order, Material::ALL.to_vec());
    }

    #[test]
    fn test_zero_volume_fails_naming_material() {
        let mut inputs = sample_inputs();
        inputs[0].volume_m3 = 0.0;

        let err = compute(&inputs).unwrap_err();
        assert_eq!(err.material(), Some("Aggregate A"));
        assert!(err.to_string().contains("Aggregate A"));
    }

    #[test]
    fn test_first_offending_material_is_named() {
        let mut inputs = sample_inputs();
        inputs[1].volume_m3 = -5.0;
        inputs[2].volume_m3 = 0.0;

        let err = compute(&inputs).unwrap_err();
        assert_eq!(err.material(), Some("Aggregate B"));
    }

    #[test]
    fn test_nan_volume_is_rejected() {
        let mut inputs = sample_inputs();
        inputs[2].volume_m3 = f64::NAN;
        assert!(matches!(
            compute(&inputs),
            Err(YardError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_infinite_volume_is_rejected() {
        let mut inputs = sample_inputs();
        inputs[2].volume_m3 = f64::INFINITY;

        let err = compute(&inputs).unwrap_err();
        assert_eq!(err.material(), Some("Sand"));
    }

    #[test]
    fn test_compute_is_idempotent() {
        let calculator = Calculator::new(sample_inputs());
        let first = calculator.calculate_all().unwrap();
        let second = calculator.calculate_all().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_area_formula() {
        assert_close(area(10.0, 2.0, 0.5), 10.0);
    }
}
