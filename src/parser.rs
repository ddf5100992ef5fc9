use crate::core::Session;
use crate::error::{YardError, YardResult};
use crate::types::{Material, StorageType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Per-run inputs, as read from a YAML file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputFile {
    #[serde(default)]
    pub materials: Vec<MaterialEntry>,
}

/// Form values for one material. Omitted fields keep the form defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialEntry {
    pub material: Material,
    #[serde(default)]
    pub volume: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<StorageType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kis: Option<f64>,
}

impl InputFile {
    /// Fill the session forms, in the same order a user would: volume,
    /// storage type (resets q), then the q and Kис sliders.
    pub fn apply_to(&self, session: &mut Session) -> YardResult<()> {
        let mut seen = HashSet::new();
        for entry in &self.materials {
            if !seen.insert(entry.material) {
                return Err(YardError::Parse(format!(
                    "Material '{}' is listed more than once",
                    entry.material
                )));
            }

            let form = session.form_mut(entry.material);
            form.volume_m3 = entry.volume;
            if let Some(storage_type) = entry.storage_type {
                form.select_storage_type(storage_type);
            }
            if let Some(q) = entry.q {
                form.set_q(q);
            }
            if let Some(kis) = entry.kis {
                form.set_kis(kis);
            }
        }

        for material in Material::ALL {
            if !seen.contains(&material) {
                debug!(material = material.name(), "not in input file, using defaults");
            }
        }
        Ok(())
    }

    /// Build a fresh session from these inputs
    pub fn to_session(&self) -> YardResult<Session> {
        let mut session = Session::new();
        self.apply_to(&mut session)?;
        Ok(session)
    }
}

/// Parse an input file from YAML text
pub fn parse_inputs_str(content: &str) -> YardResult<InputFile> {
    let inputs: InputFile = serde_yaml::from_str(content)?;
    Ok(inputs)
}

/// Parse an input file from disk
pub fn parse_inputs(path: &Path) -> YardResult<InputFile> {
    let content = std::fs::read_to_string(path)?;
    let inputs = parse_inputs_str(&content)?;
    debug!(
        path = %path.display(),
        materials = inputs.materials.len(),
        "parsed input file"
    );
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
materials:
  - material: Aggregate A
    volume: 100
    storage_type: Open stacked yard
  - material: Aggregate B
    volume: 50
    storage_type: Other yard types
    kis: 0.75
  - material: Sand
    volume: 200
    q: 4
    kis: 0.8
"#;

    #[test]
    fn test_parse_sample() {
        let inputs = parse_inputs_str(SAMPLE).unwrap();
        assert_eq!(inputs.materials.len(), 3);
        assert_eq!(inputs.materials[0].material, Material::AggregateA);
        assert_eq!(
            inputs.materials[1].storage_type,
            Some(StorageType::OtherYard)
        );
        assert_eq!(inputs.materials[2].q, Some(4.0));
    }

    #[test]
    fn test_apply_sets_forms() {
        let session = parse_inputs_str(SAMPLE).unwrap().to_session().unwrap();

        let a = session.form(Material::AggregateA);
        assert_eq!(a.volume_m3, 100.0);
        assert_eq!(a.q(), 3.0);
        assert_eq!(a.kis(), 0.7);

        let b = session.form(Material::AggregateB);
        assert_eq!(b.q(), 5.0);
        assert_eq!(b.kis(), 0.75);

        let sand = session.form(Material::Sand);
        assert_eq!(sand.q(), 4.0);
        assert_eq!(sand.kis(), 0.8);
    }

    #[test]
    fn test_out_of_range_q_is_clamped() {
        let yaml = r#"
materials:
  - material: Sand
    volume: 10
    storage_type: Open stacked yard
    q: 6
"#;
        let session = parse_inputs_str(yaml).unwrap().to_session().unwrap();
        assert_eq!(session.form(Material::Sand).q(), 4.0);
    }

    #[test]
    fn test_missing_material_keeps_defaults() {
        let yaml = "materials:\n  - material: Sand\n    volume: 10\n";
        let session = parse_inputs_str(yaml).unwrap().to_session().unwrap();
        assert_eq!(session.form(Material::AggregateA).volume_m3, 0.0);
    }

    #[test]
    fn test_duplicate_material_rejected() {
        let yaml = r#"
materials:
  - material: Sand
    volume: 10
  - material: Sand
    volume: 20
"#;
        let err = parse_inputs_str(yaml).unwrap().to_session().unwrap_err();
        assert!(matches!(err, YardError::Parse(_)));
    }

    #[test]
    fn test_unknown_material_rejected() {
        let yaml = "materials:\n  - material: Gravel\n    volume: 10\n";
        assert!(matches!(
            parse_inputs_str(yaml),
            Err(YardError::Yaml(_))
        ));
    }

    #[test]
    fn test_unknown_storage_type_rejected() {
        let yaml = "materials:\n  - material: Sand\n    volume: 10\n    storage_type: Silo\n";
        assert!(parse_inputs_str(yaml).is_err());
    }
}
