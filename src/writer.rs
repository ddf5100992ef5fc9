use crate::config;
use crate::error::{YardError, YardResult};
use crate::parser::{InputFile, MaterialEntry};
use crate::types::{Material, StorageType};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Starter input file: every material, default coefficients, volume to fill in
pub fn template_inputs() -> InputFile {
    InputFile {
        materials: Material::ALL
            .into_iter()
            .map(|material| MaterialEntry {
                material,
                volume: 0.0,
                storage_type: Some(StorageType::OpenStackedYard),
                q: Some(config::OPEN_YARD_Q_RANGE.min),
                kis: Some(config::DEFAULT_KIS),
            })
            .collect(),
    }
}

/// Write the template to `path`. Existing files are never overwritten.
pub fn write_template(path: &Path) -> YardResult<()> {
    let yaml = serde_yaml::to_string(&template_inputs())?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                YardError::Io(std::io::Error::new(
                    e.kind(),
                    format!("{} already exists", path.display()),
                ))
            } else {
                YardError::Io(e)
            }
        })?;
    file.write_all(yaml.as_bytes())?;
    Ok(())
}
