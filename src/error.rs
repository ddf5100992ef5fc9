use thiserror::Error;

pub type YardResult<T> = Result<T, YardError>;

#[derive(Error, Debug)]
pub enum YardError {
    #[error("Volume for {material} must be a positive number")]
    InvalidInput { material: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("No calculation has been run yet; calculate before exporting")]
    NotCalculated,
}

impl YardError {
    /// Material named by an `InvalidInput` error
    pub fn material(&self) -> Option<&str> {
        match self {
            YardError::InvalidInput { material } => Some(material),
            _ => None,
        }
    }
}
