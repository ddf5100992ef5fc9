use crate::config;
use crate::error::{YardError, YardResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//==============================================================================
// Materials
//==============================================================================

/// Materials stored on the yard. The set is closed; `Material::ALL` is the
/// order used for calculation, display and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    #[serde(rename = "Aggregate A")]
    AggregateA,
    #[serde(rename = "Aggregate B")]
    AggregateB,
    #[serde(rename = "Sand")]
    Sand,
}

impl Material {
    pub const ALL: [Material; 3] = [Material::AggregateA, Material::AggregateB, Material::Sand];

    /// Display name, as written in reports and input files
    pub fn name(&self) -> &'static str {
        match self {
            Material::AggregateA => "Aggregate A",
            Material::AggregateB => "Aggregate B",
            Material::Sand => "Sand",
        }
    }

    /// Position in `Material::ALL`
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Material {
    type Err = YardError;

    fn from_str(s: &str) -> YardResult<Self> {
        let wanted = s.trim();
        Material::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                YardError::Parse(format!(
                    "Unknown material '{}'. Expected one of: {}",
                    wanted,
                    Material::ALL.map(|m| m.name()).join(", ")
                ))
            })
    }
}

//==============================================================================
// Storage presets
//==============================================================================

/// Closed interval used for the q and Kис coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientRange {
    pub min: f64,
    pub max: f64,
}

impl CoefficientRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Pull a value into the interval (NaN lands on `min`)
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }
}

impl fmt::Display for CoefficientRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.min, self.max)
    }
}

/// Storage-type presets. Each one bounds the q coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageType {
    #[serde(rename = "Open stacked yard")]
    OpenStackedYard,
    #[serde(rename = "Other yard types")]
    OtherYard,
}

impl StorageType {
    pub const ALL: [StorageType; 2] = [StorageType::OpenStackedYard, StorageType::OtherYard];

    pub fn label(&self) -> &'static str {
        match self {
            StorageType::OpenStackedYard => "Open stacked yard",
            StorageType::OtherYard => "Other yard types",
        }
    }

    /// Allowed q range (m³ per m²)
    pub fn q_range(&self) -> CoefficientRange {
        match self {
            StorageType::OpenStackedYard => config::OPEN_YARD_Q_RANGE,
            StorageType::OtherYard => config::OTHER_YARD_Q_RANGE,
        }
    }

    /// Stack height range in metres, where the preset defines one
    pub fn height_range(&self) -> Option<CoefficientRange> {
        match self {
            StorageType::OpenStackedYard => Some(config::OPEN_YARD_HEIGHT_RANGE),
            StorageType::OtherYard => None,
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StorageType {
    type Err = YardError;

    fn from_str(s: &str) -> YardResult<Self> {
        let wanted = s.trim();
        StorageType::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                YardError::Parse(format!(
                    "Unknown storage type '{}'. Expected one of: {}",
                    wanted,
                    StorageType::ALL.map(|t| t.label()).join(", ")
                ))
            })
    }
}

//==============================================================================
// Calculation records
//==============================================================================

/// Inputs for one material, built fresh at calculation time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialInput {
    pub material: Material,
    pub volume_m3: f64,
    pub q_coefficient: f64,
    pub kis_coefficient: f64,
}

impl MaterialInput {
    pub fn new(material: Material, volume_m3: f64, q_coefficient: f64, kis_coefficient: f64) -> Self {
        Self {
            material,
            volume_m3,
            q_coefficient,
            kis_coefficient,
        }
    }
}

/// Computed area for one material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialResult {
    pub material: Material,
    pub volume_m3: f64,
    pub q_coefficient: f64,
    pub kis_coefficient: f64,
    pub area_m2: f64,
}

/// Output of one calculation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResult {
    pub results: Vec<MaterialResult>,
    pub total_area_m2: f64,
}
