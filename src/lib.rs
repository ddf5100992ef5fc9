//! Yard - storage-yard area calculator for aggregates
//!
//! Computes the yard area needed for each stored material with
//! S = V / (q · Kис), sums the areas, and exports the report to Excel.
//!
//! # Features
//!
//! - Fixed material set (Aggregate A, Aggregate B, Sand)
//! - Storage-type presets bounding the q coefficient
//! - Session state mirroring the input form (clear, last result, status)
//! - Excel export with bold header and totals rows, and read-back
//!
//! # Example
//!
//! ```no_run
//! use yard_area::core::Session;
//! use yard_area::types::{Material, StorageType};
//! use std::path::Path;
//!
//! let mut session = Session::new();
//! for material in Material::ALL {
//!     let form = session.form_mut(material);
//!     form.volume_m3 = 100.0;
//!     form.select_storage_type(StorageType::OpenStackedYard);
//! }
//!
//! let report = session.calculate()?;
//! println!("Total area: {:.2} m²", report.total_area_m2);
//!
//! session.export(Some(Path::new("report.xlsx")))?;
//! # Ok::<(), yard_area::error::YardError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod parser;
pub mod report;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{YardError, YardResult};
pub use types::{Material, MaterialInput, MaterialResult, ReportResult, StorageType};
