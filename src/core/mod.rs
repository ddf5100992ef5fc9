//! Core area calculation and presentation state

pub mod calculator;
pub mod session;

pub use calculator::{area, compute, Calculator};
pub use session::{ExportOutcome, MaterialForm, Session, Status};
