//! CLI command handlers

pub mod commands;

pub use commands::{calculate, export, init, presets, show};
