//! HomeLord deal analysis: fact-sheet resolution, the underwriting engine, and the
//! report renderer, plus the configuration and telemetry shared by the service binary.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod underwriting;
