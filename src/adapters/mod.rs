//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external formats:
//! - `linear`: JSON linear-pipeline model artifacts
//! - `manifest`: SHA-256 manifest for model directories
//! - `chart`: SVG bar chart export
//! - `sanitize`: PII filtering for logs

pub mod chart;
pub mod linear;
pub mod manifest;
pub mod sanitize;
