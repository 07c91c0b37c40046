//! # bpsense
//!
//! Blood pressure prediction from vitals, a summary of recorded pressures and
//! four comorbidity flags.
//!
//! This crate provides:
//! - A fixed-schema mapping from a patient observation to the model input row
//! - Systolic and diastolic estimates from two pre-trained regression models
//! - A terminal form for data entry and a bar chart of the result
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (PatientObservation, FeatureRecord, BloodPressurePrediction)
//! - `ports`: Trait definitions for the models and the chart exporter
//! - `adapters`: Concrete implementations (JSON linear pipelines, SVG chart, log redaction)
//! - `application`: The prediction use case
//! - `tui`: Terminal user interface

use std::sync::Arc;

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::AppConfig;
pub use domain::{BloodPressurePrediction, PatientObservation, YesNo};

use adapters::linear::{self, LinearPipelineModel};
use application::ModelPair;

/// Result type for bpsense operations
pub type Result<T> = std::result::Result<T, BpError>;

/// Main error type for bpsense
#[derive(Debug, thiserror::Error)]
pub enum BpError {
    #[error("Model error: {0}")]
    Model(#[from] ports::ModelError),

    #[error("Chart export failed: {0}")]
    Chart(#[from] ports::ChartError),

    #[error("Invalid observation: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Load both model artifacts named by `config`.
///
/// This is the one-time startup step; the returned handles are passed to
/// [`application::PredictionService::new`].
///
/// # Errors
/// Returns `BpError::Config` if the model directory does not exist, or
/// `BpError::Model` if either artifact fails to load.
pub fn load_model_pair(config: &AppConfig) -> Result<ModelPair<LinearPipelineModel>> {
    if !config.model_dir.is_dir() {
        return Err(BpError::Config(format!(
            "model directory {:?} not found; set BPSENSE_MODEL_DIR",
            config.model_dir
        )));
    }

    let (systolic, diastolic) = linear::load_pair(
        &config.systolic_path(),
        &config.diastolic_path(),
        config.require_manifest,
    )?;

    Ok(ModelPair::new(Arc::new(systolic), Arc::new(diastolic)))
}
