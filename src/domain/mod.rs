//! Domain layer: Core types for blood pressure prediction.
//!
//! These types have no dependencies on external libraries (except serde/chrono).

mod observation;
mod prediction;

pub use observation::{FeatureRecord, PatientObservation, YesNo, FEATURE_SCHEMA, INPUT_BOUNDS};
pub use prediction::{BloodPressurePrediction, BpCategory};
