//! Linear pipeline adapter: Implementation of RegressionModel from JSON artifacts.
//!
//! The training pipeline exports a standard-scaler + linear-regression pair as
//! JSON. Prediction for a row `x` is
//!
//! ```text
//! intercept + sum_i coefficients[i] * (x[i] - scaler_mean[i]) / scaler_scale[i]
//! ```
//!
//! with a zero scale treated as 1 (constant training column).
//!
//! # Integrity
//!
//! When the model directory carries a `manifest.json`, each artifact must be
//! listed there with a matching SHA-256 digest before it is parsed. Without a
//! manifest the artifact is loaded with a warning, unless the caller requires one.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::adapters::manifest::ArtifactManifest;
use crate::domain::FeatureRecord;
use crate::ports::{check_schema, ModelError, RegressionModel};

/// Model parameters as exported by the training pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedLinearPipeline {
    /// Prediction target, e.g. "systolic"
    pub target: String,
    pub feature_names: Vec<String>,
    pub scaler_mean: Vec<f64>,
    pub scaler_scale: Vec<f64>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl ExportedLinearPipeline {
    fn validate(&self) -> Result<(), ModelError> {
        let n = self.feature_names.len();
        if n == 0 {
            return Err(ModelError::InvalidArtifact(
                "feature_names must not be empty".into(),
            ));
        }
        if self.scaler_mean.len() != n
            || self.scaler_scale.len() != n
            || self.coefficients.len() != n
        {
            return Err(ModelError::InvalidArtifact(format!(
                "parameter lengths (mean={}, scale={}, coef={}) do not match {n} features",
                self.scaler_mean.len(),
                self.scaler_scale.len(),
                self.coefficients.len()
            )));
        }

        let all_finite = self
            .scaler_mean
            .iter()
            .chain(&self.scaler_scale)
            .chain(&self.coefficients)
            .chain(std::iter::once(&self.intercept))
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(ModelError::InvalidArtifact(
                "model parameters must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Standard-scaler + linear regression loaded from a JSON artifact.
#[derive(Debug, Clone)]
pub struct LinearPipelineModel {
    params: ExportedLinearPipeline,
}

impl LinearPipelineModel {
    /// Build a model from already-parsed parameters.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidArtifact` if the parameters are inconsistent.
    pub fn from_params(params: ExportedLinearPipeline) -> Result<Self, ModelError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Load a model artifact, checking it against the directory manifest if one exists.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, fails the manifest check, or is invalid.
    pub fn load(path: &Path, require_manifest: bool) -> Result<Self, ModelError> {
        let bytes = fs::read(path).map_err(|e| ModelError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ModelError::InvalidArtifact(format!("bad artifact path {path:?}")))?;

        match ArtifactManifest::read(dir)? {
            Some(manifest) => {
                manifest.verify(file_name, &bytes)?;
                tracing::debug!("Artifact {} matches manifest digest", file_name);
            }
            None if require_manifest => {
                return Err(ModelError::ManifestMissing(dir.display().to_string()));
            }
            None => {
                tracing::warn!(
                    "No manifest in {:?}; loading {} without integrity check",
                    dir,
                    file_name
                );
            }
        }

        let params: ExportedLinearPipeline =
            serde_json::from_slice(&bytes).map_err(|e| ModelError::Parse {
                path: path.display().to_string(),
                source: e,
            })?;
        let model = Self::from_params(params)?;

        tracing::info!(
            "Loaded {} model from {:?} (n_features={})",
            model.params.target,
            path,
            model.params.feature_names.len()
        );
        Ok(model)
    }

    fn predict_row(&self, row: &FeatureRecord) -> Result<f64, ModelError> {
        check_schema(&self.params.target, &self.params.feature_names, row)?;

        let p = &self.params;
        let value = row
            .values()
            .zip(p.scaler_mean.iter().zip(&p.scaler_scale))
            .zip(&p.coefficients)
            .fold(p.intercept, |acc, ((x, (mean, scale)), coef)| {
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                acc + coef * (x - mean) / scale
            });

        if value.is_finite() {
            Ok(value)
        } else {
            Err(ModelError::NonFinite(p.target.clone()))
        }
    }
}

impl RegressionModel for LinearPipelineModel {
    fn name(&self) -> &str {
        &self.params.target
    }

    fn expected_features(&self) -> &[String] {
        &self.params.feature_names
    }

    fn predict(&self, rows: &[FeatureRecord]) -> Result<Vec<f64>, ModelError> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}

/// Load the systolic and diastolic artifacts.
///
/// # Errors
/// Returns the first loading error encountered.
pub fn load_pair(
    systolic: &Path,
    diastolic: &Path,
    require_manifest: bool,
) -> Result<(LinearPipelineModel, LinearPipelineModel), ModelError> {
    let sys = LinearPipelineModel::load(systolic, require_manifest)?;
    let dia = LinearPipelineModel::load(diastolic, require_manifest)?;
    Ok((sys, dia))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PatientObservation, FEATURE_SCHEMA};

    fn params(target: &str) -> ExportedLinearPipeline {
        let n = FEATURE_SCHEMA.len();
        let mut coefficients = vec![0.0; n];
        coefficients[0] = 2.0; // age
        coefficients[5] = 4.0; // mean
        coefficients[10] = 3.0; // hypertension

        let mut scaler_scale = vec![1.0; n];
        scaler_scale[0] = 10.0;
        scaler_scale[5] = 0.0;

        ExportedLinearPipeline {
            target: target.to_string(),
            feature_names: FEATURE_SCHEMA.iter().map(|s| s.to_string()).collect(),
            scaler_mean: {
                let mut m = vec![0.0; n];
                m[0] = 40.0;
                m[5] = 120.0;
                m
            },
            scaler_scale,
            coefficients,
            intercept: 118.0,
        }
    }

    fn write_artifact(dir: &Path, name: &str, p: &ExportedLinearPipeline) {
        let bytes = serde_json::to_vec(p).expect("serialize");
        fs::write(dir.join(name), bytes).expect("write artifact");
    }

    #[test]
    fn test_linear_prediction() {
        let model = LinearPipelineModel::from_params(params("systolic")).expect("valid");
        let obs = PatientObservation {
            age: 50,
            bp_mean: 125.0,
            ..Default::default()
        };
        let out = model
            .predict(&[FeatureRecord::from_observation(&obs)])
            .expect("predict");

        // 118 + 2*(50-40)/10 + 4*(125-120)/1 + 3*1
        assert_eq!(out.len(), 1);
        assert!((out[0] - 143.0).abs() < 1e-9);
    }

    #[test]
    fn test_inconsistent_lengths_rejected() {
        let mut p = params("systolic");
        p.coefficients.pop();
        assert!(matches!(
            LinearPipelineModel::from_params(p),
            Err(ModelError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        let mut p = params("systolic");
        p.intercept = f64::INFINITY;
        assert!(LinearPipelineModel::from_params(p).is_err());
    }

    #[test]
    fn test_schema_mismatch_at_predict() {
        let mut p = params("diastolic");
        p.feature_names[12] = "stroke".to_string();
        let model = LinearPipelineModel::from_params(p).expect("valid lengths");
        let row = FeatureRecord::from_observation(&PatientObservation::default());

        assert!(matches!(
            model.predict(&[row]),
            Err(ModelError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_load_without_manifest() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_artifact(dir.path(), "systolic_model.json", &params("systolic"));

        let path = dir.path().join("systolic_model.json");
        let model = LinearPipelineModel::load(&path, false).expect("load");
        assert_eq!(model.name(), "systolic");
        assert_eq!(model.expected_features().len(), 14);

        assert!(matches!(
            LinearPipelineModel::load(&path, true),
            Err(ModelError::ManifestMissing(_))
        ));
    }

    #[test]
    fn test_load_checks_manifest() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_artifact(dir.path(), "systolic_model.json", &params("systolic"));
        write_artifact(dir.path(), "diastolic_model.json", &params("diastolic"));
        ArtifactManifest::build(dir.path(), ["systolic_model.json", "diastolic_model.json"])
            .expect("build")
            .write(dir.path())
            .expect("write");

        let (sys, dia) = load_pair(
            &dir.path().join("systolic_model.json"),
            &dir.path().join("diastolic_model.json"),
            true,
        )
        .expect("load pair");
        assert_eq!(sys.name(), "systolic");
        assert_eq!(dia.name(), "diastolic");

        // Tamper after hashing.
        let mut changed = params("diastolic");
        changed.intercept = 60.0;
        write_artifact(dir.path(), "diastolic_model.json", &changed);
        assert!(matches!(
            LinearPipelineModel::load(&dir.path().join("diastolic_model.json"), false),
            Err(ModelError::ManifestMismatch(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            LinearPipelineModel::load(&dir.path().join("nope.json"), false),
            Err(ModelError::Io { .. })
        ));
    }
}
