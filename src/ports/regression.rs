//! Regression model port: Trait for the pre-trained pressure models.
//!
//! The application only ever sees this contract: hand over labeled rows, get
//! back one continuous value per row. How the model was trained or serialized
//! is an adapter concern.

use crate::domain::FeatureRecord;

/// Errors from loading or invoking a regression model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("I/O error on model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("feature schema mismatch for {model}: {detail}")]
    SchemaMismatch { model: String, detail: String },

    #[error("model {0} returned no prediction")]
    EmptyOutput(String),

    #[error("model {0} produced a non-finite prediction")]
    NonFinite(String),

    #[error("artifact manifest required but not found in {0}")]
    ManifestMissing(String),

    #[error("artifact manifest check failed: {0}")]
    ManifestMismatch(String),
}

/// A loaded, read-only regression model.
///
/// Implementations must be stateless from the caller's perspective so one
/// handle can be shared across threads.
pub trait RegressionModel: Send + Sync {
    /// Name used in logs and errors (e.g. "systolic").
    fn name(&self) -> &str;

    /// Column names the model was trained on, in training order.
    fn expected_features(&self) -> &[String];

    /// Predict one value per row.
    ///
    /// # Errors
    /// Returns `ModelError::SchemaMismatch` if a row's columns differ from
    /// [`expected_features`](Self::expected_features).
    fn predict(&self, rows: &[FeatureRecord]) -> Result<Vec<f64>, ModelError>;
}

/// Compare a row's columns with the model's expected columns.
///
/// # Errors
/// Returns `ModelError::SchemaMismatch` naming missing, unexpected or misordered columns.
pub fn check_schema(
    model: &str,
    expected: &[String],
    row: &FeatureRecord,
) -> Result<(), ModelError> {
    let actual: Vec<&str> = row.names().collect();
    if actual.len() == expected.len()
        && actual.iter().zip(expected).all(|(a, e)| *a == e.as_str())
    {
        return Ok(());
    }

    let missing: Vec<&str> = expected
        .iter()
        .map(String::as_str)
        .filter(|e| !actual.contains(e))
        .collect();
    let unexpected: Vec<&str> = actual
        .iter()
        .copied()
        .filter(|a| !expected.iter().any(|e| e.as_str() == *a))
        .collect();

    let detail = if missing.is_empty() && unexpected.is_empty() {
        "columns present but in a different order".to_string()
    } else {
        format!("missing {missing:?}, unexpected {unexpected:?}")
    };

    Err(ModelError::SchemaMismatch {
        model: model.to_string(),
        detail,
    })
}
