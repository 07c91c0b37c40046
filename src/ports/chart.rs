//! Chart port: Trait for exporting the prediction as an image.

use std::path::PathBuf;

use crate::domain::BloodPressurePrediction;

/// Errors from chart export.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("failed to write chart to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to draw chart: {0}")]
    Draw(String),
}

/// Renders a predicted pair to an image file.
pub trait ChartRenderer: Send + Sync {
    /// Render the prediction and return the path written.
    ///
    /// # Errors
    /// Returns `ChartError::Io` if the output directory cannot be created, or
    /// `ChartError::Draw` if drawing or writing the image fails.
    fn render(&self, prediction: &BloodPressurePrediction) -> Result<PathBuf, ChartError>;
}
