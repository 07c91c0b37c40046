//! Prediction result types.
//!
//! Represents the pair of pressures estimated by the systolic and diastolic models.

use serde::{Deserialize, Serialize};

/// Blood pressure category of a predicted pair (ACC/AHA adult thresholds).
///
/// Display only; never feeds back into the predicted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BpCategory {
    /// Below 120 and below 80
    Normal,
    /// 120-129 and below 80
    Elevated,
    /// 130-139 or 80-89
    Stage1,
    /// 140 or higher, or 90 or higher
    Stage2,
    /// Above 180 and/or above 120
    Crisis,
}

impl BpCategory {
    /// Classify a systolic/diastolic pair.
    #[must_use]
    pub fn classify(systolic: f64, diastolic: f64) -> Self {
        if systolic > 180.0 || diastolic > 120.0 {
            Self::Crisis
        } else if systolic >= 140.0 || diastolic >= 90.0 {
            Self::Stage2
        } else if systolic >= 130.0 || diastolic >= 80.0 {
            Self::Stage1
        } else if systolic >= 120.0 {
            Self::Elevated
        } else {
            Self::Normal
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Normal => "Within the normal range",
            Self::Elevated => "Elevated - lifestyle review suggested",
            Self::Stage1 => "Hypertension stage 1 - follow-up recommended",
            Self::Stage2 => "Hypertension stage 2 - clinical evaluation advised",
            Self::Crisis => "Hypertensive crisis range - seek care promptly",
        }
    }
}

impl std::fmt::Display for BpCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Elevated => write!(f, "ELEVATED"),
            Self::Stage1 => write!(f, "STAGE 1"),
            Self::Stage2 => write!(f, "STAGE 2"),
            Self::Crisis => write!(f, "CRISIS"),
        }
    }
}

/// Predicted systolic and diastolic pressure in mmHg.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodPressurePrediction {
    pub systolic: f64,
    pub diastolic: f64,
    pub category: BpCategory,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl BloodPressurePrediction {
    #[must_use]
    pub fn new(systolic: f64, diastolic: f64) -> Self {
        Self {
            systolic,
            diastolic,
            category: BpCategory::classify(systolic, diastolic),
            created_at: chrono::Utc::now(),
        }
    }

    /// The `(systolic, diastolic)` pair.
    #[must_use]
    pub fn pair(&self) -> (f64, f64) {
        (self.systolic, self.diastolic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_thresholds() {
        assert_eq!(BpCategory::classify(115.0, 75.0), BpCategory::Normal);
        assert_eq!(BpCategory::classify(125.0, 75.0), BpCategory::Elevated);
        assert_eq!(BpCategory::classify(125.0, 82.0), BpCategory::Stage1);
        assert_eq!(BpCategory::classify(135.0, 70.0), BpCategory::Stage1);
        assert_eq!(BpCategory::classify(141.0, 70.0), BpCategory::Stage2);
        assert_eq!(BpCategory::classify(120.0, 95.0), BpCategory::Stage2);
        assert_eq!(BpCategory::classify(185.0, 100.0), BpCategory::Crisis);
        assert_eq!(BpCategory::classify(150.0, 125.0), BpCategory::Crisis);
    }

    #[test]
    fn test_prediction_keeps_values() {
        let prediction = BloodPressurePrediction::new(128.25, 83.5);
        assert_eq!(prediction.pair(), (128.25, 83.5));
        assert_eq!(prediction.category, BpCategory::Stage1);
    }
}
