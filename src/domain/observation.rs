//! Patient observation and the fixed feature schema shared with the models.
//!
//! The models were trained on a labeled table; the column names and their order
//! in [`FEATURE_SCHEMA`] must match that table exactly.

use serde::{Deserialize, Serialize};

/// Column names of the single-row record handed to the regression models.
///
/// Order: age, height, weight, heart rate, BMI, the five pressure summary
/// statistics, then the four comorbidity indicators.
pub const FEATURE_SCHEMA: [&str; 14] = [
    "Age(year)",
    "Height(cm)",
    "Weight(kg)",
    "Heart Rate(b/m)",
    "BMI(kg/m^2)",
    "mean",
    "std",
    "max",
    "min",
    "median",
    "Hypertension",
    "Diabetes",
    "cerebral infarction",
    "cerebrovascular disease",
];

/// Answer to a yes/no clinical question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    /// Binary indicator used by the models: `Yes` is 1, `No` is 0.
    #[must_use]
    pub fn indicator(self) -> f64 {
        match self {
            Self::Yes => 1.0,
            Self::No => 0.0,
        }
    }

    /// The other answer.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Yes => Self::No,
            Self::No => Self::Yes,
        }
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl std::fmt::Display for YesNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
        }
    }
}

impl std::str::FromStr for YesNo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("yes") {
            Ok(Self::Yes)
        } else if trimmed.eq_ignore_ascii_case("no") {
            Ok(Self::No)
        } else {
            Err(format!("expected \"Yes\" or \"No\", got {trimmed:?}"))
        }
    }
}

/// Vitals, pressure summary and comorbidity flags for one prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientObservation {
    /// Age in years
    pub age: u32,
    /// Height in cm
    pub height: f64,
    /// Weight in kg
    pub weight: f64,
    /// Heart rate in beats/min
    pub heart_rate: f64,
    /// Body mass index in kg/m^2
    pub bmi: f64,
    /// Mean of the recorded pressure series (mmHg)
    pub bp_mean: f64,
    /// Standard deviation of the recorded pressure series (mmHg)
    pub bp_std: f64,
    /// Maximum of the recorded pressure series (mmHg)
    pub bp_max: f64,
    /// Minimum of the recorded pressure series (mmHg)
    pub bp_min: f64,
    /// Median of the recorded pressure series (mmHg)
    pub bp_median: f64,
    pub hypertension: YesNo,
    pub diabetes: YesNo,
    pub cerebral_infarction: YesNo,
    pub cerebrovascular_disease: YesNo,
}

impl Default for PatientObservation {
    /// Defaults of the input form.
    fn default() -> Self {
        Self {
            age: 30,
            height: 170.0,
            weight: 70.0,
            heart_rate: 75.0,
            bmi: 24.0,
            bp_mean: 120.0,
            bp_std: 10.0,
            bp_max: 140.0,
            bp_min: 80.0,
            bp_median: 110.0,
            hypertension: YesNo::Yes,
            diabetes: YesNo::Yes,
            cerebral_infarction: YesNo::Yes,
            cerebrovascular_disease: YesNo::Yes,
        }
    }
}

/// Inclusive bounds enforced by the input surfaces (form and JSON loader).
///
/// The prediction path itself never checks these.
pub const INPUT_BOUNDS: [(&str, f64, f64); 10] = [
    ("Age (years)", 0.0, 120.0),
    ("Height (cm)", 0.0, 250.0),
    ("Weight (kg)", 0.0, 200.0),
    ("Heart Rate (b/m)", 0.0, 200.0),
    ("BMI (kg/m^2)", 0.0, 50.0),
    ("Mean Blood Pressure", 50.0, 200.0),
    ("Blood Pressure Standard Deviation", 0.0, 50.0),
    ("Max Blood Pressure", 100.0, 200.0),
    ("Min Blood Pressure", 50.0, 100.0),
    ("Median Blood Pressure", 50.0, 150.0),
];

impl PatientObservation {
    /// Numeric inputs in form order (same order as [`INPUT_BOUNDS`]).
    #[must_use]
    pub fn numeric_inputs(&self) -> [f64; 10] {
        [
            f64::from(self.age),
            self.height,
            self.weight,
            self.heart_rate,
            self.bmi,
            self.bp_mean,
            self.bp_std,
            self.bp_max,
            self.bp_min,
            self.bp_median,
        ]
    }

    /// Check the numeric inputs against the form bounds.
    ///
    /// # Errors
    /// Returns one message per out-of-range or non-finite field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let errors: Vec<String> = self
            .numeric_inputs()
            .iter()
            .zip(INPUT_BOUNDS.iter())
            .filter_map(|(&value, &(label, min, max))| {
                if !value.is_finite() {
                    Some(format!("{label}: value must be a number"))
                } else if value < min || value > max {
                    Some(format!("{label}: {value} out of range [{min}, {max}]"))
                } else {
                    None
                }
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A single labeled row in [`FEATURE_SCHEMA`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    columns: Vec<(&'static str, f64)>,
}

impl FeatureRecord {
    /// Assemble the model input row, mapping comorbidity answers to 0/1.
    #[must_use]
    pub fn from_observation(obs: &PatientObservation) -> Self {
        let values = [
            f64::from(obs.age),
            obs.height,
            obs.weight,
            obs.heart_rate,
            obs.bmi,
            obs.bp_mean,
            obs.bp_std,
            obs.bp_max,
            obs.bp_min,
            obs.bp_median,
            obs.hypertension.indicator(),
            obs.diabetes.indicator(),
            obs.cerebral_infarction.indicator(),
            obs.cerebrovascular_disease.indicator(),
        ];

        Self {
            columns: FEATURE_SCHEMA.iter().copied().zip(values).collect(),
        }
    }

    /// Value of the named column, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(column, _)| *column == name)
            .map(|(_, value)| *value)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(name, _)| *name)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.columns.iter().map(|(_, value)| *value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_no() -> PatientObservation {
        PatientObservation {
            hypertension: YesNo::No,
            diabetes: YesNo::No,
            cerebral_infarction: YesNo::No,
            cerebrovascular_disease: YesNo::No,
            ..Default::default()
        }
    }

    #[test]
    fn test_record_schema_by_name() {
        let record = FeatureRecord::from_observation(&PatientObservation::default());
        let names: Vec<&str> = record.names().collect();
        assert_eq!(
            names,
            vec![
                "Age(year)",
                "Height(cm)",
                "Weight(kg)",
                "Heart Rate(b/m)",
                "BMI(kg/m^2)",
                "mean",
                "std",
                "max",
                "min",
                "median",
                "Hypertension",
                "Diabetes",
                "cerebral infarction",
                "cerebrovascular disease",
            ]
        );
        assert_eq!(record.len(), 14);
    }

    #[test]
    fn test_record_values_by_name() {
        let obs = PatientObservation {
            age: 64,
            height: 158.0,
            weight: 61.5,
            heart_rate: 88.0,
            bmi: 24.6,
            bp_mean: 131.0,
            bp_std: 7.5,
            bp_max: 152.0,
            bp_min: 92.0,
            bp_median: 129.0,
            ..all_no()
        };
        let record = FeatureRecord::from_observation(&obs);

        assert_eq!(record.get("Age(year)"), Some(64.0));
        assert_eq!(record.get("Height(cm)"), Some(158.0));
        assert_eq!(record.get("Weight(kg)"), Some(61.5));
        assert_eq!(record.get("Heart Rate(b/m)"), Some(88.0));
        assert_eq!(record.get("BMI(kg/m^2)"), Some(24.6));
        assert_eq!(record.get("mean"), Some(131.0));
        assert_eq!(record.get("std"), Some(7.5));
        assert_eq!(record.get("max"), Some(152.0));
        assert_eq!(record.get("min"), Some(92.0));
        assert_eq!(record.get("median"), Some(129.0));
        assert_eq!(record.get("systolic"), None);
    }

    #[test]
    fn test_each_flag_maps_independently() {
        type Setter = fn(&mut PatientObservation, YesNo);
        let flags: [(&str, Setter); 4] = [
            ("Hypertension", |o, v| o.hypertension = v),
            ("Diabetes", |o, v| o.diabetes = v),
            ("cerebral infarction", |o, v| o.cerebral_infarction = v),
            ("cerebrovascular disease", |o, v| o.cerebrovascular_disease = v),
        ];

        for (column, set) in flags {
            let mut obs = all_no();
            set(&mut obs, YesNo::Yes);
            let record = FeatureRecord::from_observation(&obs);

            for (other, _) in flags {
                let expected = if other == column { 1.0 } else { 0.0 };
                assert_eq!(record.get(other), Some(expected), "{column} -> {other}");
            }
        }
    }

    #[test]
    fn test_zero_boundary_builds_record() {
        let obs = PatientObservation {
            age: 0,
            height: 0.0,
            weight: 0.0,
            ..Default::default()
        };
        let record = FeatureRecord::from_observation(&obs);
        assert_eq!(record.get("Age(year)"), Some(0.0));
        assert_eq!(record.get("Height(cm)"), Some(0.0));
        assert_eq!(record.get("Weight(kg)"), Some(0.0));
        assert!(record.values().all(f64::is_finite));
        assert!(obs.validate().is_ok());
    }

    #[test]
    fn test_yes_no_parsing() {
        assert_eq!("Yes".parse::<YesNo>(), Ok(YesNo::Yes));
        assert_eq!(" no ".parse::<YesNo>(), Ok(YesNo::No));
        assert!("maybe".parse::<YesNo>().is_err());
        assert_eq!(YesNo::Yes.toggled(), YesNo::No);
        assert_eq!(YesNo::from(false), YesNo::No);
    }

    #[test]
    fn test_yes_no_json_representation() {
        let json = serde_json::to_string(&YesNo::Yes).expect("serialize");
        assert_eq!(json, "\"Yes\"");
        let back: YesNo = serde_json::from_str("\"No\"").expect("deserialize");
        assert_eq!(back, YesNo::No);
    }

    #[test]
    fn test_validation() {
        assert!(PatientObservation::default().validate().is_ok());

        let invalid = PatientObservation {
            age: 130,
            bp_max: 90.0,
            bmi: f64::NAN,
            ..Default::default()
        };
        let errors = invalid.validate().expect_err("should be rejected");
        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("Age (years)"));
    }
}
