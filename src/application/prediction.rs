//! Prediction service: Assembles the model input and queries both pressure models.
//!
//! The two models are loaded once by the caller and injected here; the service
//! never reaches for global state and never mutates the models.

use std::sync::Arc;

use crate::domain::{BloodPressurePrediction, FeatureRecord, PatientObservation};
use crate::ports::{ModelError, RegressionModel};
use crate::BpError;

/// The systolic and diastolic model handles.
pub struct ModelPair<M: RegressionModel> {
    pub systolic: Arc<M>,
    pub diastolic: Arc<M>,
}

impl<M: RegressionModel> ModelPair<M> {
    pub fn new(systolic: Arc<M>, diastolic: Arc<M>) -> Self {
        Self {
            systolic,
            diastolic,
        }
    }
}

impl<M: RegressionModel> Clone for ModelPair<M> {
    fn clone(&self) -> Self {
        Self {
            systolic: Arc::clone(&self.systolic),
            diastolic: Arc::clone(&self.diastolic),
        }
    }
}

/// Service turning a patient observation into a blood pressure prediction.
pub struct PredictionService<M>
where
    M: RegressionModel,
{
    models: ModelPair<M>,
}

impl<M> PredictionService<M>
where
    M: RegressionModel,
{
    /// Create a new prediction service over loaded models.
    pub fn new(models: ModelPair<M>) -> Self {
        Self { models }
    }

    /// Predict systolic and diastolic pressure for one observation.
    ///
    /// The observation is turned into a single labeled row in the fixed schema
    /// order and handed unchanged to both models. No range checks happen here.
    ///
    /// # Errors
    /// Returns `BpError::Model` if either model rejects the row (schema mismatch)
    /// or returns no value.
    pub fn predict(
        &self,
        observation: &PatientObservation,
    ) -> Result<BloodPressurePrediction, BpError> {
        let record = FeatureRecord::from_observation(observation);
        let rows = std::slice::from_ref(&record);

        tracing::debug!("Assembled feature record with {} columns", record.len());

        let systolic = first_value(self.models.systolic.as_ref(), rows)?;
        let diastolic = first_value(self.models.diastolic.as_ref(), rows)?;

        let prediction = BloodPressurePrediction::new(systolic, diastolic);
        tracing::info!("Prediction complete: category={}", prediction.category);

        Ok(prediction)
    }
}

fn first_value<M: RegressionModel>(model: &M, rows: &[FeatureRecord]) -> Result<f64, ModelError> {
    model
        .predict(rows)?
        .first()
        .copied()
        .ok_or_else(|| ModelError::EmptyOutput(model.name().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{YesNo, FEATURE_SCHEMA};
    use std::sync::Mutex;

    /// Returns a fixed value per row and remembers every row it was given.
    struct StubModel {
        name: String,
        features: Vec<String>,
        output: Vec<f64>,
        seen: Mutex<Vec<FeatureRecord>>,
    }

    impl StubModel {
        fn new(name: &str, output: f64) -> Self {
            Self {
                name: name.to_string(),
                features: FEATURE_SCHEMA.iter().map(|s| s.to_string()).collect(),
                output: vec![output],
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<FeatureRecord> {
            self.seen.lock().expect("stub lock").clone()
        }
    }

    impl RegressionModel for StubModel {
        fn name(&self) -> &str {
            &self.name
        }

        fn expected_features(&self) -> &[String] {
            &self.features
        }

        fn predict(&self, rows: &[FeatureRecord]) -> Result<Vec<f64>, ModelError> {
            for row in rows {
                crate::ports::check_schema(&self.name, &self.features, row)?;
            }
            self.seen.lock().expect("stub lock").extend_from_slice(rows);
            Ok(self.output.iter().copied().cycle().take(rows.len()).collect())
        }
    }

    type Fixture = (PredictionService<StubModel>, Arc<StubModel>, Arc<StubModel>);

    fn service(sys: f64, dia: f64) -> Fixture {
        let s = Arc::new(StubModel::new("systolic", sys));
        let d = Arc::new(StubModel::new("diastolic", dia));
        let svc = PredictionService::new(ModelPair::new(Arc::clone(&s), Arc::clone(&d)));
        (svc, s, d)
    }

    fn example_observation() -> PatientObservation {
        PatientObservation {
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
            hypertension: YesNo::No,
            diabetes: YesNo::No,
            cerebral_infarction: YesNo::No,
            cerebrovascular_disease: YesNo::No,
        }
    }

    #[test]
    fn test_end_to_end_example() {
        let (svc, sys, dia) = service(118.37, 76.02);
        let obs = example_observation();

        let prediction = svc.predict(&obs).expect("prediction");
        assert_eq!(prediction.pair(), (118.37, 76.02));

        let expected = FeatureRecord::from_observation(&obs);
        for stub in [&sys, &dia] {
            let seen = stub.seen();
            assert_eq!(seen.len(), 1);
            assert_eq!(seen[0], expected);
            for flag in [
                "Hypertension",
                "Diabetes",
                "cerebral infarction",
                "cerebrovascular disease",
            ] {
                assert_eq!(seen[0].get(flag), Some(0.0));
            }
            assert_eq!(seen[0].get("Age(year)"), Some(30.0));
            assert_eq!(seen[0].get("max"), Some(140.0));
        }
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let (svc, _, _) = service(131.5, 84.25);
        let obs = example_observation();

        let first = svc.predict(&obs).expect("first").pair();
        for _ in 0..5 {
            assert_eq!(svc.predict(&obs).expect("repeat").pair(), first);
        }
    }

    #[test]
    fn test_zero_boundary_predicts() {
        let (svc, sys, _) = service(100.0, 60.0);
        let obs = PatientObservation {
            age: 0,
            height: 0.0,
            weight: 0.0,
            ..example_observation()
        };

        let prediction = svc.predict(&obs).expect("zero inputs are accepted");
        assert_eq!(prediction.pair(), (100.0, 60.0));
        assert_eq!(sys.seen()[0].get("Weight(kg)"), Some(0.0));
    }

    #[test]
    fn test_schema_mismatch_is_fatal() {
        let mut bad = StubModel::new("systolic", 120.0);
        bad.features.retain(|f| f != "std");
        let svc = PredictionService::new(ModelPair::new(
            Arc::new(bad),
            Arc::new(StubModel::new("diastolic", 80.0)),
        ));

        let err = svc
            .predict(&example_observation())
            .expect_err("missing column must fail");
        assert!(matches!(
            err,
            BpError::Model(ModelError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_model_output() {
        let mut empty = StubModel::new("diastolic", 0.0);
        empty.output.clear();
        let svc = PredictionService::new(ModelPair::new(
            Arc::new(StubModel::new("systolic", 120.0)),
            Arc::new(empty),
        ));

        let err = svc.predict(&example_observation()).expect_err("no output");
        assert!(matches!(err, BpError::Model(ModelError::EmptyOutput(name)) if name == "diastolic"));
    }
}
