//! Binary classifier and the inference entry point.

use nalgebra::DVector;

use crate::domain::Prediction;
use crate::error::AppError;
use crate::features::{FeatureVector, FEATURE_COUNT};
use crate::models::StandardScaler;

/// The trained classifier's predict contract: a scaled vector in, 0 or 1 out.
///
/// This trait is the seam between the inference flow and the opaque model
/// artifact; tests substitute stubs for the real artifact here.
pub trait Classifier {
    fn predict(&self, scaled: &DVector<f64>) -> Result<i64, AppError>;
}

/// A linear binary classifier (coefficients + intercept) loaded from the
/// model artifact. Decision is the sign of the linear score over the scaled
/// vector, matching the training pipeline's decision function.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    coefficients: DVector<f64>,
    intercept: f64,
}

impl LinearClassifier {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, AppError> {
        if coefficients.len() != FEATURE_COUNT {
            return Err(AppError::startup(format!(
                "Model artifact has {} coefficients; expected {FEATURE_COUNT}.",
                coefficients.len()
            )));
        }
        if coefficients.iter().any(|c| !c.is_finite()) || !intercept.is_finite() {
            return Err(AppError::startup(
                "Model artifact contains non-finite parameters.",
            ));
        }
        Ok(Self {
            coefficients: DVector::from_vec(coefficients),
            intercept,
        })
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, scaled: &DVector<f64>) -> Result<i64, AppError> {
        if scaled.len() != self.coefficients.len() {
            return Err(AppError::runtime(format!(
                "Scaled vector has {} slots; the model expects {}.",
                scaled.len(),
                self.coefficients.len()
            )));
        }
        let score = self.coefficients.dot(scaled) + self.intercept;
        if !score.is_finite() {
            return Err(AppError::runtime("Model produced a non-finite score."));
        }
        Ok(if score > 0.0 { 1 } else { 0 })
    }
}

/// Drive the scaler/model pair for one submission.
///
/// Scale, predict, then map output 1 to dropout and anything else (expected:
/// 0) to graduate. Errors from either artifact surface to the caller; the
/// session stays usable for another attempt.
pub fn infer(
    vector: &FeatureVector,
    scaler: &StandardScaler,
    model: &dyn Classifier,
) -> Result<Prediction, AppError> {
    let scaled = scaler.transform(vector)?;
    let output = model.predict(&scaled)?;
    Ok(Prediction::from_model_output(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StudentRecord;
    use crate::features::assemble_record;

    /// Stub model that ignores its input and returns a fixed output.
    struct FixedOutput(i64);

    impl Classifier for FixedOutput {
        fn predict(&self, _scaled: &DVector<f64>) -> Result<i64, AppError> {
            Ok(self.0)
        }
    }

    fn identity_scaler() -> StandardScaler {
        StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]).unwrap()
    }

    #[test]
    fn stub_output_one_yields_dropout() {
        let vector = assemble_record(&StudentRecord::default()).unwrap();
        let result = infer(&vector, &identity_scaler(), &FixedOutput(1)).unwrap();
        assert_eq!(result, Prediction::Dropout);
    }

    #[test]
    fn stub_output_zero_yields_graduate() {
        let vector = assemble_record(&StudentRecord::default()).unwrap();
        let result = infer(&vector, &identity_scaler(), &FixedOutput(0)).unwrap();
        assert_eq!(result, Prediction::Graduate);
    }

    #[test]
    fn linear_decision_follows_score_sign() {
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[0] = 1.0;
        let positive = LinearClassifier::new(coefficients.clone(), 0.0).unwrap();
        let negative = LinearClassifier::new(coefficients, -10.0).unwrap();

        // Slot 0 of the default record is marital status = 1.
        let vector = assemble_record(&StudentRecord::default()).unwrap();
        let scaled = identity_scaler().transform(&vector).unwrap();

        assert_eq!(positive.predict(&scaled).unwrap(), 1);
        assert_eq!(negative.predict(&scaled).unwrap(), 0);
    }

    #[test]
    fn wrong_coefficient_count_is_rejected() {
        let err = LinearClassifier::new(vec![1.0; 4], 0.0).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn model_error_surfaces_per_submission() {
        struct Failing;
        impl Classifier for Failing {
            fn predict(&self, _scaled: &DVector<f64>) -> Result<i64, AppError> {
                Err(AppError::runtime("boom"))
            }
        }

        let vector = assemble_record(&StudentRecord::default()).unwrap();
        let err = infer(&vector, &identity_scaler(), &Failing).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
