//! Pre-fitted standard scaler.

use nalgebra::DVector;

use crate::error::AppError;
use crate::features::{FeatureVector, FEATURE_COUNT};

/// A standard scaler fitted by the training pipeline.
///
/// `transform` applies the *same* fitting statistics the model was trained
/// with; this crate never refits them.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: DVector<f64>,
    scale: DVector<f64>,
}

impl StandardScaler {
    /// Build a scaler from fitted statistics.
    ///
    /// Both arrays must have one entry per feature slot, and every scale
    /// entry must be finite and nonzero. Violations are startup-level
    /// errors: a malformed artifact blocks all inference.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, AppError> {
        if mean.len() != FEATURE_COUNT || scale.len() != FEATURE_COUNT {
            return Err(AppError::startup(format!(
                "Scaler artifact has {} mean / {} scale entries; expected {FEATURE_COUNT} each.",
                mean.len(),
                scale.len()
            )));
        }
        if let Some(i) = scale.iter().position(|s| !s.is_finite() || *s == 0.0) {
            return Err(AppError::startup(format!(
                "Scaler artifact has a non-finite or zero scale at slot {i}."
            )));
        }
        if let Some(i) = mean.iter().position(|m| !m.is_finite()) {
            return Err(AppError::startup(format!(
                "Scaler artifact has a non-finite mean at slot {i}."
            )));
        }
        Ok(Self {
            mean: DVector::from_vec(mean),
            scale: DVector::from_vec(scale),
        })
    }

    /// Normalize a raw feature vector: `(x - mean) / scale` per slot.
    pub fn transform(&self, vector: &FeatureVector) -> Result<DVector<f64>, AppError> {
        let x = DVector::from_row_slice(vector.values());
        let scaled = (x - &self.mean).component_div(&self.scale);
        if scaled.iter().any(|v| !v.is_finite()) {
            return Err(AppError::runtime(
                "Scaling produced a non-finite value; check the submitted inputs.",
            ));
        }
        Ok(scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StudentRecord;
    use crate::features::assemble_record;

    fn identity_scaler() -> StandardScaler {
        StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]).unwrap()
    }

    #[test]
    fn identity_statistics_leave_vector_unchanged() {
        let vector = assemble_record(&StudentRecord::default()).unwrap();
        let scaled = identity_scaler().transform(&vector).unwrap();
        for (a, b) in scaled.iter().zip(vector.values()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn transform_centers_and_scales() {
        let mean = vec![1.0; FEATURE_COUNT];
        let scale = vec![2.0; FEATURE_COUNT];
        let scaler = StandardScaler::new(mean, scale).unwrap();

        let vector = assemble_record(&StudentRecord::default()).unwrap();
        let scaled = scaler.transform(&vector).unwrap();
        for (s, raw) in scaled.iter().zip(vector.values()) {
            assert!((s - (raw - 1.0) / 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn wrong_length_statistics_are_rejected() {
        let err = StandardScaler::new(vec![0.0; 3], vec![1.0; FEATURE_COUNT]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn zero_scale_is_rejected() {
        let mut scale = vec![1.0; FEATURE_COUNT];
        scale[5] = 0.0;
        let err = StandardScaler::new(vec![0.0; FEATURE_COUNT], scale).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
