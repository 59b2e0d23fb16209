//! Shared predict pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! record -> feature vector -> scale -> predict -> interpret
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::domain::{ArtifactPaths, Prediction, StudentRecord};
use crate::error::AppError;
use crate::features::{assemble_record, FeatureVector};
use crate::models::{infer, LinearClassifier, StandardScaler};

/// The scaler/model pair, loaded once at process start and read-only for the
/// rest of the process.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub scaler: StandardScaler,
    pub model: LinearClassifier,
}

impl Artifacts {
    /// Load both artifacts.
    ///
    /// Failure here is the startup-level condition that blocks all
    /// inference; callers must not retry per submission.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, AppError> {
        let scaler = crate::io::artifacts::read_scaler_json(&paths.scaler)?;
        let model = crate::io::artifacts::read_model_json(&paths.model)?;
        Ok(Self { scaler, model })
    }
}

/// All computed outputs of a single submission.
#[derive(Debug, Clone)]
pub struct PredictOutput {
    /// The raw (pre-scaling) vector, for reporting and diagnostics.
    pub vector: FeatureVector,
    pub prediction: Prediction,
}

/// Execute one synchronous assemble -> scale -> predict -> interpret pass.
///
/// Errors are per-submission: the artifacts stay loaded and the caller may
/// submit again.
pub fn run_predict(
    artifacts: &Artifacts,
    record: &StudentRecord,
) -> Result<PredictOutput, AppError> {
    let vector = assemble_record(record)?;
    let prediction = infer(&vector, &artifacts.scaler, &artifacts.model)?;
    Ok(PredictOutput { vector, prediction })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_artifacts_block_at_startup() {
        let paths = ArtifactPaths {
            model: PathBuf::from("no-such-model.json"),
            scaler: PathBuf::from("no-such-scaler.json"),
        };
        let err = Artifacts::load(&paths).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn run_predict_carries_the_raw_vector() {
        use crate::features::FEATURE_COUNT;

        let artifacts = Artifacts {
            scaler: StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT])
                .unwrap(),
            model: LinearClassifier::new(vec![0.0; FEATURE_COUNT], -1.0).unwrap(),
        };
        let record = StudentRecord::default();
        let output = run_predict(&artifacts, &record).unwrap();

        // Intercept below zero with zero coefficients: always graduate.
        assert_eq!(output.prediction, Prediction::Graduate);
        assert_eq!(output.vector.values()[15], 20.0);
    }
}
