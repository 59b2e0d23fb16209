//! Read the scaler/model artifact files.
//!
//! The artifacts are produced and owned by the training pipeline; this crate
//! only loads them. The interchange format is JSON:
//!
//! - scaler: fitted per-feature statistics plus the training-time column
//!   names (used as a drift guard at load)
//! - model: linear coefficients + intercept
//!
//! Both loads happen once at process start. A missing or malformed file is a
//! startup-level condition (exit code 2), never a per-request error.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::features::Feature;
use crate::models::{LinearClassifier, StandardScaler};

/// On-disk schema of the scaler artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerFile {
    /// Column names the scaler was fitted on, in fitting order.
    pub feature_names: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// On-disk schema of the model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Load and validate the scaler artifact.
///
/// The artifact's column names must match the crate's feature schema exactly
/// (name and position). A mismatch means the artifacts were trained against
/// a different schema; failing here at startup is what keeps that drift from
/// silently corrupting every prediction.
pub fn read_scaler_json(path: &Path) -> Result<StandardScaler, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::startup(format!(
            "Failed to open scaler artifact '{}': {e}",
            path.display()
        ))
    })?;
    let parsed: ScalerFile = serde_json::from_reader(file)
        .map_err(|e| AppError::startup(format!("Invalid scaler artifact JSON: {e}")))?;

    if parsed.feature_names.len() != Feature::ALL.len() {
        return Err(AppError::startup(format!(
            "Scaler artifact lists {} features; expected {}.",
            parsed.feature_names.len(),
            Feature::ALL.len()
        )));
    }
    for (feature, name) in Feature::ALL.iter().zip(&parsed.feature_names) {
        if feature.name() != name {
            return Err(AppError::startup(format!(
                "Scaler artifact feature order mismatch at slot {}: \
                 artifact has '{}', expected '{}'.",
                feature.index(),
                name,
                feature.name()
            )));
        }
    }

    StandardScaler::new(parsed.mean, parsed.scale)
}

/// Load and validate the model artifact.
pub fn read_model_json(path: &Path) -> Result<LinearClassifier, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::startup(format!(
            "Failed to open model artifact '{}': {e}",
            path.display()
        ))
    })?;
    let parsed: ModelFile = serde_json::from_reader(file)
        .map_err(|e| AppError::startup(format!("Invalid model artifact JSON: {e}")))?;

    LinearClassifier::new(parsed.coefficients, parsed.intercept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    use crate::features::FEATURE_COUNT;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gradcast-test-{}-{name}", std::process::id()))
    }

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = temp_path(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn valid_scaler_json() -> String {
        let names: Vec<String> = Feature::ALL.iter().map(|f| f.name().to_string()).collect();
        serde_json::to_string(&ScalerFile {
            feature_names: names,
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        })
        .unwrap()
    }

    #[test]
    fn valid_scaler_loads() {
        let path = write_temp("scaler-ok.json", &valid_scaler_json());
        assert!(read_scaler_json(&path).is_ok());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_scaler_is_startup_error() {
        let err = read_scaler_json(Path::new("definitely-missing-scaler.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn scaler_with_foreign_feature_names_is_rejected() {
        let mut names: Vec<String> =
            Feature::ALL.iter().map(|f| f.name().to_string()).collect();
        names.swap(0, 1);
        let json = serde_json::to_string(&ScalerFile {
            feature_names: names,
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        })
        .unwrap();
        let path = write_temp("scaler-swapped.json", &json);
        let err = read_scaler_json(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("order mismatch"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn malformed_model_json_is_startup_error() {
        let path = write_temp("model-bad.json", "{ not json");
        let err = read_model_json(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn valid_model_loads() {
        let json = serde_json::to_string(&ModelFile {
            coefficients: vec![0.1; FEATURE_COUNT],
            intercept: -0.5,
        })
        .unwrap();
        let path = write_temp("model-ok.json", &json);
        assert!(read_model_json(&path).is_ok());
        let _ = std::fs::remove_file(path);
    }
}
