//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - collected from either front end (CLI flags or the TUI form)
//! - assembled into the model's feature vector
//! - echoed back in reports

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The binary outcome produced by the trained classifier.
///
/// The numeric convention (1 = dropout, 0 = graduate) is fixed by how the
/// model was trained; it is an external contract, not a choice made here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prediction {
    Graduate,
    Dropout,
}

impl Prediction {
    /// Map raw model output to a domain result.
    ///
    /// The model contract only ever emits 0 or 1; any non-1 value is treated
    /// as graduate.
    pub fn from_model_output(output: i64) -> Self {
        if output == 1 {
            Prediction::Dropout
        } else {
            Prediction::Graduate
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Prediction::Graduate => "GRADUATE",
            Prediction::Dropout => "DROPOUT",
        }
    }
}

/// Filesystem locations of the two training-pipeline artifacts.
///
/// Both files are loaded once at process start and treated as read-only for
/// the rest of the process.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
}

/// One student's raw inputs: resolved categorical codes plus numeric entries.
///
/// Field order here is for readability; the canonical 26-slot order lives in
/// `features::Feature::ALL` and is applied during assembly.
#[derive(Debug, Clone)]
pub struct StudentRecord {
    pub marital_status: i64,
    pub application_mode: i64,
    pub application_order: i64,
    pub course: i64,
    pub attendance: i64,
    pub previous_qualification: i64,
    pub mother_qualification: i64,
    pub father_qualification: i64,
    pub mother_occupation: i64,
    pub displaced: i64,
    pub special_needs: i64,
    pub debtor: i64,
    pub tuition_up_to_date: i64,
    pub gender: i64,
    pub scholarship: i64,
    pub age_at_enrollment: i64,
    pub units_1st_without_evaluations: i64,
    pub units_2nd_credited: i64,
    pub units_2nd_enrolled: i64,
    pub units_2nd_evaluations: i64,
    pub units_2nd_approved: i64,
    pub units_2nd_grade: f64,
    pub units_2nd_without_evaluations: i64,
    pub unemployment_rate: f64,
    pub inflation_rate: f64,
    pub gdp: f64,
}

impl Default for StudentRecord {
    /// The form's starting values: each dropdown at its first/zero code and
    /// the numeric entries at the defaults the original intake form used.
    fn default() -> Self {
        Self {
            marital_status: 1,
            application_mode: 0,
            application_order: 0,
            course: 0,
            attendance: 1,
            previous_qualification: 0,
            mother_qualification: 1,
            father_qualification: 1,
            mother_occupation: 0,
            displaced: 0,
            special_needs: 0,
            debtor: 0,
            tuition_up_to_date: 0,
            gender: 0,
            scholarship: 0,
            age_at_enrollment: 20,
            units_1st_without_evaluations: 0,
            units_2nd_credited: 0,
            units_2nd_enrolled: 0,
            units_2nd_evaluations: 0,
            units_2nd_approved: 0,
            units_2nd_grade: 12.0,
            units_2nd_without_evaluations: 0,
            unemployment_rate: 10.0,
            inflation_rate: 1.0,
            gdp: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_output_one_is_dropout() {
        assert_eq!(Prediction::from_model_output(1), Prediction::Dropout);
    }

    #[test]
    fn model_output_zero_is_graduate() {
        assert_eq!(Prediction::from_model_output(0), Prediction::Graduate);
    }
}
