//! Feature schema and vector assembly.
//!
//! The trained model and scaler expect exactly 26 values in a fixed order,
//! under the exact column names used at fitting time. Any permutation would
//! silently corrupt predictions, so the order is pinned in one place
//! (`Feature::ALL`) and assembly always emits that order regardless of the
//! order inputs were supplied in.
//!
//! Numeric domain constraints (ranges, integer vs decimal) are enforced at
//! the point of input collection (CLI value parsers, TUI clamping); the
//! assembler only checks completeness.

use crate::domain::StudentRecord;
use crate::error::AppError;

/// Number of slots in the model's feature vector.
pub const FEATURE_COUNT: usize = 26;

/// One named slot of the feature vector.
///
/// Declaration order is the canonical vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    MaritalStatus,
    ApplicationMode,
    ApplicationOrder,
    Course,
    Attendance,
    PreviousQualification,
    MotherQualification,
    FatherQualification,
    MotherOccupation,
    Displaced,
    SpecialNeeds,
    Debtor,
    TuitionUpToDate,
    Gender,
    Scholarship,
    AgeAtEnrollment,
    Units1stWithoutEvaluations,
    Units2ndCredited,
    Units2ndEnrolled,
    Units2ndEvaluations,
    Units2ndApproved,
    Units2ndGrade,
    Units2ndWithoutEvaluations,
    UnemploymentRate,
    InflationRate,
    Gdp,
}

impl Feature {
    /// All slots in canonical vector order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::MaritalStatus,
        Feature::ApplicationMode,
        Feature::ApplicationOrder,
        Feature::Course,
        Feature::Attendance,
        Feature::PreviousQualification,
        Feature::MotherQualification,
        Feature::FatherQualification,
        Feature::MotherOccupation,
        Feature::Displaced,
        Feature::SpecialNeeds,
        Feature::Debtor,
        Feature::TuitionUpToDate,
        Feature::Gender,
        Feature::Scholarship,
        Feature::AgeAtEnrollment,
        Feature::Units1stWithoutEvaluations,
        Feature::Units2ndCredited,
        Feature::Units2ndEnrolled,
        Feature::Units2ndEvaluations,
        Feature::Units2ndApproved,
        Feature::Units2ndGrade,
        Feature::Units2ndWithoutEvaluations,
        Feature::UnemploymentRate,
        Feature::InflationRate,
        Feature::Gdp,
    ];

    /// Position of this slot in the vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The exact column name the model was fitted on.
    pub fn name(self) -> &'static str {
        match self {
            Feature::MaritalStatus => "Marital status",
            Feature::ApplicationMode => "Application mode",
            Feature::ApplicationOrder => "Application order",
            Feature::Course => "Course",
            Feature::Attendance => "Daytime/evening attendance",
            Feature::PreviousQualification => "Previous qualification",
            Feature::MotherQualification => "Mother's qualification",
            Feature::FatherQualification => "Father's qualification",
            Feature::MotherOccupation => "Mother's occupation",
            Feature::Displaced => "Displaced",
            Feature::SpecialNeeds => "Educational special needs",
            Feature::Debtor => "Debtor",
            Feature::TuitionUpToDate => "Tuition fees up to date",
            Feature::Gender => "Gender",
            Feature::Scholarship => "Scholarship holder",
            Feature::AgeAtEnrollment => "Age at enrollment",
            Feature::Units1stWithoutEvaluations => {
                "Curricular units 1st sem (without evaluations)"
            }
            Feature::Units2ndCredited => "Curricular units 2nd sem (credited)",
            Feature::Units2ndEnrolled => "Curricular units 2nd sem (enrolled)",
            Feature::Units2ndEvaluations => "Curricular units 2nd sem (evaluations)",
            Feature::Units2ndApproved => "Curricular units 2nd sem (approved)",
            Feature::Units2ndGrade => "Curricular units 2nd sem (grade)",
            Feature::Units2ndWithoutEvaluations => {
                "Curricular units 2nd sem (without evaluations)"
            }
            Feature::UnemploymentRate => "Unemployment rate",
            Feature::InflationRate => "Inflation rate",
            Feature::Gdp => "GDP",
        }
    }
}

/// A fully assembled 26-slot vector in canonical order.
///
/// Built fresh per submission, immutable once built, and discarded after one
/// inference call.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }
}

/// Named-slot builder for a [`FeatureVector`].
///
/// Slots may be set in any input order; [`FeatureDraft::assemble`] emits the
/// canonical order and rejects drafts with any slot still unset.
#[derive(Debug, Clone)]
pub struct FeatureDraft {
    slots: [Option<f64>; FEATURE_COUNT],
}

impl Default for FeatureDraft {
    fn default() -> Self {
        Self {
            slots: [None; FEATURE_COUNT],
        }
    }
}

impl FeatureDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, feature: Feature, value: f64) -> &mut Self {
        self.slots[feature.index()] = Some(value);
        self
    }

    pub fn assemble(&self) -> Result<FeatureVector, AppError> {
        let mut values = [0.0; FEATURE_COUNT];
        for feature in Feature::ALL {
            match self.slots[feature.index()] {
                Some(v) => values[feature.index()] = v,
                None => {
                    return Err(AppError::runtime(format!(
                        "Cannot assemble feature vector: '{}' was not provided.",
                        feature.name()
                    )));
                }
            }
        }
        Ok(FeatureVector { values })
    }
}

/// Build the draft for one student record.
///
/// The record is fully typed, so the resulting draft always has all 26 slots
/// set; `assemble` on it cannot fail.
pub fn draft_from_record(record: &StudentRecord) -> FeatureDraft {
    let mut draft = FeatureDraft::new();
    draft
        .set(Feature::MaritalStatus, record.marital_status as f64)
        .set(Feature::ApplicationMode, record.application_mode as f64)
        .set(Feature::ApplicationOrder, record.application_order as f64)
        .set(Feature::Course, record.course as f64)
        .set(Feature::Attendance, record.attendance as f64)
        .set(
            Feature::PreviousQualification,
            record.previous_qualification as f64,
        )
        .set(
            Feature::MotherQualification,
            record.mother_qualification as f64,
        )
        .set(
            Feature::FatherQualification,
            record.father_qualification as f64,
        )
        .set(Feature::MotherOccupation, record.mother_occupation as f64)
        .set(Feature::Displaced, record.displaced as f64)
        .set(Feature::SpecialNeeds, record.special_needs as f64)
        .set(Feature::Debtor, record.debtor as f64)
        .set(Feature::TuitionUpToDate, record.tuition_up_to_date as f64)
        .set(Feature::Gender, record.gender as f64)
        .set(Feature::Scholarship, record.scholarship as f64)
        .set(Feature::AgeAtEnrollment, record.age_at_enrollment as f64)
        .set(
            Feature::Units1stWithoutEvaluations,
            record.units_1st_without_evaluations as f64,
        )
        .set(Feature::Units2ndCredited, record.units_2nd_credited as f64)
        .set(Feature::Units2ndEnrolled, record.units_2nd_enrolled as f64)
        .set(
            Feature::Units2ndEvaluations,
            record.units_2nd_evaluations as f64,
        )
        .set(Feature::Units2ndApproved, record.units_2nd_approved as f64)
        .set(Feature::Units2ndGrade, record.units_2nd_grade)
        .set(
            Feature::Units2ndWithoutEvaluations,
            record.units_2nd_without_evaluations as f64,
        )
        .set(Feature::UnemploymentRate, record.unemployment_rate)
        .set(Feature::InflationRate, record.inflation_rate)
        .set(Feature::Gdp, record.gdp);
    draft
}

/// Assemble the vector for one student record.
pub fn assemble_record(record: &StudentRecord) -> Result<FeatureVector, AppError> {
    draft_from_record(record).assemble()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_orders_slots_canonically_regardless_of_input_order() {
        let mut forward = FeatureDraft::new();
        for (i, feature) in Feature::ALL.iter().enumerate() {
            forward.set(*feature, i as f64);
        }

        let mut reversed = FeatureDraft::new();
        for (i, feature) in Feature::ALL.iter().enumerate().rev() {
            reversed.set(*feature, i as f64);
        }

        let a = forward.assemble().unwrap();
        let b = reversed.assemble().unwrap();
        assert_eq!(a, b);
        for (i, v) in a.values().iter().enumerate() {
            assert_eq!(*v, i as f64);
        }
    }

    #[test]
    fn assemble_rejects_missing_slot_by_name() {
        let mut draft = FeatureDraft::new();
        for feature in Feature::ALL {
            if feature != Feature::Gdp {
                draft.set(feature, 0.0);
            }
        }
        let err = draft.assemble().unwrap_err();
        assert!(err.to_string().contains("GDP"));
    }

    #[test]
    fn default_record_matches_expected_vector() {
        // Dropdowns at their default/zero codes, counts 0, grade 12.0,
        // age 20, rates (10.0, 1.0, 0.0).
        let vector = assemble_record(&StudentRecord::default()).unwrap();
        let expected = [
            1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 20.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 12.0, 0.0, 10.0, 1.0, 0.0,
        ];
        assert_eq!(vector.values(), &expected);
    }

    #[test]
    fn schema_names_match_training_columns() {
        assert_eq!(Feature::ALL.len(), FEATURE_COUNT);
        assert_eq!(Feature::MaritalStatus.name(), "Marital status");
        assert_eq!(Feature::Attendance.name(), "Daytime/evening attendance");
        assert_eq!(
            Feature::Units2ndWithoutEvaluations.name(),
            "Curricular units 2nd sem (without evaluations)"
        );
        assert_eq!(Feature::Gdp.index(), FEATURE_COUNT - 1);
    }
}
