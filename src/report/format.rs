//! Formatted terminal output for predictions and category tables.
//!
//! We keep formatting code in one place so:
//! - the assembly/inference code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{Prediction, StudentRecord};
use crate::registry::Category;

/// Format the full prediction report: input echo plus the outcome banner.
pub fn format_prediction_summary(record: &StudentRecord, prediction: Prediction) -> String {
    let mut out = String::new();

    out.push_str("=== gradcast - Student Outcome Prediction ===\n");

    out.push_str("\nPersonal & Demographic:\n");
    push_coded(&mut out, "Marital Status", Category::MaritalStatus, record.marital_status);
    push_coded(&mut out, "Gender", Category::Gender, record.gender);
    out.push_str(&format!("  Age at Enrollment: {}\n", record.age_at_enrollment));
    push_coded(&mut out, "Displaced", Category::YesNo, record.displaced);
    push_coded(&mut out, "Educational Special Needs", Category::YesNo, record.special_needs);
    push_coded(&mut out, "Debtor", Category::YesNo, record.debtor);
    push_coded(&mut out, "Tuition Fees Up to Date", Category::YesNo, record.tuition_up_to_date);
    push_coded(&mut out, "Scholarship Holder", Category::YesNo, record.scholarship);

    out.push_str("\nApplication & Course:\n");
    out.push_str(&format!("  Application Mode: {}\n", record.application_mode));
    out.push_str(&format!("  Application Order: {}\n", record.application_order));
    out.push_str(&format!("  Course: {}\n", record.course));
    push_coded(&mut out, "Attendance Time", Category::Attendance, record.attendance);
    out.push_str(&format!(
        "  Previous Qualification: {}\n",
        record.previous_qualification
    ));

    out.push_str("\nSocio-Economic:\n");
    push_coded(
        &mut out,
        "Mother's Qualification",
        Category::ParentQualification,
        record.mother_qualification,
    );
    push_coded(
        &mut out,
        "Father's Qualification",
        Category::ParentQualification,
        record.father_qualification,
    );
    push_coded(
        &mut out,
        "Mother's Occupation",
        Category::Occupation,
        record.mother_occupation,
    );
    out.push_str(&format!("  Unemployment Rate: {:.1}%\n", record.unemployment_rate));
    out.push_str(&format!("  Inflation Rate: {:.1}%\n", record.inflation_rate));
    out.push_str(&format!("  GDP: {:.1}\n", record.gdp));

    out.push_str("\nAcademic Performance:\n");
    out.push_str(&format!(
        "  Units 1st Sem (Without Evals): {}\n",
        record.units_1st_without_evaluations
    ));
    out.push_str(&format!("  Units 2nd Sem (Credited): {}\n", record.units_2nd_credited));
    out.push_str(&format!("  Units 2nd Sem (Enrolled): {}\n", record.units_2nd_enrolled));
    out.push_str(&format!(
        "  Units 2nd Sem (Evaluations): {}\n",
        record.units_2nd_evaluations
    ));
    out.push_str(&format!("  Units 2nd Sem (Approved): {}\n", record.units_2nd_approved));
    out.push_str(&format!("  Units 2nd Sem (Grade): {:.2}\n", record.units_2nd_grade));
    out.push_str(&format!(
        "  Units 2nd Sem (Without Evals): {}\n",
        record.units_2nd_without_evaluations
    ));

    out.push_str(&format!("\nPrediction: {}\n", prediction.display_name()));

    out
}

/// Echo one dropdown-backed field, preferring its label over the raw code.
fn push_coded(out: &mut String, field: &str, category: Category, code: i64) {
    match category.label_for(code) {
        Some(label) => out.push_str(&format!("  {field}: {label}\n")),
        None => out.push_str(&format!("  {field}: {code}\n")),
    }
}

/// Format every category's code/label table (the data the dropdowns render).
pub fn format_category_tables() -> String {
    let mut out = String::new();

    for category in Category::ALL {
        out.push_str(&format!("{}:\n", category.display_name()));
        for &(code, label) in category.pairs() {
            out.push_str(&format!("{code:>5}  {label}\n"));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_contains_outcome_and_labels() {
        let record = StudentRecord::default();
        let out = format_prediction_summary(&record, Prediction::Graduate);
        assert!(out.contains("Prediction: GRADUATE"));
        assert!(out.contains("Marital Status: 1 – Single"));
        assert!(out.contains("Gender: 0 – Female"));
    }

    #[test]
    fn category_tables_list_every_category() {
        let out = format_category_tables();
        for category in Category::ALL {
            assert!(out.contains(category.display_name()));
        }
        assert!(out.contains("6 – Legally separated"));
    }
}
