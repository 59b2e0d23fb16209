//! Command-line parsing for the student outcome predictor.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the assembly/inference code.
//!
//! Numeric domain constraints live here (and in the TUI) as value parsers:
//! the assembler trusts that collected inputs are already within domain.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{ArtifactPaths, StudentRecord};
use crate::registry::Category;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gradcast", version, about = "Student Dropout/Graduate Predictor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict the outcome for one student from flag-supplied fields.
    Predict(PredictArgs),
    /// Print the categorical code/label tables the form renders.
    Labels,
    /// Load the artifacts and report readiness.
    Check(ArtifactArgs),
    /// Launch the interactive form.
    ///
    /// This uses the same underlying predict pipeline as `gradcast predict`,
    /// but collects inputs in a terminal UI using Ratatui.
    Tui(ArtifactArgs),
}

/// Locations of the externally trained artifacts.
#[derive(Debug, Args, Clone)]
pub struct ArtifactArgs {
    /// Path to the trained model artifact.
    #[arg(long, default_value = "best_model.json")]
    pub model: PathBuf,

    /// Path to the fitted scaler artifact.
    #[arg(long, default_value = "scaler.json")]
    pub scaler: PathBuf,
}

impl ArtifactArgs {
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.model.clone(),
            scaler: self.scaler.clone(),
        }
    }
}

/// All 26 student fields, as flags with the form's defaults.
#[derive(Debug, Parser, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// Marital status code (1-6).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(i64).range(1..=6))]
    pub marital_status: i64,

    /// Application mode code (e.g. 1, 17, 44).
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..))]
    pub application_mode: i64,

    /// Application order (0-9).
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..=9))]
    pub application_order: i64,

    /// Course code (e.g. 9119, 9003).
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..))]
    pub course: i64,

    /// Attendance time: 1 daytime, 0 evening.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(i64).range(0..=1))]
    pub attendance: i64,

    /// Previous qualification code (e.g. 1, 40).
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..))]
    pub previous_qualification: i64,

    /// Mother's qualification code (see `gradcast labels`).
    #[arg(long, default_value_t = 1, value_parser = parse_parent_qualification)]
    pub mother_qualification: i64,

    /// Father's qualification code (see `gradcast labels`).
    #[arg(long, default_value_t = 1, value_parser = parse_parent_qualification)]
    pub father_qualification: i64,

    /// Mother's occupation code (see `gradcast labels`).
    #[arg(long, default_value_t = 0, value_parser = parse_occupation)]
    pub mother_occupation: i64,

    /// Displaced (living away): 1 yes, 0 no.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..=1))]
    pub displaced: i64,

    /// Educational special needs: 1 yes, 0 no.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..=1))]
    pub special_needs: i64,

    /// Debtor: 1 yes, 0 no.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..=1))]
    pub debtor: i64,

    /// Tuition fees up to date: 1 yes, 0 no.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..=1))]
    pub tuition_up_to_date: i64,

    /// Gender: 1 male, 0 female.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..=1))]
    pub gender: i64,

    /// Scholarship holder: 1 yes, 0 no.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..=1))]
    pub scholarship: i64,

    /// Age at enrollment (17-80).
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i64).range(17..=80))]
    pub age_at_enrollment: i64,

    /// Curricular units 1st sem (without evaluations).
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..))]
    pub units_1st_without_evaluations: i64,

    /// Curricular units 2nd sem (credited).
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..))]
    pub units_2nd_credited: i64,

    /// Curricular units 2nd sem (enrolled).
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..))]
    pub units_2nd_enrolled: i64,

    /// Curricular units 2nd sem (evaluations).
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..))]
    pub units_2nd_evaluations: i64,

    /// Curricular units 2nd sem (approved).
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..))]
    pub units_2nd_approved: i64,

    /// Curricular units 2nd sem (grade).
    #[arg(long, default_value_t = 12.0)]
    pub units_2nd_grade: f64,

    /// Curricular units 2nd sem (without evaluations).
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..))]
    pub units_2nd_without_evaluations: i64,

    /// Unemployment rate (%).
    #[arg(long, default_value_t = 10.0)]
    pub unemployment_rate: f64,

    /// Inflation rate (%).
    #[arg(long, default_value_t = 1.0)]
    pub inflation_rate: f64,

    /// GDP.
    #[arg(long, default_value_t = 0.0)]
    pub gdp: f64,
}

impl PredictArgs {
    pub fn to_record(&self) -> StudentRecord {
        StudentRecord {
            marital_status: self.marital_status,
            application_mode: self.application_mode,
            application_order: self.application_order,
            course: self.course,
            attendance: self.attendance,
            previous_qualification: self.previous_qualification,
            mother_qualification: self.mother_qualification,
            father_qualification: self.father_qualification,
            mother_occupation: self.mother_occupation,
            displaced: self.displaced,
            special_needs: self.special_needs,
            debtor: self.debtor,
            tuition_up_to_date: self.tuition_up_to_date,
            gender: self.gender,
            scholarship: self.scholarship,
            age_at_enrollment: self.age_at_enrollment,
            units_1st_without_evaluations: self.units_1st_without_evaluations,
            units_2nd_credited: self.units_2nd_credited,
            units_2nd_enrolled: self.units_2nd_enrolled,
            units_2nd_evaluations: self.units_2nd_evaluations,
            units_2nd_approved: self.units_2nd_approved,
            units_2nd_grade: self.units_2nd_grade,
            units_2nd_without_evaluations: self.units_2nd_without_evaluations,
            unemployment_rate: self.unemployment_rate,
            inflation_rate: self.inflation_rate,
            gdp: self.gdp,
        }
    }
}

/// Parse a code that must exist in the parental-qualification table.
fn parse_parent_qualification(s: &str) -> Result<i64, String> {
    parse_registry_code(s, Category::ParentQualification)
}

/// Parse a code that must exist in the occupation table.
fn parse_occupation(s: &str) -> Result<i64, String> {
    parse_registry_code(s, Category::Occupation)
}

fn parse_registry_code(s: &str, category: Category) -> Result<i64, String> {
    let code: i64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not an integer code"))?;
    if category.contains_code(code) {
        Ok(code)
    } else {
        Err(format!(
            "{code} is not a known {} code (see `gradcast labels`)",
            category.display_name()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_predict_args_match_default_record() {
        let cli = Cli::parse_from(["gradcast", "predict"]);
        let Command::Predict(args) = cli.command else {
            panic!("expected predict subcommand");
        };
        let record = args.to_record();
        let default = StudentRecord::default();
        assert_eq!(record.marital_status, default.marital_status);
        assert_eq!(record.age_at_enrollment, default.age_at_enrollment);
        assert_eq!(record.units_2nd_grade, default.units_2nd_grade);
        assert_eq!(record.unemployment_rate, default.unemployment_rate);
    }

    #[test]
    fn out_of_range_age_is_rejected() {
        let result = Cli::try_parse_from(["gradcast", "predict", "--age-at-enrollment", "16"]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_occupation_code_is_rejected() {
        let result = Cli::try_parse_from(["gradcast", "predict", "--mother-occupation", "42"]);
        assert!(result.is_err());
    }

    #[test]
    fn known_occupation_code_is_accepted() {
        let cli = Cli::parse_from(["gradcast", "predict", "--mother-occupation", "122"]);
        let Command::Predict(args) = cli.command else {
            panic!("expected predict subcommand");
        };
        assert_eq!(args.mother_occupation, 122);
    }
}
