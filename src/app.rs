//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the scaler/model artifacts once at startup
//! - runs the predict pipeline
//! - prints reports
//! - launches the TUI form

use clap::Parser;

use crate::cli::{ArtifactArgs, Command, PredictArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `gradcast` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `gradcast` (and `gradcast --model m.json`) to behave
    // like `gradcast tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Predict(args) => handle_predict(args),
        Command::Labels => handle_labels(),
        Command::Check(args) => handle_check(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let artifacts = pipeline::Artifacts::load(&args.artifacts.paths())?;
    let record = args.to_record();
    let output = pipeline::run_predict(&artifacts, &record)?;

    println!(
        "{}",
        crate::report::format_prediction_summary(&record, output.prediction)
    );
    Ok(())
}

fn handle_labels() -> Result<(), AppError> {
    println!("{}", crate::report::format_category_tables());
    Ok(())
}

fn handle_check(args: ArtifactArgs) -> Result<(), AppError> {
    let paths = args.paths();
    pipeline::Artifacts::load(&paths)?;
    println!(
        "Artifacts ready: model '{}', scaler '{}'.",
        paths.model.display(),
        paths.scaler.display()
    );
    Ok(())
}

/// Rewrite argv so `gradcast` defaults to `gradcast tui`.
///
/// Rules:
/// - `gradcast`                       -> `gradcast tui`
/// - `gradcast --model m.json ...`    -> `gradcast tui --model m.json ...`
/// - `gradcast --help/--version/-h`   -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "predict" | "labels" | "check" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(args: &[&str]) -> Vec<String> {
        rewrite_args(args.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite(&["gradcast"]), vec!["gradcast", "tui"]);
    }

    #[test]
    fn leading_flag_goes_to_tui() {
        assert_eq!(
            rewrite(&["gradcast", "--model", "m.json"]),
            vec!["gradcast", "tui", "--model", "m.json"]
        );
    }

    #[test]
    fn explicit_subcommands_pass_through() {
        assert_eq!(rewrite(&["gradcast", "predict"]), vec!["gradcast", "predict"]);
        assert_eq!(rewrite(&["gradcast", "--help"]), vec!["gradcast", "--help"]);
    }
}
