//! Formatted terminal output.

mod format;

pub use format::{format_category_tables, format_prediction_summary};
