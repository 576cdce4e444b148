use serde::Serialize;
use std::path::Path;

use crate::csv_validator::{ValidationError, ValidationOutcome};
use crate::utils::get_utc_iso_datetime;

/// Machine-readable report printed by `--format json`
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub file: String,
    pub valid: bool,
    pub rows_checked: usize,
    pub rows_skipped: usize,
    pub errors: &'a [ValidationError],
}

impl<'a> JsonReport<'a> {
    pub fn new(file: &Path, outcome: &'a ValidationOutcome) -> Self {
        JsonReport {
            file: file.display().to_string(),
            valid: outcome.is_valid(),
            rows_checked: outcome.rows_checked,
            rows_skipped: outcome.rows_skipped,
            errors: &outcome.errors,
        }
    }
}

/// Format a validation outcome into a structured string for the errors log
pub fn format_validation_report(file: &Path, outcome: &ValidationOutcome) -> String {
    let mut report = String::new();

    // Add title and separator
    report.push_str("=============================\n");
    report.push_str(&format!("File: {}\n", file.display()));
    report.push_str(&format!("Generated at: {}\n\n", get_utc_iso_datetime()));
    report.push_str(&format!("{}\n\n", outcome.summary()));

    report.push_str("Errors:\n");
    for error in &outcome.errors {
        report.push_str(&format!("  - {}\n", error));
    }

    report
}
