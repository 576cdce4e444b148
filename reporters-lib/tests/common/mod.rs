// Re-export shared test utilities from src/test_utils.rs
// These are the core functions used by most tests
#[allow(unused_imports)]
pub use reporters_lib::test_utils::{
    csv_document, csv_document_with_header, error_messages, reporter_line, validate_document,
    validate_rows,
};

use reporters_lib::{RuleViolation, ValidationOutcome};

/// Rule kinds of an outcome, in discovery order
#[allow(dead_code)]
pub fn error_kinds(outcome: &ValidationOutcome) -> Vec<&'static str> {
    outcome.errors.iter().map(|e| e.violation.kind()).collect()
}

/// Lines that received a duplicate-key error
#[allow(dead_code)]
pub fn duplicate_lines(outcome: &ValidationOutcome) -> Vec<u64> {
    outcome
        .errors
        .iter()
        .filter(|e| matches!(e.violation, RuleViolation::DuplicateKey { .. }))
        .map(|e| e.line)
        .collect()
}
