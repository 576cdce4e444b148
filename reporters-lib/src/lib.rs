#![allow(clippy::needless_return)]

mod csv_validator;
mod quoting;
pub mod report;
pub mod schema;
pub mod utils;

// Test utilities - only compiled when testing or with test feature
// #[cfg(test)] alone doesn't work for integration tests (they're external crates)
// The feature flag makes it available to integration tests via dev-dependencies
#[cfg(any(test, feature = "test"))]
pub mod test_utils;

pub use csv_validator::{
    CsvValidator, FormatError, RuleViolation, ValidationError, ValidationOutcome, validate_path,
    validate_reader,
};
pub use quoting::check_strict_quoting;
pub use schema::{DEFAULT_INPUT_FILE, EXPECTED_HEADERS, ReporterRow, is_screaming_snake_case};

pub const ERRORS_LOG_FILE: &str = "errors.log";
