// Test utilities available to both unit and integration tests
// Only compiled when testing

use crate::csv_validator::{ValidationOutcome, validate_reader};
use crate::schema::EXPECTED_HEADERS;

/// The header row exactly as diff_reporters.csv must start
pub fn valid_header_line() -> String {
    EXPECTED_HEADERS.join(",")
}

/// Build a CSV document from the expected header and the given raw data lines
pub fn csv_document(rows: &[&str]) -> String {
    csv_document_with_header(&valid_header_line(), rows)
}

/// Build a CSV document from an explicit header line and raw data lines
pub fn csv_document_with_header(header: &str, rows: &[&str]) -> String {
    let mut document = String::from(header);
    document.push('\n');
    for row in rows {
        document.push_str(row);
        document.push('\n');
    }
    document
}

/// Validate the given data lines under the expected header
#[allow(dead_code)]
pub fn validate_rows(rows: &[&str]) -> ValidationOutcome {
    validate_document(&csv_document(rows))
}

/// Validate a complete in-memory CSV document that is known to be well-formed
#[allow(dead_code)]
pub fn validate_document(document: &str) -> ValidationOutcome {
    validate_reader(document.as_bytes()).expect("test document should be well-formed CSV")
}

/// Rendered messages of an outcome, in discovery order
#[allow(dead_code)]
pub fn error_messages(outcome: &ValidationOutcome) -> Vec<String> {
    outcome.errors.iter().map(|e| e.to_string()).collect()
}

/// Build one data line from its six fields
#[allow(dead_code)]
pub fn reporter_line(name: &str, path: &str, file_types: &str, os: &str) -> String {
    format!("{name},{path},,{file_types},{os},group")
}
