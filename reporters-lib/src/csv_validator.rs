use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::quoting::check_strict_quoting;
use crate::schema::{
    EXPECTED_HEADERS, ReporterRow, VALID_FILE_TYPES, VALID_OS, is_screaming_snake_case,
};
use crate::utils::format_value_set;

/// A rule broken by the header or by a data row. Rendered without the line prefix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("header mismatch: expected {expected:?}, got {actual:?}")]
    HeaderMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("expected {expected} columns, got {actual}")]
    ColumnCount { expected: usize, actual: usize },

    #[error("{field} is empty")]
    EmptyField { field: &'static str },

    #[error("name '{value}' is not SCREAMING_SNAKE_CASE")]
    NotScreamingSnakeCase { value: String },

    #[error("{field} '{value}' not in {}", format_value_set(.allowed))]
    NotAllowed {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("duplicate name+os pair ('{name}', '{os}')")]
    DuplicateKey { name: String, os: String },
}

impl RuleViolation {
    /// Stable machine-readable identifier of the broken rule
    pub fn kind(&self) -> &'static str {
        match self {
            RuleViolation::HeaderMismatch { .. } => "header_mismatch",
            RuleViolation::ColumnCount { .. } => "column_count",
            RuleViolation::EmptyField { .. } => "empty_field",
            RuleViolation::NotScreamingSnakeCase { .. } => "naming_convention",
            RuleViolation::NotAllowed { .. } => "not_allowed",
            RuleViolation::DuplicateKey { .. } => "duplicate_key",
        }
    }
}

/// A violation bound to the line of the record it was found on.
///
/// `line` is the 1-based physical line where the record starts, so a quoted
/// field spanning several lines shifts the numbers of the records after it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Line {line}: {violation}")]
pub struct ValidationError {
    pub line: u64,
    pub violation: RuleViolation,
}

impl Serialize for ValidationError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ValidationError", 3)?;
        state.serialize_field("line", &self.line)?;
        state.serialize_field("kind", self.violation.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Failures that stop the scan before a report can be produced
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("the file is empty (0 bytes), expected a header row")]
    EmptyInput,

    #[error("Line {line}: malformed record: {message}")]
    MalformedRecord { line: u64, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of one validation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationOutcome {
    /// Every violation, in the order discovered
    pub errors: Vec<ValidationError>,
    /// Data rows that went through the rule checks (including wrong-width rows)
    pub rows_checked: usize,
    /// All-empty rows that were skipped
    pub rows_skipped: usize,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} error(s) in {} checked row(s), {} blank row(s) skipped",
            self.errors.len(),
            self.rows_checked,
            self.rows_skipped
        )
    }
}

/// Accumulates rule violations across the records of one file.
///
/// Feed the header to [`CsvValidator::check_header`], then every data record
/// to [`CsvValidator::check_record`] in file order, then call
/// [`CsvValidator::finish`].
#[derive(Debug, Default)]
pub struct CsvValidator {
    seen_keys: HashSet<(String, String)>,
    outcome: ValidationOutcome,
}

impl CsvValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare the header record, as an ordered sequence, to [`EXPECTED_HEADERS`]
    pub fn check_header(&mut self, line: u64, header: &StringRecord) {
        if header.iter().eq(EXPECTED_HEADERS.iter().copied()) {
            return;
        }

        self.push(
            line,
            RuleViolation::HeaderMismatch {
                expected: EXPECTED_HEADERS.iter().map(|h| h.to_string()).collect(),
                actual: header.iter().map(|h| h.to_string()).collect(),
            },
        );
    }

    /// Run the row rules against one data record
    pub fn check_record(&mut self, line: u64, record: &StringRecord) -> Result<(), FormatError> {
        if record.iter().all(str::is_empty) {
            debug!(line, "skipping blank row");
            self.outcome.rows_skipped += 1;
            return Ok(());
        }

        self.outcome.rows_checked += 1;

        if record.len() != EXPECTED_HEADERS.len() {
            self.push(
                line,
                RuleViolation::ColumnCount {
                    expected: EXPECTED_HEADERS.len(),
                    actual: record.len(),
                },
            );
            return Ok(());
        }

        let row: ReporterRow = record.deserialize(None)?;
        self.check_row(line, &row);
        Ok(())
    }

    /// Field and cross-row rules for a row of the correct width
    pub fn check_row(&mut self, line: u64, row: &ReporterRow) {
        if row.name.is_empty() {
            self.push(line, RuleViolation::EmptyField { field: "name" });
        } else if !is_screaming_snake_case(&row.name) {
            self.push(
                line,
                RuleViolation::NotScreamingSnakeCase {
                    value: row.name.clone(),
                },
            );
        }

        if row.path.is_empty() {
            self.push(line, RuleViolation::EmptyField { field: "path" });
        }

        self.check_allowed(line, "file_types", &row.file_types, VALID_FILE_TYPES);
        self.check_allowed(line, "os", &row.os, VALID_OS);

        // The key counts as seen even when the row is invalid or a repeat
        let key = row.key();
        if self.seen_keys.contains(&key) {
            self.push(
                line,
                RuleViolation::DuplicateKey {
                    name: key.0.clone(),
                    os: key.1.clone(),
                },
            );
        }
        self.seen_keys.insert(key);
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.outcome.errors
    }

    pub fn finish(self) -> ValidationOutcome {
        self.outcome
    }

    //////////////////////////////////////////////////////////////
    ///  Private methods
    //////////////////////////////////////////////////////////////
    fn check_allowed(
        &mut self,
        line: u64,
        field: &'static str,
        value: &str,
        allowed: &'static [&'static str],
    ) {
        if value.is_empty() {
            self.push(line, RuleViolation::EmptyField { field });
        } else if !allowed.contains(&value) {
            self.push(
                line,
                RuleViolation::NotAllowed {
                    field,
                    value: value.to_string(),
                    allowed,
                },
            );
        }
    }

    fn push(&mut self, line: u64, violation: RuleViolation) {
        debug!(line, kind = violation.kind(), "rule violated");
        self.outcome.errors.push(ValidationError { line, violation });
    }
}

/// Validate a complete reporter CSV document read from `reader`.
///
/// Rule violations are collected into the returned [`ValidationOutcome`];
/// only unreadable input (I/O, encoding, malformed quoting, no header) is an `Err`.
pub fn validate_reader<R: Read>(mut reader: R) -> Result<ValidationOutcome, FormatError> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    if input.is_empty() {
        return Err(FormatError::EmptyInput);
    }
    check_strict_quoting(&input)?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input.as_slice());

    let mut records = rdr.records();
    let mut validator = CsvValidator::new();

    // The reader drops blank lines, so a first record past line 1 means the
    // header line itself was empty and that record is data
    match records.next().transpose()? {
        Some(header) if record_line(&header, 1) == 1 => validator.check_header(1, &header),
        first => {
            validator.check_header(1, &StringRecord::new());
            if let Some(record) = first {
                validator.check_record(record_line(&record, 2), &record)?;
            }
        }
    }

    // Records without a position fall back to their ordinal line
    for (index, result) in records.enumerate() {
        let record = result?;
        let line = record_line(&record, index as u64 + 2);
        validator.check_record(line, &record)?;
    }

    let outcome = validator.finish();
    info!("{}", outcome.summary());
    Ok(outcome)
}

/// Open `path` and validate it with [`validate_reader`]
pub fn validate_path<P: AsRef<Path>>(path: P) -> Result<ValidationOutcome, FormatError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "validating reporter file");
    let file = File::open(path)?;
    validate_reader(file)
}

fn record_line(record: &StringRecord, fallback: u64) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(fallback)
}
