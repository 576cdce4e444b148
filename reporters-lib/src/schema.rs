//! Schema of `diff_reporters.csv`.
//!
//! The column list is the single source of truth for both the header check and
//! the per-row width check.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// Default input file, resolved against the current working directory
pub const DEFAULT_INPUT_FILE: &str = "diff_reporters.csv";

/// Expected headers for diff_reporters.csv in exact order
pub const EXPECTED_HEADERS: &[&str] = &["name", "path", "arguments", "file_types", "os", "group_name"];

/// Accepted values of the `file_types` column
pub const VALID_FILE_TYPES: &[&str] = &["TEXT", "IMAGE", "TEXT_AND_IMAGE"];

/// Accepted values of the `os` column (case-sensitive)
pub const VALID_OS: &[&str] = &["Mac", "Windows", "Linux"];

/// Uppercase letter first, then `A-Z0-9` segments joined by single underscores
pub const SCREAMING_SNAKE_PATTERN: &str = r"^[A-Z][A-Z0-9]*(_[A-Z0-9]+)*$";

static SCREAMING_SNAKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SCREAMING_SNAKE_PATTERN).expect("pattern is a valid regex"));

/// One data row of diff_reporters.csv, bound positionally to [`EXPECTED_HEADERS`].
///
/// Values are kept raw: a row is bound before any of its fields are checked,
/// so every field may still be empty or invalid.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReporterRow {
    /// Reporter identifier, expected in SCREAMING_SNAKE_CASE
    pub name: String,

    /// Executable path of the reporter
    pub path: String,

    /// Command-line arguments; free-form, may be empty
    pub arguments: String,

    /// One of [`VALID_FILE_TYPES`]
    pub file_types: String,

    /// One of [`VALID_OS`]
    pub os: String,

    /// Free-form grouping label, may be empty
    pub group_name: String,
}

impl ReporterRow {
    /// Composite key used for duplicate detection
    pub fn key(&self) -> (String, String) {
        (self.name.clone(), self.os.clone())
    }
}

/// Check whether `value` follows the SCREAMING_SNAKE_CASE naming convention
pub fn is_screaming_snake_case(value: &str) -> bool {
    SCREAMING_SNAKE_RE.is_match(value)
}
