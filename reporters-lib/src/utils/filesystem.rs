use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::utils::get_utc_iso_datetime;

/// Centralized function to append error messages to an errors log file
///
/// # Arguments
/// * `log_path` - The log file; created when missing, appended to otherwise
/// * `error_type` - A description of the error type/category (e.g., "Reporter CSV Validation Error Report")
/// * `error_message` - The actual error message content
pub fn write_error_to_log(
    log_path: &Path,
    error_type: &str,
    error_message: &str,
) -> std::io::Result<()> {
    let timestamp = get_utc_iso_datetime();
    let log_entry = format!("\n[{}] {}:\n{}\n", timestamp, error_type, error_message);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;
    writeln!(file, "{}", log_entry)
}
