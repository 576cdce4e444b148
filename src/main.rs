// cargo run
// cargo run -- --errors-log=ci-errors.log --format json ./config/diff_reporters.csv

use anyhow::Context;
use clap::{Parser, ValueEnum};
use reporters_lib::report::{JsonReport, format_validation_report};
use reporters_lib::utils::write_error_to_log;
use reporters_lib::{DEFAULT_INPUT_FILE, ERRORS_LOG_FILE, ValidationOutcome, validate_path};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Exit status when at least one rule is violated
const EXIT_INVALID: u8 = 1;
/// Exit status when the file cannot be read or parsed at all
const EXIT_UNREADABLE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One `Line <n>: <description>` per error, or a single success line
    Text,
    /// A JSON document with the full outcome
    Json,
}

#[derive(Parser)]
#[command(name = "diff-reporters-check")]
#[command(about = "A tool to validate the diff reporters CSV against its schema")]
#[command(version)]
struct Args {
    /// Path to the CSV file to validate
    #[arg(default_value = DEFAULT_INPUT_FILE)]
    file: PathBuf,

    /// Append a timestamped error report to this file when validation fails (`--errors-log=PATH`; errors.log when given without a value)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = ERRORS_LOG_FILE)]
    errors_log: Option<PathBuf>,

    /// Output format of the report written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> ExitCode {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let arguments = Args::parse();

    match run(&arguments) {
        Ok(code) => code,
        Err(e) => {
            warn!("validation aborted");
            if let Some(log_path) = &arguments.errors_log {
                log_report(log_path, "Reporter CSV Format Error", &format!("{e:#}"));
            }
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_UNREADABLE)
        }
    }
}

fn run(arguments: &Args) -> anyhow::Result<ExitCode> {
    let outcome = validate_path(&arguments.file)
        .with_context(|| format!("cannot validate {}", arguments.file.display()))?;
    info!(file = %arguments.file.display(), "{}", outcome.summary());

    print_outcome(&arguments.file, &outcome, arguments.format)?;

    if outcome.is_valid() {
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(log_path) = &arguments.errors_log {
        let report = format_validation_report(&arguments.file, &outcome);
        log_report(log_path, "Reporter CSV Validation Error Report", &report);
    }

    Ok(ExitCode::from(EXIT_INVALID))
}

fn print_outcome(file: &Path, outcome: &ValidationOutcome, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if outcome.is_valid() {
                println!("{} is valid.", file.display());
            } else {
                for error in &outcome.errors {
                    println!("{error}");
                }
            }
        }
        OutputFormat::Json => {
            let report = JsonReport::new(file, outcome);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

// A failing log write must not change the validation verdict
fn log_report(log_path: &Path, error_type: &str, report: &str) {
    if let Err(e) = write_error_to_log(log_path, error_type, report) {
        warn!(path = %log_path.display(), "failed to write errors log: {e}");
    }
}
