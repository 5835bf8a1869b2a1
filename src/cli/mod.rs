//! CLI module for the marktest runner
//!
//! ## Usage
//!
//! - `marktest` - run the built-in sample suite
//! - `marktest <UNIT>` - run the unit registered under a fully-qualified name
//! - `marktest --list-units` - print the names of every runnable unit
//!
//! ## Modules
//!
//! - `catalog` - name → unit table
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod catalog;

use std::env;
use std::fmt;
use std::io::{self, Write};
use std::process;

use clap::{Parser, ValueEnum};

use crate::engine::{ConsoleReporter, JsonReporter, RunConfig};
use catalog::{Catalog, DEFAULT_UNIT};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// ASCII art logo - embedded at compile time from assets/logo.txt
const LOGO: &str = include_str!("../../assets/logo.txt");
const VERSION: &str = crate::version::MARKTEST_VERSION;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Output format for run events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MessageFormat {
    /// Colored, human-readable console output
    #[default]
    Human,
    /// One JSON object per event
    Json,
}

/// Marker-driven test discovery and execution
#[derive(Parser, Debug)]
#[command(name = "marktest")]
#[command(version = VERSION)]
#[command(about = "Discover and run marked test methods of a test unit", long_about = None)]
pub struct Cli {
    /// Fully-qualified name of the unit to run (default: the built-in sample suite)
    #[arg(value_name = "UNIT")]
    pub unit: Option<String>,

    /// Only run tests whose name contains KEYWORD
    #[arg(short = 'k', value_name = "KEYWORD")]
    pub filter: Option<String>,

    /// Show per-invocation timings
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable ANSI colors (also honoured via NO_COLOR)
    #[arg(long)]
    pub no_color: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,

    /// List runnable units and exit
    #[arg(long, conflicts_with = "unit")]
    pub list_units: bool,
}

impl Cli {
    /// Build the run configuration from flags and the environment.
    pub fn run_config(&self) -> RunConfig {
        let color = !self.no_color && env::var_os("NO_COLOR").is_none();
        let mut config = RunConfig::new().with_color(color).with_verbose(self.verbose);
        if let Some(keyword) = &self.filter {
            config = config.with_filter(keyword.clone());
        }
        config
    }

    /// The unit to run, trimmed, or the default sample suite.
    pub fn unit_name(&self) -> &str {
        self.unit.as_deref().map(str::trim).unwrap_or(DEFAULT_UNIT)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli, &Catalog::builtin(), io::stdout()) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
///
/// Everything the run reports is written to `out`. Exits successfully only when every invocation passed.
/// Any FAIL or ERROR, or a unit that cannot be constructed, produces `ExitCode::FAILURE`; the reporter has
/// already printed the details, so the error message is empty.
pub fn execute<W: Write>(cli: Cli, catalog: &Catalog, mut out: W) -> CliResult<ExitCode> {
    if cli.list_units {
        for name in catalog.names() {
            writeln!(out, "{name}").map_err(|e| CliError::failure(format!("failed to write unit list: {e}")))?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = cli.run_config();
    let result = match cli.message_format {
        MessageFormat::Human => {
            print_logo(&mut out, config.color);
            catalog.run(cli.unit_name(), &config, &mut ConsoleReporter::with_writer(out, &config))
        }
        MessageFormat::Json => catalog.run(cli.unit_name(), &config, &mut JsonReporter::with_writer(out)),
    };

    match result {
        Ok(tally) if tally.is_success() => Ok(ExitCode::SUCCESS),
        Ok(_) | Err(_) => Err(CliError::failure("")),
    }
}

/// Print the logo, cyan when colors are enabled
fn print_logo(out: &mut impl Write, color: bool) {
    let (cyan, reset) = if color { ("\x1b[36m", "\x1b[0m") } else { ("", "") };
    let _ = writeln!(out, "{cyan}");
    for line in LOGO.lines() {
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out, "{reset}");
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_default() {
        let cli = Cli::try_parse_from(["marktest"]).unwrap();
        assert_eq!(cli.unit, None);
        assert_eq!(cli.unit_name(), DEFAULT_UNIT);
        assert_eq!(cli.message_format, MessageFormat::Human);
    }

    #[test]
    fn test_cli_parse_unit_is_trimmed() {
        let cli = Cli::try_parse_from(["marktest", "  my::Unit "]).unwrap();
        assert_eq!(cli.unit_name(), "my::Unit");
    }

    #[test]
    fn test_cli_parse_flags() {
        let cli = Cli::try_parse_from([
            "marktest",
            "-v",
            "-k",
            "add",
            "--no-color",
            "--message-format",
            "json",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert_eq!(cli.filter.as_deref(), Some("add"));
        assert_eq!(cli.message_format, MessageFormat::Json);

        let config = cli.run_config();
        assert!(!config.color);
        assert!(config.verbose);
        assert_eq!(config.filter.as_deref(), Some("add"));
    }

    #[test]
    fn test_cli_list_units_conflicts_with_unit() {
        assert!(Cli::try_parse_from(["marktest", "--list-units", "x::Y"]).is_err());
    }

    fn json_lines(out: &[u8]) -> Vec<serde_json::Value> {
        String::from_utf8_lossy(out)
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_execute_unknown_unit_fails() {
        let cli = Cli::try_parse_from(["marktest", "--message-format", "json", "no::Such"]).unwrap();
        let mut out = Vec::new();
        let err = execute(cli, &Catalog::builtin(), &mut out).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.is_empty());
        assert_eq!(json_lines(&out)[1]["event"], "construction_failed");
    }

    #[test]
    fn test_execute_sample_suite_reports_failure() {
        // The sample suite contains one FAIL and one ERROR by construction
        let cli = Cli::try_parse_from(["marktest", "--message-format", "json"]).unwrap();
        let mut out = Vec::new();
        let err = execute(cli, &Catalog::builtin(), &mut out).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert_eq!(json_lines(&out).last().unwrap()["failed"], 1);
    }

    #[test]
    fn test_execute_list_units_succeeds() {
        let cli = Cli::try_parse_from(["marktest", "--list-units"]).unwrap();
        let mut out = Vec::new();
        assert_eq!(execute(cli, &Catalog::builtin(), &mut out).unwrap(), ExitCode::SUCCESS);
        assert!(String::from_utf8(out).unwrap().lines().any(|name| name == DEFAULT_UNIT));
    }

    #[test]
    fn test_execute_filtered_passing_run_succeeds() {
        let cli = Cli::try_parse_from(["marktest", "--message-format", "json", "-k", "toUpper"]).unwrap();
        let mut out = Vec::new();
        assert_eq!(execute(cli, &Catalog::builtin(), &mut out).unwrap(), ExitCode::SUCCESS);
        assert_eq!(json_lines(&out).last().unwrap()["passed"], 2);
    }

    #[test]
    fn test_execute_human_output_goes_to_writer() {
        let cli = Cli::try_parse_from(["marktest", "--no-color", "-k", "simple"]).unwrap();
        let mut out = Vec::new();
        assert_eq!(execute(cli, &Catalog::builtin(), &mut out).unwrap(), ExitCode::SUCCESS);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Loading class: marktest::suites::SampleSuite..."));
        assert!(text.contains(&format!("  Test: {:<30}[PASS]", "simpleTest()")));
    }
}
