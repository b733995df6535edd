//! CLI module for fruitrun
//!
//! ```text
//! fruitrun <SOURCE> <DRIVER> [BUILD_COMMAND]
//! fruitrun --list <SOURCE>
//! ```
//!
//! The first form scans `SOURCE`, writes the driver to `DRIVER`, builds it with `BUILD_COMMAND`
//! (default `make`), runs it, and prints the summary. `--list` prints the discovered test cases
//! without building anything.
//!
//! ## Design
//!
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::config::DEFAULT_BUILD_COMMAND;
use crate::version::FRUITRUN_VERSION;

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

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate, build and run a FRUIT test driver
#[derive(Parser, Debug)]
#[command(name = "fruitrun")]
#[command(version = FRUITRUN_VERSION)]
#[command(about = "Generate, build and run a FRUIT unit-test driver", long_about = None)]
pub struct Cli {
    /// Fortran source containing the test module
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Path to write the generated driver program to (e.g. tests.f90)
    #[arg(value_name = "DRIVER", required_unless_present = "list")]
    pub driver: Option<PathBuf>,

    /// Shell command that builds the driver executable
    #[arg(value_name = "BUILD_COMMAND", default_value = DEFAULT_BUILD_COMMAND)]
    pub build_command: String,

    /// List discovered test cases and exit without building
    #[arg(long, conflicts_with = "driver")]
    pub list: bool,
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

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code != ExitCode::SUCCESS {
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
fn execute(cli: Cli) -> CliResult<ExitCode> {
    if cli.list {
        return commands::list_tests(&cli.source);
    }
    match cli.driver {
        Some(driver) => commands::build_run(&cli.source, &driver, &cli.build_command),
        None => Err(CliError::failure("Error: a driver path is required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_command_defaults_to_make() {
        let cli = Cli::try_parse_from(["fruitrun", "foo_test.f90", "tests.f90"]).unwrap();
        assert_eq!(cli.source, PathBuf::from("foo_test.f90"));
        assert_eq!(cli.driver, Some(PathBuf::from("tests.f90")));
        assert_eq!(cli.build_command, "make");
        assert!(!cli.list);
    }

    #[test]
    fn test_explicit_build_command() {
        let cli = Cli::try_parse_from(["fruitrun", "a.f90", "tests.f90", "make tests"]).unwrap();
        assert_eq!(cli.build_command, "make tests");
    }

    #[test]
    fn test_driver_is_required() {
        assert!(Cli::try_parse_from(["fruitrun", "a.f90"]).is_err());
    }

    #[test]
    fn test_list_needs_only_source() {
        let cli = Cli::try_parse_from(["fruitrun", "--list", "a.f90"]).unwrap();
        assert!(cli.list);
        assert_eq!(cli.driver, None);
    }
}
