//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::Path;

use crate::config::HarnessConfig;
use crate::errors::HarnessError;
use crate::harness::{ConsoleReporter, Harness, TestSuite};

use super::{CliError, CliResult, ExitCode};

/// Scan `source`, write the driver to `driver`, build it with `command`, run it and report.
///
/// Exits with failure when the build produced nothing or any test failed.
pub fn build_run(source: &Path, driver: &Path, command: &str) -> CliResult<ExitCode> {
    let mut suite = TestSuite::load([source]).map_err(diagnostic)?;
    let harness = Harness::new(HarnessConfig::default());
    let passed = harness
        .build_run(&mut suite, driver, command, &mut ConsoleReporter::new())
        .map_err(diagnostic)?;
    Ok(if passed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Print the test cases discovered in `source`.
pub fn list_tests(source: &Path) -> CliResult<ExitCode> {
    let suite = TestSuite::load([source]).map_err(diagnostic)?;
    println!("{}", suite.model());
    Ok(ExitCode::SUCCESS)
}

/// Render a harness error with its diagnostic context.
fn diagnostic(err: HarnessError) -> CliError {
    CliError::failure(format!("{:?}", miette::Report::new(err)))
}
