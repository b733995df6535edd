//! Errors raised by the harness pipeline
//!
//! Scan errors keep their `miette` diagnostics so the CLI can render them with source context.
//! Build failures are not errors: a missing executable is reported through `BuildOutcome`.

use std::io;
use std::path::PathBuf;

use fruitrun_syntax::ScanError;
use miette::Diagnostic;
use thiserror::Error;

use crate::results::OutputError;

/// Result type for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;

#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Scan(#[from] ScanError),

    #[error("failed to read test source '{path}': {source}")]
    #[diagnostic(code(fruitrun::io::read_source))]
    ReadSource { path: PathBuf, source: io::Error },

    #[error("driver path '{0}' has no file extension")]
    #[diagnostic(
        code(fruitrun::driver::no_extension),
        help("the executable and output names are derived by replacing the extension, e.g. `tests.f90`")
    )]
    DriverExtension(PathBuf),

    #[error("failed to write driver '{path}': {source}")]
    #[diagnostic(code(fruitrun::io::write_driver))]
    WriteDriver { path: PathBuf, source: io::Error },

    #[error("failed to remove stale executable '{path}': {source}")]
    #[diagnostic(code(fruitrun::io::stale_executable))]
    StaleExecutable { path: PathBuf, source: io::Error },

    #[error("failed to launch `{command}`: {source}")]
    #[diagnostic(code(fruitrun::process::spawn))]
    Spawn { command: String, source: io::Error },

    #[error("failed to read test output '{path}': {source}")]
    #[diagnostic(code(fruitrun::io::read_output))]
    ReadOutput { path: PathBuf, source: io::Error },

    #[error(transparent)]
    #[diagnostic(code(fruitrun::output::malformed))]
    Output(#[from] OutputError),
}
