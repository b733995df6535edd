#![forbid(unsafe_code)]
//! fruitrun: driver generator and runner for FRUIT Fortran unit tests
//!
//! Given Fortran sources containing `test_*` subroutines, fruitrun scans them for test cases and
//! setup/teardown hooks, writes a driver program calling the FRUIT runner, builds it with a
//! caller-supplied command, runs it, and reads the pass/fail statistics back from its output.
//!
//! ## Pipeline
//!
//! 1. [`suite::SuiteModel::load`] scans each source with [`fruitrun_syntax::parser::parse`]
//! 2. [`backend::render`] turns the suite into driver text
//! 3. [`harness::DriverBuilder`] and [`harness::DriverRunner`] build and run it
//! 4. [`results::parse`] extracts a [`results::SuiteResult`] from the captured output
//!
//! [`harness::Harness::build_run`] runs all of it in order.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod backend;
pub mod cli;
pub mod config;
pub mod errors;
pub mod harness;
pub mod results;
pub mod suite;
pub mod version;

pub use fruitrun_syntax::{ScanError, TestCase, TestModule};

pub use backend::{BuildOutcome, DriverText, render};
pub use config::{DEFAULT_BUILD_COMMAND, HarnessConfig, QuoteStyle};
pub use errors::{HarnessError, HarnessResult};
pub use harness::{ConsoleReporter, DriverBuilder, DriverRunner, Harness, TestReporter, TestSuite};
pub use results::{OutputError, RawOutput, ResultCounter, SuiteResult, render_summary};
pub use suite::SuiteModel;
