//! Progress and result reporting
//!
//! The orchestrator calls a [`TestReporter`] at each stage boundary. [`ConsoleReporter`] prints
//! the human-readable summary to stdout and stage problems to stderr.

use std::path::Path;

use crate::backend::BuildOutcome;
use crate::results::{SuiteResult, render_summary};
use crate::suite::SuiteModel;

/// Trait for reporting harness progress and results.
///
/// Implement this trait to customize output format.
pub trait TestReporter {
    /// Called when the suite has no test cases and nothing will be built
    fn on_no_tests(&mut self, _suite: &SuiteModel) {}

    /// Called after the driver file was written
    fn on_driver_written(&mut self, _path: &Path) {}

    /// Called when the build stage finished, whether or not it produced an executable
    fn on_build_complete(&mut self, outcome: &BuildOutcome);

    /// Called with the parsed result of a run
    fn on_run_complete(&mut self, result: &SuiteResult);
}

/// Default console reporter
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl TestReporter for ConsoleReporter {
    fn on_no_tests(&mut self, suite: &SuiteModel) {
        eprintln!("No test cases found in {} module(s)", suite.num_modules());
    }

    fn on_build_complete(&mut self, outcome: &BuildOutcome) {
        if !outcome.built {
            eprintln!(
                "\x1b[31mBuild failed:\x1b[0m no executable at {}",
                outcome.executable_path.display()
            );
        }
    }

    fn on_run_complete(&mut self, result: &SuiteResult) {
        print!("{}", render_summary(result));
    }
}
