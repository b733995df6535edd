//! Build/run orchestration
//!
//! [`Harness::build_run`] composes the pipeline stages over a [`TestSuite`]:
//!
//! ```text
//! SuiteModel -> render -> write_driver -> DriverBuilder::build -> DriverRunner::run -> results::parse
//! ```
//!
//! Each stage records its output on the suite. Running the pipeline again clears what the
//! previous run recorded first.
//!
//! ## Module Organization
//!
//! - `interfaces.rs` - Build and run stage traits
//! - `reporter.rs` - Progress and result reporting

pub mod interfaces;
pub mod reporter;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

pub use interfaces::{DriverBuilder, DriverRunner};
pub use reporter::{ConsoleReporter, TestReporter};

use crate::backend::{self, ShellBuilder, ShellRunner};
use crate::config::HarnessConfig;
use crate::errors::HarnessResult;
use crate::results::{self, RawOutput, SuiteResult, render_summary};
use crate::suite::SuiteModel;

// ============================================================================
// Test suite
// ============================================================================

/// A scanned suite together with what its last pipeline run produced.
#[derive(Debug, Clone, Default)]
pub struct TestSuite {
    model: SuiteModel,
    driver_path: Option<PathBuf>,
    executable_path: Option<PathBuf>,
    output: Option<RawOutput>,
    result: Option<SuiteResult>,
}

impl TestSuite {
    pub fn new(model: SuiteModel) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    /// Read and scan `paths` in order. Their order is the order test cases run in.
    pub fn load<I, P>(paths: I) -> HarnessResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Ok(Self::new(SuiteModel::load(paths)?))
    }

    pub fn model(&self) -> &SuiteModel {
        &self.model
    }

    pub fn num_modules(&self) -> usize {
        self.model.num_modules()
    }

    pub fn num_test_cases(&self) -> usize {
        self.model.num_test_cases()
    }

    /// Driver written by the last run.
    pub fn driver_path(&self) -> Option<&Path> {
        self.driver_path.as_deref()
    }

    /// Executable the last build was expected to produce.
    pub fn executable_path(&self) -> Option<&Path> {
        self.executable_path.as_deref()
    }

    /// File the last run's output was captured in.
    pub fn output_path(&self) -> Option<&Path> {
        self.output.as_ref().and_then(|output| output.path.as_deref())
    }

    /// Captured output of the last run.
    pub fn output(&self) -> Option<&RawOutput> {
        self.output.as_ref()
    }

    /// Parsed result of the last run.
    pub fn result(&self) -> Option<&SuiteResult> {
        self.result.as_ref()
    }

    /// Whether the last run passed. `false` before any run.
    pub fn success(&self) -> bool {
        self.result.as_ref().is_some_and(|result| result.success)
    }

    /// Human-readable report of the last run.
    pub fn summary(&self) -> Option<String> {
        self.result.as_ref().map(render_summary)
    }

    fn reset(&mut self) {
        self.driver_path = None;
        self.executable_path = None;
        self.output = None;
        self.result = None;
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Runs the driver pipeline with a given pair of build and run stages.
#[derive(Debug, Clone)]
pub struct Harness<B = ShellBuilder, R = ShellRunner> {
    config: HarnessConfig,
    builder: B,
    runner: R,
}

impl Harness {
    /// Harness that builds and runs through the platform shell.
    pub fn new(config: HarnessConfig) -> Self {
        let runner = ShellRunner::new(&config);
        Self::with_stages(config, ShellBuilder, runner)
    }
}

impl<B: DriverBuilder, R: DriverRunner> Harness<B, R> {
    pub fn with_stages(config: HarnessConfig, builder: B, runner: R) -> Self {
        Self { config, builder, runner }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Write the driver for `suite`, build it with `command`, run it and parse its output.
    ///
    /// Returns whether every test passed. A suite without test cases, or a build that leaves no
    /// executable, gives `false` without running anything further.
    #[tracing::instrument(skip_all, fields(driver = %driver.display(), command = %command))]
    pub fn build_run(
        &self,
        suite: &mut TestSuite,
        driver: &Path,
        command: &str,
        reporter: &mut dyn TestReporter,
    ) -> HarnessResult<bool> {
        suite.reset();
        if suite.model.is_empty() {
            warn!(modules = suite.num_modules(), "suite has no test cases; nothing to build");
            reporter.on_no_tests(&suite.model);
            return Ok(false);
        }

        let text = backend::render(&suite.model, &self.config);
        backend::write_driver(driver, &text)?;
        suite.driver_path = Some(driver.to_path_buf());
        reporter.on_driver_written(driver);

        let outcome = self.builder.build(driver, command)?;
        suite.executable_path = Some(outcome.executable_path.clone());
        reporter.on_build_complete(&outcome);
        if !outcome.built {
            return Ok(false);
        }
        info!(executable = %outcome.executable_path.display(), "built test executable");

        let output = self.runner.run(&outcome)?;
        let parsed = results::parse(&output);
        // Keep the captured text even when it cannot be parsed
        suite.output = Some(output);
        let result = parsed?;
        reporter.on_run_complete(&result);

        let success = result.success;
        suite.result = Some(result);
        Ok(success)
    }
}

// ============================================================================
// Tests
// ============================================================================
