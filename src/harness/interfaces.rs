//! Build and run stage interfaces
//!
//! The orchestrator reaches the external build tool and the built executable only through these
//! traits:
//! - [`DriverBuilder`]: turn a written driver into an executable
//! - [`DriverRunner`]: run the executable and capture its output
//!
//! The shell-backed defaults live in [`crate::backend::project`]. Tests substitute in-memory
//! fakes so the orchestration logic runs without a compiler.

use std::path::Path;

use crate::backend::BuildOutcome;
use crate::errors::HarnessResult;
use crate::results::RawOutput;

// ============================================================================
// Build Interface
// ============================================================================

/// Build a driver program with an opaque build command.
pub trait DriverBuilder {
    /// Run `command` to build the driver at `driver`.
    ///
    /// A build that leaves no executable is reported through [`BuildOutcome::built`], not as an
    /// error. Errors are reserved for failures to remove a stale executable or launch the tool.
    fn build(&self, driver: &Path, command: &str) -> HarnessResult<BuildOutcome>;
}

// ============================================================================
// Run Interface
// ============================================================================

/// Execute a built driver and capture what it printed.
pub trait DriverRunner {
    /// Run the executable from `outcome`. Output that was never written reads as empty.
    fn run(&self, outcome: &BuildOutcome) -> HarnessResult<RawOutput>;
}

impl<T: DriverBuilder + ?Sized> DriverBuilder for &T {
    fn build(&self, driver: &Path, command: &str) -> HarnessResult<BuildOutcome> {
        (**self).build(driver, command)
    }
}

impl<T: DriverRunner + ?Sized> DriverRunner for &T {
    fn run(&self, outcome: &BuildOutcome) -> HarnessResult<RawOutput> {
        (**self).run(outcome)
    }
}
