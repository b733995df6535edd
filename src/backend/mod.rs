//! Driver backend
//!
//! Turns a scanned suite into a runnable test program and runs it:
//!
//! 1. [`driver::render`] renders the suite into Fortran driver text
//! 2. [`project::write_driver`] writes it to disk
//! 3. [`project::ShellBuilder`] runs the build command and checks for the executable
//! 4. [`project::ShellRunner`] runs the executable and captures its output
//!
//! ## Module Organization
//!
//! - `writer.rs` - Indenting line writer
//! - `driver.rs` - Driver text synthesis
//! - `project.rs` - Derived paths and the shell-backed build and run stages

pub mod driver;
pub mod project;
pub mod writer;

pub use driver::{DriverText, render};
pub use project::{BuildOutcome, ShellBuilder, ShellRunner, write_driver};
