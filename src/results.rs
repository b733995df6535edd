//! Result extraction from captured FRUIT output
//!
//! FRUIT reports its results as human-oriented text. This module recovers:
//!
//! - overall success: any line containing `SUCCESSFUL!`
//! - failure messages: the lines between `Failed assertion messages:` and
//!   `end of failed assertion messages.` (first block only, failed runs only)
//! - statistics: the `Successful asserts / total asserts` line and the line after it, each read as
//!   `<success> / <total>` around the last standalone `/` token
//!
//! Output is read through [`LineSource`], so tests can hand literal lines to the parser without
//! running anything.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::{HarnessError, HarnessResult};

const SUCCESS_MARKER: &str = "SUCCESSFUL!";
const FAILED_MESSAGES_START: &str = "Failed assertion messages:";
const FAILED_MESSAGES_END: &str = "end of failed assertion messages.";
const ASSERT_SUMMARY_HEADER: &str = "Successful asserts / total asserts";

// ============================================================================
// Counters and results
// ============================================================================

/// A `(success, total)` pair from the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultCounter {
    pub success: u64,
    pub total: u64,
}

impl ResultCounter {
    pub fn new(success: u64, total: u64) -> Self {
        Self { success, total }
    }

    /// Share of successes in percent; `0.0` when nothing was counted.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.success as f64 / self.total as f64 * 100.0
        }
    }
}

impl fmt::Display for ResultCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} ({:3.0}%)", self.success, self.total, self.percent())
    }
}

/// Everything recovered from one run's output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuiteResult {
    pub success: bool,
    /// Empty when the run succeeded.
    pub failure_messages: Vec<String>,
    pub asserts: ResultCounter,
    pub cases: ResultCounter,
}

/// A summary line the statistics parser could not read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputError {
    #[error("summary on output line {line} has no standalone `/`: {text:?}")]
    MissingSeparator { line: usize, text: String },

    #[error("summary on output line {line} has no count on both sides of `/`: {text:?}")]
    MissingCount { line: usize, text: String },

    #[error("summary on output line {line} has a non-integer count `{token}`")]
    InvalidCount { line: usize, token: String },

    #[error("assert summary on output line {line} is not followed by a case summary")]
    MissingCaseSummary { line: usize },
}

// ============================================================================
// Line sources
// ============================================================================

/// Anything the result parser can read output lines from.
pub trait LineSource {
    fn read_lines(&self) -> HarnessResult<Vec<String>>;
}

impl<S: AsRef<str>> LineSource for [S] {
    fn read_lines(&self) -> HarnessResult<Vec<String>> {
        Ok(self.iter().map(|line| line.as_ref().to_string()).collect())
    }
}

impl<S: AsRef<str>> LineSource for Vec<S> {
    fn read_lines(&self) -> HarnessResult<Vec<String>> {
        self.as_slice().read_lines()
    }
}

/// Output file written by a driver run. A missing file reads as no output.
#[derive(Debug, Clone)]
pub struct OutputFile {
    path: PathBuf,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for OutputFile {
    fn read_lines(&self) -> HarnessResult<Vec<String>> {
        if !self.path.is_file() {
            warn!(path = %self.path.display(), "no output file; treating run as producing no output");
            return Ok(Vec::new());
        }
        let bytes = fs::read(&self.path).map_err(|source| HarnessError::ReadOutput {
            path: self.path.clone(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&bytes).lines().map(str::to_string).collect())
    }
}

/// Captured output of one driver run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    /// File the output was read from, when it came from a run.
    pub path: Option<PathBuf>,
    pub lines: Vec<String>,
}

impl RawOutput {
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        Self {
            path: None,
            lines: lines.iter().map(|line| line.as_ref().to_string()).collect(),
        }
    }

    /// Read the output file; a missing file gives empty output.
    pub fn read(file: &OutputFile) -> HarnessResult<Self> {
        Ok(Self {
            path: Some(file.path().to_path_buf()),
            lines: file.read_lines()?,
        })
    }

    /// The output as display text.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a run's captured output.
#[tracing::instrument(skip_all, fields(lines = output.lines.len()))]
pub fn parse(output: &RawOutput) -> Result<SuiteResult, OutputError> {
    parse_lines(&output.lines)
}

/// Read lines from `source` and parse them.
pub fn parse_source<L: LineSource + ?Sized>(source: &L) -> HarnessResult<SuiteResult> {
    let lines = source.read_lines()?;
    Ok(parse_lines(&lines)?)
}

/// Parse output lines into a [`SuiteResult`].
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Result<SuiteResult, OutputError> {
    let success = lines.iter().any(|line| line.as_ref().contains(SUCCESS_MARKER));
    let failure_messages = if success { Vec::new() } else { failure_messages(lines) };
    let (asserts, cases) = statistics(lines)?;

    debug!(
        success,
        messages = failure_messages.len(),
        asserts = %asserts,
        cases = %cases,
        "parsed run output"
    );
    Ok(SuiteResult {
        success,
        failure_messages,
        asserts,
        cases,
    })
}

fn failure_messages<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let Some(start) = lines.iter().position(|line| line.as_ref().contains(FAILED_MESSAGES_START)) else {
        return Vec::new();
    };
    lines[start + 1..]
        .iter()
        .map(AsRef::<str>::as_ref)
        .take_while(|line| !line.contains(FAILED_MESSAGES_END))
        .map(|line| line.trim().to_string())
        .collect()
}

/// Assert and case counters. A later summary block overrides an earlier one.
fn statistics<S: AsRef<str>>(lines: &[S]) -> Result<(ResultCounter, ResultCounter), OutputError> {
    let mut asserts = ResultCounter::default();
    let mut cases = ResultCounter::default();
    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if !line.contains(ASSERT_SUMMARY_HEADER) {
            continue;
        }
        let line_number = index + 1;
        asserts = parse_summary_line(line_number, line)?;
        let next = lines
            .get(index + 1)
            .ok_or(OutputError::MissingCaseSummary { line: line_number })?;
        cases = parse_summary_line(line_number + 1, next.as_ref())?;
    }
    Ok((asserts, cases))
}

/// Read `<success> / <total>` around the last standalone `/` of a summary line.
///
/// `line` is the 1-based output line number, used in errors.
pub fn parse_summary_line(line: usize, text: &str) -> Result<ResultCounter, OutputError> {
    let items: Vec<&str> = text.split_whitespace().collect();
    let slash = items
        .iter()
        .rposition(|item| *item == "/")
        .ok_or_else(|| OutputError::MissingSeparator {
            line,
            text: text.trim().to_string(),
        })?;
    let (Some(before), Some(after)) = (slash.checked_sub(1).and_then(|i| items.get(i)), items.get(slash + 1)) else {
        return Err(OutputError::MissingCount {
            line,
            text: text.trim().to_string(),
        });
    };
    Ok(ResultCounter::new(parse_count(line, before)?, parse_count(line, after)?))
}

fn parse_count(line: usize, token: &str) -> Result<u64, OutputError> {
    token.parse().map_err(|_| OutputError::InvalidCount {
        line,
        token: token.to_string(),
    })
}

// ============================================================================
// Reporting
// ============================================================================

/// Human-readable report of a run.
pub fn render_summary(result: &SuiteResult) -> String {
    let mut out = String::new();
    if result.success {
        out.push_str("All tests passed.\n");
    } else {
        out.push_str("Some tests failed:\n\n");
        out.push_str(&result.failure_messages.join("\n"));
        out.push_str("\n\n");
    }
    out.push_str("Hit rate:\n");
    out.push_str(&format!("  asserts:  {}\n", result.asserts));
    out.push_str(&format!("  cases  :  {}\n", result.cases));
    out
}

// ============================================================================
// Tests
// ============================================================================
