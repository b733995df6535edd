//! Scan errors, reported as `miette` diagnostics pointing into the offending source.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A test source that cannot be turned into a [`crate::TestModule`].
#[derive(Debug, Error, Diagnostic)]
pub enum ScanError {
    #[error("no module declaration found")]
    #[diagnostic(
        code(fruitrun::scan::no_module),
        help("test sources must declare their module, e.g. `module foo_test`")
    )]
    NoModule {
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("module declaration on line {line} has no name")]
    #[diagnostic(code(fruitrun::scan::missing_module_name))]
    MissingModuleName {
        line: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a module name after this")]
        span: SourceSpan,
    },

    #[error("subroutine declaration on line {line} has no name")]
    #[diagnostic(
        code(fruitrun::scan::missing_subroutine_name),
        help("lines mentioning `subroutine` are read as declarations unless preceded by `!` or `end`")
    )]
    MissingSubroutineName {
        line: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a subroutine name after this")]
        span: SourceSpan,
    },
}

impl ScanError {
    pub fn no_module(name: &str, source: &str) -> Self {
        ScanError::NoModule {
            src: NamedSource::new(name, source.to_string()),
        }
    }

    pub fn missing_module_name(name: &str, source: &str, line: usize, offset: usize, len: usize) -> Self {
        ScanError::MissingModuleName {
            line,
            src: NamedSource::new(name, source.to_string()),
            span: (offset, len).into(),
        }
    }

    pub fn missing_subroutine_name(name: &str, source: &str, line: usize, offset: usize, len: usize) -> Self {
        ScanError::MissingSubroutineName {
            line,
            src: NamedSource::new(name, source.to_string()),
            span: (offset, len).into(),
        }
    }

    /// 1-based line of the offending declaration, if the error points at one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ScanError::NoModule { .. } => None,
            ScanError::MissingModuleName { line, .. } | ScanError::MissingSubroutineName { line, .. } => Some(*line),
        }
    }
}
