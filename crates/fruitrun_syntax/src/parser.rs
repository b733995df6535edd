//! Scanner turning one test source into a [`TestModule`]
//!
//! The scanner walks the source once, front to back, never revisiting a line:
//!
//! 1. [`ScanPhase::Header`] until the first line that classifies as a module declaration.
//! 2. [`ScanPhase::Body`] to the end of input, collecting hooks and test cases. When a test
//!    declaration is found, the next non-blank line is consumed to read its description.
//!
//! ## Examples
//!
//! ```rust
//! use std::path::Path;
//! use fruitrun_syntax::parser;
//!
//! let source = "module foo_test\nsubroutine test_alpha()\n\n! checks alpha\nend subroutine\n";
//! let module = parser::parse(Path::new("foo_test.f90"), source).unwrap();
//! assert_eq!(module.test_cases.len(), 1);
//! ```

use std::path::Path;

use tracing::debug;

use crate::ast::{SubroutineKind, TestCase, TestModule};
use crate::diagnostics::ScanError;
use crate::lexer::{LineKind, ScanPhase, classify_line, trailing_comment};

/// Scan a test source. `path` is recorded on the module and used to label diagnostics.
#[tracing::instrument(skip_all, fields(path = %path.display(), source_len = source.len()))]
pub fn parse(path: &Path, source: &str) -> Result<TestModule, ScanError> {
    Scanner::new(path, source).scan()
}

/// One line of input with its position in the source.
#[derive(Debug, Clone, Copy)]
struct SourceLine<'a> {
    /// 1-based.
    number: usize,
    /// Byte offset of the first character of the line.
    offset: usize,
    /// Line text without its terminator.
    text: &'a str,
}

/// Iterator over lines that keeps byte offsets for diagnostics.
struct SourceLines<'a> {
    source: &'a str,
    offset: usize,
    number: usize,
}

impl<'a> Iterator for SourceLines<'a> {
    type Item = SourceLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.source.len() {
            return None;
        }
        let rest = &self.source[self.offset..];
        let (raw, consumed) = match rest.find('\n') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };
        let line = SourceLine {
            number: self.number + 1,
            offset: self.offset,
            text: raw.strip_suffix('\r').unwrap_or(raw),
        };
        self.offset += consumed;
        self.number += 1;
        Some(line)
    }
}

struct Scanner<'a> {
    path: &'a Path,
    source: &'a str,
    lines: SourceLines<'a>,
}

impl<'a> Scanner<'a> {
    fn new(path: &'a Path, source: &'a str) -> Self {
        Self {
            path,
            source,
            lines: SourceLines {
                source,
                offset: 0,
                number: 0,
            },
        }
    }

    fn scan(mut self) -> Result<TestModule, ScanError> {
        let module_name = self.scan_module_name()?;
        let mut module = TestModule::new(self.path, module_name);
        self.scan_subroutines(&mut module)?;
        debug!(
            module = %module.module_name,
            tests = module.test_cases.len(),
            setup = module.has_setup,
            teardown = module.has_teardown,
            "scanned test module"
        );
        Ok(module)
    }

    fn scan_module_name(&mut self) -> Result<String, ScanError> {
        while let Some(line) = self.lines.next() {
            if let LineKind::ModuleDecl { keyword_at, name } = classify_line(line.text, ScanPhase::Header) {
                return match name {
                    Some(name) => Ok(name.to_string()),
                    None => Err(ScanError::missing_module_name(
                        &self.label(),
                        self.source,
                        line.number,
                        line.offset + keyword_at,
                        line.text.len() - keyword_at,
                    )),
                };
            }
        }
        Err(ScanError::no_module(&self.label(), self.source))
    }

    fn scan_subroutines(&mut self, module: &mut TestModule) -> Result<(), ScanError> {
        while let Some(line) = self.lines.next() {
            let LineKind::SubroutineDecl { keyword_at, name } = classify_line(line.text, ScanPhase::Body) else {
                continue;
            };
            let Some(name) = name else {
                return Err(ScanError::missing_subroutine_name(
                    &self.label(),
                    self.source,
                    line.number,
                    line.offset + keyword_at,
                    line.text.len() - keyword_at,
                ));
            };
            match SubroutineKind::classify(name) {
                SubroutineKind::Setup => module.has_setup = true,
                SubroutineKind::Teardown => module.has_teardown = true,
                SubroutineKind::Test => {
                    let description = self.read_description().unwrap_or(name).to_string();
                    debug!(name, line = line.number, "found test case");
                    module.test_cases.push(TestCase::new(name, description));
                }
                SubroutineKind::Other => {}
            }
        }
        Ok(())
    }

    /// Consume lines up to and including the next non-blank one and return its comment text.
    fn read_description(&mut self) -> Option<&'a str> {
        self.lines
            .by_ref()
            .find(|line| !line.text.trim().is_empty())
            .and_then(|line| trailing_comment(line.text))
    }

    fn label(&self) -> String {
        self.path.display().to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================
