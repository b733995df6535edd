//! Scanned representation of a FRUIT test module.

use std::fmt;
use std::path::PathBuf;

/// A single `test_*` subroutine discovered in a test module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    /// Text of the comment following the declaration, or the subroutine name when there is none.
    pub description: String,
}

impl TestCase {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// One scanned source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestModule {
    pub source_path: PathBuf,
    /// Never empty once scanning succeeds.
    pub module_name: String,
    pub has_setup: bool,
    pub has_teardown: bool,
    /// In source order.
    pub test_cases: Vec<TestCase>,
}

impl TestModule {
    pub fn new(source_path: impl Into<PathBuf>, module_name: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            module_name: module_name.into(),
            has_setup: false,
            has_teardown: false,
            test_cases: Vec::new(),
        }
    }

    /// Names of the discovered test cases, in source order.
    pub fn test_names(&self) -> impl Iterator<Item = &str> {
        self.test_cases.iter().map(|case| case.name.as_str())
    }
}

impl fmt::Display for TestModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.test_names().collect();
        write!(f, "{}: [{}]", self.source_path.display(), names.join(", "))
    }
}

/// Role of a subroutine, decided from its name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubroutineKind {
    Setup,
    Teardown,
    Test,
    /// Helper subroutine; not called by the driver.
    Other,
}

impl SubroutineKind {
    /// Classify a subroutine name, ignoring ASCII case.
    ///
    /// `setup` and `teardown` must match exactly; tests only need the `test_` prefix.
    pub fn classify(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "setup" => SubroutineKind::Setup,
            "teardown" => SubroutineKind::Teardown,
            _ if lower.starts_with("test_") => SubroutineKind::Test,
            _ => SubroutineKind::Other,
        }
    }
}
