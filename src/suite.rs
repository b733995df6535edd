//! The scanned test suite
//!
//! A [`SuiteModel`] holds one [`TestModule`] per test source, in the order the sources were
//! given. Loading stops at the first source that cannot be read or scanned.

use std::fmt;
use std::fs;
use std::path::Path;

use fruitrun_syntax::{TestModule, parser};
use tracing::{debug, info};

use crate::errors::{HarnessError, HarnessResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuiteModel {
    modules: Vec<TestModule>,
}

impl SuiteModel {
    /// Read and scan every source in order.
    #[tracing::instrument(skip_all)]
    pub fn load<I, P>(paths: I) -> HarnessResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut modules = Vec::new();
        for path in paths {
            let path = path.as_ref();
            debug!(path = %path.display(), "reading test source");
            let source = fs::read_to_string(path).map_err(|source| HarnessError::ReadSource {
                path: path.to_path_buf(),
                source,
            })?;
            modules.push(parser::parse(path, &source)?);
        }
        let suite = Self::from_modules(modules);
        info!(
            modules = suite.num_modules(),
            test_cases = suite.num_test_cases(),
            "loaded test suite"
        );
        Ok(suite)
    }

    pub fn from_modules(modules: Vec<TestModule>) -> Self {
        Self { modules }
    }

    pub fn modules(&self) -> &[TestModule] {
        &self.modules
    }

    pub fn num_modules(&self) -> usize {
        self.modules.len()
    }

    /// Test cases across all modules.
    pub fn num_test_cases(&self) -> usize {
        self.modules.iter().map(|module| module.test_cases.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.num_test_cases() == 0
    }

    /// Whether any module declares a `setup` hook.
    pub fn has_setup(&self) -> bool {
        self.modules.iter().any(|module| module.has_setup)
    }

    /// Whether any module declares a `teardown` hook.
    pub fn has_teardown(&self) -> bool {
        self.modules.iter().any(|module| module.has_teardown)
    }

    /// Module names with duplicates removed, first occurrence first.
    pub fn module_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(self.modules.len());
        for module in &self.modules {
            if !names.contains(&module.module_name.as_str()) {
                names.push(&module.module_name);
            }
        }
        names
    }
}

impl fmt::Display for SuiteModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, module) in self.modules.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{module}")?;
        }
        Ok(())
    }
}
