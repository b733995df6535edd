//! Syntax frontend for FRUIT-style Fortran test modules: line classifier, scanner, model, diagnostics.
//!
//! The scanner does not parse Fortran. It recognises the handful of tokens a test driver needs (the
//! `module` line, `subroutine` declarations and their trailing comments) and ignores everything else.
//!
//! ## Examples
//! ```rust
//! use std::path::Path;
//! use fruitrun_syntax::parser;
//!
//! let source = "module foo_test\ncontains\nsubroutine test_alpha()\n  ! checks alpha\nend subroutine\n";
//! let module = parser::parse(Path::new("foo_test.f90"), source).unwrap();
//! assert_eq!(module.module_name, "foo_test");
//! assert_eq!(module.test_cases[0].description, "checks alpha");
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;

pub use ast::{SubroutineKind, TestCase, TestModule};
pub use diagnostics::ScanError;
