//! Driver synthesis
//!
//! Renders a [`SuiteModel`] into the text of a Fortran `program` unit that initializes FRUIT,
//! runs every discovered test case through the runner, and prints the summary. Rendering is pure:
//! the same suite and config always give the same text.

use std::fmt;

use tracing::debug;

use fruitrun_syntax::TestModule;

use super::writer::DriverWriter;
use crate::config::HarnessConfig;
use crate::suite::SuiteModel;

/// Generated driver program text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverText(String);

impl DriverText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DriverText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DriverText {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<String> for DriverText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl AsRef<str> for DriverText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Render the driver program for `suite`.
#[tracing::instrument(skip_all, fields(modules = suite.num_modules(), test_cases = suite.num_test_cases()))]
pub fn render(suite: &SuiteModel, config: &HarnessConfig) -> DriverText {
    let mut w = DriverWriter::new(config);

    w.line(&format!("program {}", config.program_name));
    w.blank();
    w.indent();

    w.comment("Driver program for FRUIT unit tests in:");
    for module in suite.modules() {
        w.comment(&source_label(module));
    }
    w.blank();
    w.comment(&format!("Generated by {}.", config.tool_name));
    w.blank();

    w.line(&format!("use {}", config.runner_module));
    for name in suite.module_names() {
        w.line(&format!("use {name}"));
    }
    w.blank();

    w.call(&config.init_call);
    if suite.has_setup() {
        w.call("setup");
    }
    w.blank();

    let label_modules = suite.num_modules() > 1;
    for module in suite.modules() {
        if label_modules {
            w.comment(&format!("{}:", source_label(module)));
        }
        for case in &module.test_cases {
            let description = config.quote_style.apply(&case.description);
            w.call(&format!("{}({},\"{}\")", config.run_case_call, case.name, description));
        }
        w.blank();
    }

    if suite.has_teardown() {
        w.call("teardown");
    }
    w.call(&config.summary_call);
    w.call(&config.finalize_call);
    w.blank();

    w.dedent();
    w.line(&format!("end program {}", config.program_name));

    let text = w.finish();
    debug!(bytes = text.len(), "rendered driver");
    DriverText(text)
}

fn source_label(module: &TestModule) -> String {
    module.source_path.display().to_string().trim().to_string()
}

#[cfg(test)]
mod tests {
    use fruitrun_syntax::TestCase;

    use super::*;
    use crate::config::QuoteStyle;

    fn module(path: &str, name: &str, cases: &[(&str, &str)]) -> TestModule {
        let mut module = TestModule::new(path, name);
        module.test_cases = cases.iter().map(|(n, d)| TestCase::new(*n, *d)).collect();
        module
    }

    #[test]
    fn test_single_module_layout() {
        let mut foo = module("foo_test.f90", "foo_test", &[("test_alpha", "checks alpha")]);
        foo.has_setup = true;
        foo.has_teardown = true;
        let text = render(&SuiteModel::from_modules(vec![foo]), &HarnessConfig::default());
        let expected = "\
program tests

  ! Driver program for FRUIT unit tests in:
  ! foo_test.f90

  ! Generated by fruitrun.

  use fruit
  use foo_test

  call init_fruit
  call setup

  call run_test_case(test_alpha,\"checks alpha\")

  call teardown
  call fruit_summary
  call fruit_finalize

end program tests";
        assert_eq!(text.as_str(), expected);
    }

    #[test]
    fn test_no_trailing_newline() {
        let text = render(&SuiteModel::default(), &HarnessConfig::default());
        assert!(text.as_str().ends_with("end program tests"));
    }

    #[test]
    fn test_hooks_omitted_when_absent() {
        let suite = SuiteModel::from_modules(vec![module("a.f90", "a", &[("test_x", "x")])]);
        let text = render(&suite, &HarnessConfig::default());
        assert!(!text.as_str().contains("call setup"));
        assert!(!text.as_str().contains("call teardown"));
    }

    #[test]
    fn test_multiple_modules_get_file_markers_in_order() {
        let suite = SuiteModel::from_modules(vec![
            module("a_test.f90", "a_test", &[("test_a", "a")]),
            module("b_test.f90", "b_test", &[("test_b", "b")]),
        ]);
        let text = render(&suite, &HarnessConfig::default()).into_string();
        let marker_a = text.find("  ! a_test.f90:").unwrap();
        let call_a = text.find("call run_test_case(test_a,\"a\")").unwrap();
        let marker_b = text.find("  ! b_test.f90:").unwrap();
        let call_b = text.find("call run_test_case(test_b,\"b\")").unwrap();
        assert!(marker_a < call_a && call_a < marker_b && marker_b < call_b);
    }

    #[test]
    fn test_single_module_has_no_file_marker() {
        let suite = SuiteModel::from_modules(vec![module("a_test.f90", "a_test", &[("test_a", "a")])]);
        let text = render(&suite, &HarnessConfig::default());
        assert!(!text.as_str().contains("a_test.f90:"));
    }

    #[test]
    fn test_duplicate_module_names_used_once() {
        let suite = SuiteModel::from_modules(vec![module("one.f90", "shared", &[]), module("two.f90", "shared", &[])]);
        let text = render(&suite, &HarnessConfig::default());
        assert_eq!(text.as_str().matches("use shared").count(), 1);
    }

    #[test]
    fn test_quotes_in_descriptions() {
        let suite = SuiteModel::from_modules(vec![module("q.f90", "q", &[("test_q", r#"says "hi""#)])]);
        let escaped = render(&suite, &HarnessConfig::default());
        assert!(escaped.as_str().contains(r#"call run_test_case(test_q,"says ""hi""")"#));

        let verbatim = render(&suite, &HarnessConfig::default().with_quote_style(QuoteStyle::Verbatim));
        assert!(verbatim.as_str().contains(r#"call run_test_case(test_q,"says "hi"")"#));
    }

    #[test]
    fn test_source_paths_are_trimmed() {
        let suite = SuiteModel::from_modules(vec![
            module(" padded_test.f90 ", "padded_test", &[("test_p", "p")]),
            module("other_test.f90", "other_test", &[]),
        ]);
        let text = render(&suite, &HarnessConfig::default());
        assert!(text.as_str().contains("  ! padded_test.f90\n"));
        assert!(text.as_str().contains("  ! padded_test.f90:\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let suite = SuiteModel::from_modules(vec![module("a.f90", "a", &[("test_x", "x"), ("test_y", "y")])]);
        let config = HarnessConfig::default();
        assert_eq!(render(&suite, &config), render(&suite, &config));
    }

    #[test]
    fn test_custom_program_name_and_indent() {
        let config = HarnessConfig::default().with_program_name("unit").with_indent_width(4);
        let text = render(&SuiteModel::default(), &config);
        assert!(text.as_str().starts_with("program unit\n\n    ! Driver program"));
        assert!(text.as_str().ends_with("end program unit"));
    }
}
