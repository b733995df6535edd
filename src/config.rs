//! Harness configuration
//!
//! Names of the FRUIT entry points the driver calls, layout of the generated text, and the
//! output file convention. Defaults match the FRUIT library.

/// Build command used when the caller does not supply one.
pub const DEFAULT_BUILD_COMMAND: &str = "make";

/// Harness configuration
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Name of the generated `program` unit
    pub program_name: String,
    /// Test-runner module `use`d before the test modules
    pub runner_module: String,
    /// Runner initialization subroutine
    pub init_call: String,
    /// Runner subroutine taking a test subroutine and its description
    pub run_case_call: String,
    /// Runner subroutine printing the summary block
    pub summary_call: String,
    /// Runner subroutine releasing runner state
    pub finalize_call: String,
    /// Spaces per indentation level inside the program unit
    pub indent_width: usize,
    /// How quotes inside descriptions are written into string literals
    pub quote_style: QuoteStyle,
    /// Extension of the captured output file, replacing the driver's extension
    pub output_extension: String,
    /// Tool name written into the driver's header comment
    pub tool_name: String,
}

/// Handling of `"` characters inside test descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// Double each embedded quote, Fortran's escape inside `"..."` literals.
    Escape,
    /// Insert the description unchanged.
    Verbatim,
}

impl QuoteStyle {
    /// Body of a double-quoted Fortran string literal holding `text`.
    pub fn apply(self, text: &str) -> String {
        match self {
            QuoteStyle::Escape => text.replace('"', "\"\""),
            QuoteStyle::Verbatim => text.to_string(),
        }
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            program_name: "tests".to_string(),
            runner_module: "fruit".to_string(),
            init_call: "init_fruit".to_string(),
            run_case_call: "run_test_case".to_string(),
            summary_call: "fruit_summary".to_string(),
            finalize_call: "fruit_finalize".to_string(),
            indent_width: 2,
            quote_style: QuoteStyle::Escape,
            output_extension: "out".to_string(),
            tool_name: "fruitrun".to_string(),
        }
    }
}

impl HarnessConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generated program name
    pub fn with_program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = name.into();
        self
    }

    /// Set the runner module name
    pub fn with_runner_module(mut self, module: impl Into<String>) -> Self {
        self.runner_module = module.into();
        self
    }

    /// Set the runner initialization call
    pub fn with_init_call(mut self, name: impl Into<String>) -> Self {
        self.init_call = name.into();
        self
    }

    /// Set the per-test runner call
    pub fn with_run_case_call(mut self, name: impl Into<String>) -> Self {
        self.run_case_call = name.into();
        self
    }

    /// Set the summary call
    pub fn with_summary_call(mut self, name: impl Into<String>) -> Self {
        self.summary_call = name.into();
        self
    }

    /// Set the finalize call
    pub fn with_finalize_call(mut self, name: impl Into<String>) -> Self {
        self.finalize_call = name.into();
        self
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the description quote style
    pub fn with_quote_style(mut self, style: QuoteStyle) -> Self {
        self.quote_style = style;
        self
    }

    /// Set the output file extension (without the leading dot)
    pub fn with_output_extension(mut self, extension: impl Into<String>) -> Self {
        self.output_extension = extension.into();
        self
    }

    /// Set the tool name written in the driver header
    pub fn with_tool_name(mut self, name: impl Into<String>) -> Self {
        self.tool_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_fruit() {
        let config = HarnessConfig::default();
        assert_eq!(config.program_name, "tests");
        assert_eq!(config.runner_module, "fruit");
        assert_eq!(config.init_call, "init_fruit");
        assert_eq!(config.run_case_call, "run_test_case");
        assert_eq!(config.summary_call, "fruit_summary");
        assert_eq!(config.finalize_call, "fruit_finalize");
        assert_eq!(config.output_extension, "out");
    }

    #[test]
    fn test_default_layout() {
        let config = HarnessConfig::default();
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.quote_style, QuoteStyle::Escape);
    }

    #[test]
    fn test_builder_chain() {
        let config = HarnessConfig::new()
            .with_program_name("unit_driver")
            .with_indent_width(4)
            .with_quote_style(QuoteStyle::Verbatim)
            .with_output_extension("log");
        assert_eq!(config.program_name, "unit_driver");
        assert_eq!(config.indent_width, 4);
        assert_eq!(config.quote_style, QuoteStyle::Verbatim);
        assert_eq!(config.output_extension, "log");
        // Other fields unchanged
        assert_eq!(config.runner_module, "fruit");
    }

    #[test]
    fn test_runner_entry_points() {
        let config = HarnessConfig::new()
            .with_runner_module("fruit_mpi")
            .with_init_call("fruit_init_mpi_xml(rank)")
            .with_run_case_call("run_test_case_mpi")
            .with_summary_call("fruit_summary_mpi(size, rank)")
            .with_finalize_call("fruit_finalize_mpi(size, rank)");
        assert_eq!(config.runner_module, "fruit_mpi");
        assert_eq!(config.init_call, "fruit_init_mpi_xml(rank)");
        assert_eq!(config.run_case_call, "run_test_case_mpi");
        assert_eq!(config.summary_call, "fruit_summary_mpi(size, rank)");
        assert_eq!(config.finalize_call, "fruit_finalize_mpi(size, rank)");
    }

    #[test]
    fn test_quote_style_escape_doubles_quotes() {
        assert_eq!(QuoteStyle::Escape.apply(r#"say "hi""#), r#"say ""hi"""#);
        assert_eq!(QuoteStyle::Escape.apply("it's fine"), "it's fine");
    }

    #[test]
    fn test_quote_style_verbatim() {
        assert_eq!(QuoteStyle::Verbatim.apply(r#"say "hi""#), r#"say "hi""#);
    }
}
