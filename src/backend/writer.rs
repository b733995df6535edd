//! Line writer with indentation tracking
//!
//! Builds driver text one line at a time. Blank lines carry no indentation and the finished text
//! has no trailing newline.

use crate::config::HarnessConfig;

/// Writer that tracks indentation and collects finished lines
pub struct DriverWriter {
    lines: Vec<String>,
    /// Current indentation level
    indent_level: usize,
    /// Spaces per level
    indent_width: usize,
}

impl DriverWriter {
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            lines: Vec::new(),
            indent_level: 0,
            indent_width: config.indent_width,
        }
    }

    /// Increase indentation level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation level
    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Write one line at the current indentation
    pub fn line(&mut self, text: &str) {
        if text.is_empty() {
            self.blank();
            return;
        }
        let indent = " ".repeat(self.indent_level * self.indent_width);
        self.lines.push(format!("{indent}{text}"));
    }

    /// Write a `!` comment line
    pub fn comment(&mut self, text: &str) {
        self.line(&format!("! {text}"));
    }

    /// Write a `call` statement
    pub fn call(&mut self, target: &str) {
        self.line(&format!("call {target}"));
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Get the written text, lines joined by `\n`
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}
