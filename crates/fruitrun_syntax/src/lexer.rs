//! Line classifier for FRUIT test sources
//!
//! Lines are classified by plain substring heuristics, not by tokenizing Fortran:
//!
//! - Before the module line, any line whose lowercase form contains `module` is the module
//!   declaration, even when the text sits inside an identifier.
//! - After it, any line containing `subroutine` is a declaration unless the text before the
//!   keyword contains a `!` comment marker or `end`.
//!
//! In both cases the declared name is the second whitespace-separated token starting at the
//! keyword. Subroutine names are cut at the first `(`.

const MODULE_KEYWORD: &str = "module";
const SUBROUTINE_KEYWORD: &str = "subroutine";

/// Where the scanner is in the file; decides which keyword a line is checked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// Looking for the module declaration.
    Header,
    /// Past the module line, looking for subroutines.
    Body,
}

/// Classification of one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    ModuleDecl {
        /// Byte offset of the `module` keyword within the line.
        keyword_at: usize,
        /// `None` when nothing follows the keyword.
        name: Option<&'a str>,
    },
    SubroutineDecl {
        /// Byte offset of the `subroutine` keyword within the line.
        keyword_at: usize,
        /// `None` when nothing follows the keyword. May be empty when the token starts with `(`.
        name: Option<&'a str>,
    },
    Other,
}

/// Classify a single line (without its terminator) for the given phase.
pub fn classify_line(line: &str, phase: ScanPhase) -> LineKind<'_> {
    // ASCII lowercasing keeps byte offsets valid for slicing the original line.
    let lower = line.to_ascii_lowercase();
    match phase {
        ScanPhase::Header => match lower.find(MODULE_KEYWORD) {
            Some(keyword_at) => LineKind::ModuleDecl {
                keyword_at,
                name: token_after_keyword(&line[keyword_at..]),
            },
            None => LineKind::Other,
        },
        ScanPhase::Body => {
            let Some(keyword_at) = lower.find(SUBROUTINE_KEYWORD) else {
                return LineKind::Other;
            };
            if is_declaration_prefix(&lower[..keyword_at]) {
                LineKind::SubroutineDecl {
                    keyword_at,
                    name: token_after_keyword(&line[keyword_at..]).map(strip_parameter_list),
                }
            } else {
                LineKind::Other
            }
        }
    }
}

/// `end subroutine` and commented-out declarations are not declarations.
fn is_declaration_prefix(prefix_lower: &str) -> bool {
    !prefix_lower.contains('!') && !prefix_lower.contains("end")
}

fn token_after_keyword(from_keyword: &str) -> Option<&str> {
    from_keyword.split_whitespace().nth(1)
}

fn strip_parameter_list(token: &str) -> &str {
    match token.find('(') {
        Some(pos) => &token[..pos],
        None => token,
    }
}

/// Description carried by the first non-blank line after a test declaration.
///
/// Returns the trimmed text after the first `!`, or `None` when the line has no comment.
pub fn trailing_comment(line: &str) -> Option<&str> {
    line.find('!').map(|pos| line[pos + 1..].trim())
}

// ============================================================================
// TESTS
// ============================================================================
