//! Whitespace and indentation helpers shared by line-laying fixers.

use crate::token::TokenKind;
use crate::tokens::TokenStream;

/// Line-layout preferences used when a fixer writes new line breaks.
#[derive(Debug, Clone)]
pub struct WhitespaceStyle {
    line_ending: String,
    indent: String,
}

impl WhitespaceStyle {
    /// Creates a style with an explicit line ending and indent unit.
    #[must_use]
    pub fn new(line_ending: impl Into<String>, indent: impl Into<String>) -> Self {
        Self {
            line_ending: line_ending.into(),
            indent: indent.into(),
        }
    }

    /// The line ending to emit.
    #[must_use]
    pub fn line_ending(&self) -> &str {
        &self.line_ending
    }

    /// One level of indentation.
    #[must_use]
    pub fn indent(&self) -> &str {
        &self.indent
    }
}

impl Default for WhitespaceStyle {
    fn default() -> Self {
        Self::new("\n", "    ")
    }
}

/// The prevailing indentation of the line holding the token at `index`.
///
/// Walks back to the nearest whitespace token containing a line break and
/// returns everything after its last `\n`. An index on the very first line
/// has no such token and yields the empty string.
#[must_use]
pub fn detect_indent(stream: &TokenStream, index: usize) -> String {
    let mut cursor = index;
    while let Some(ws) = stream.prev_of_kind(cursor, &[TokenKind::Whitespace]) {
        let content = stream[ws].content();
        if content.contains('\n') {
            return content.rsplit('\n').next().unwrap_or_default().to_owned();
        }
        cursor = ws;
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn indent_of_nested_code() {
        let stream = tokenize("<?php\nclass Foo {\n    public function bar() {}\n}\n")
            .expect("fixture tokenizes");
        let function = stream
            .iter()
            .position(|t| t.is_keyword("function"))
            .expect("has function");
        assert_eq!(detect_indent(&stream, function), "    ");
    }

    #[test]
    fn indent_on_first_line_is_empty() {
        let stream = tokenize("<?php $a = 1;").expect("fixture tokenizes");
        assert_eq!(detect_indent(&stream, stream.len() - 1), "");
    }
}
