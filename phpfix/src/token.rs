//! Lexical token model.
//!
//! A token is an immutable pairing of a kind and its literal text. The kind
//! set is a closed enum so that every rewrite site matches exhaustively or
//! defaults deliberately; concatenating the contents of a freshly tokenized
//! stream reproduces the source bytes exactly.

use compact_str::CompactString;
use serde::Serialize;

/// The closed set of lexical kinds the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// `<?php` or `<?=`.
    OpenTag,
    /// `?>`.
    CloseTag,
    /// Raw text outside PHP tags.
    InlineHtml,
    /// A run of spaces, tabs and line breaks.
    Whitespace,
    /// `//`, `#` or `/* ... */` comment.
    Comment,
    /// `/** ... */` documentation comment.
    DocComment,
    /// A reserved word (`class`, `function`, `public`, ...).
    Keyword,
    /// A bare name that is not a reserved word.
    Identifier,
    /// `$name`.
    Variable,
    /// Single- or double-quoted string, taken verbatim.
    StringLiteral,
    /// Integer, float or hex literal.
    NumberLiteral,
    /// An operator, longest-match (`&&`, `<=>`, `+`, ...).
    Operator,
    /// Structural punctuation: parentheses, braces, brackets, `,`, `;`, ...
    Punctuation,
}

impl TokenKind {
    /// Whether tokens of this kind carry no meaning for structural queries.
    #[must_use]
    pub const fn is_ignorable(self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment | Self::DocComment)
    }

    /// Whether this kind is a comment of either flavor.
    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::Comment | Self::DocComment)
    }
}

/// One lexical unit: a kind plus its literal source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    content: CompactString,
}

impl Token {
    /// Creates a token of the given kind and content.
    #[must_use]
    pub fn new(kind: TokenKind, content: impl Into<CompactString>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    /// Shorthand for a whitespace token.
    #[must_use]
    pub fn whitespace(content: impl Into<CompactString>) -> Self {
        Self::new(TokenKind::Whitespace, content)
    }

    /// The token's kind.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The token's literal text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the token has the given kind.
    #[must_use]
    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Whether the token is a keyword matching `name` case-insensitively.
    ///
    /// PHP keywords are case-insensitive, so `CLASS` and `class` both match.
    #[must_use]
    pub fn is_keyword(&self, name: &str) -> bool {
        self.kind == TokenKind::Keyword && self.content.eq_ignore_ascii_case(name)
    }

    /// Whether the token has exactly the given content.
    #[must_use]
    pub fn is_content(&self, content: &str) -> bool {
        self.content == content
    }

    /// Whether the token is a comment of either flavor.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }

    /// Whether the token is whitespace.
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    /// Whether the token's content contains a line break.
    #[must_use]
    pub fn has_newline(&self) -> bool {
        self.content.contains('\n') || self.content.contains('\r')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_match_is_case_insensitive() {
        let token = Token::new(TokenKind::Keyword, "CLASS");
        assert!(token.is_keyword("class"));
        assert!(!token.is_keyword("function"));
    }

    #[test]
    fn identifier_never_matches_keyword() {
        let token = Token::new(TokenKind::Identifier, "class_map");
        assert!(!token.is_keyword("class"));
    }

    #[test]
    fn newline_detection_covers_both_endings() {
        assert!(Token::whitespace("\r\n    ").has_newline());
        assert!(Token::whitespace("\n").has_newline());
        assert!(!Token::whitespace("    ").has_newline());
    }
}
