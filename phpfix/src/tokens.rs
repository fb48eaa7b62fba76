//! The mutable, index-addressable token stream for one file.
//!
//! Indices are only stable for positions not yet visited in the current
//! traversal, which is why fixers that insert tokens walk the stream
//! back-to-front. Every fixer must leave delimiter blocks balanced on exit;
//! [`TokenStream::validate_balance`] is the check run after tokenization.

use crate::error::TokenizeError;
use crate::token::{Token, TokenKind};
use smallvec::SmallVec;

/// Delimiter classes for block matching.
///
/// `#[` opens an attribute and closes with `]`, so it shares the bracket
/// class with `[`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `( ... )`
    Parenthesis,
    /// `{ ... }`
    Brace,
    /// `[ ... ]` and `#[ ... ]`
    Bracket,
}

impl BlockKind {
    /// Classifies a punctuation token as a block opener.
    #[must_use]
    pub fn from_opener(token: &Token) -> Option<Self> {
        if !token.is_kind(TokenKind::Punctuation) {
            return None;
        }
        match token.content() {
            "(" => Some(Self::Parenthesis),
            "{" => Some(Self::Brace),
            "[" | "#[" => Some(Self::Bracket),
            _ => None,
        }
    }

    /// Classifies a punctuation token as a block closer.
    #[must_use]
    pub fn from_closer(token: &Token) -> Option<Self> {
        if !token.is_kind(TokenKind::Punctuation) {
            return None;
        }
        match token.content() {
            ")" => Some(Self::Parenthesis),
            "}" => Some(Self::Brace),
            "]" => Some(Self::Bracket),
            _ => None,
        }
    }

    /// The closing character for this class.
    #[must_use]
    pub const fn closer(self) -> char {
        match self {
            Self::Parenthesis => ')',
            Self::Brace => '}',
            Self::Bracket => ']',
        }
    }
}

/// A sequence-search element: a kind plus an optional exact content.
pub type SequenceItem<'a> = (TokenKind, Option<&'a str>);

/// Ordered, mutable, zero-based sequence of tokens for one file.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Wraps an already-lexed token vector.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Number of tokens in the stream.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the stream holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token at `index`, if in bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Replaces the token at `index`. Out-of-bounds indices are ignored.
    pub fn replace(&mut self, index: usize, token: Token) {
        if let Some(slot) = self.tokens.get_mut(index) {
            *slot = token;
        }
    }

    /// Inserts a token at `index`, shifting later tokens.
    pub fn insert(&mut self, index: usize, token: Token) {
        self.tokens.insert(index, token);
    }

    /// Inserts several tokens at `index`, preserving their order.
    pub fn insert_many(&mut self, index: usize, tokens: impl IntoIterator<Item = Token>) {
        let mut at = index;
        for token in tokens {
            self.tokens.insert(at, token);
            at += 1;
        }
    }

    /// Removes and returns the token at `index`.
    pub fn remove(&mut self, index: usize) -> Token {
        self.tokens.remove(index)
    }

    /// Iterates over the tokens in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Index of the next token strictly after `from` with a kind in `kinds`.
    #[must_use]
    pub fn next_of_kind(&self, from: usize, kinds: &[TokenKind]) -> Option<usize> {
        (from + 1..self.tokens.len()).find(|&i| kinds.contains(&self.tokens[i].kind()))
    }

    /// Index of the previous token strictly before `from` with a kind in `kinds`.
    #[must_use]
    pub fn prev_of_kind(&self, from: usize, kinds: &[TokenKind]) -> Option<usize> {
        (0..from).rev().find(|&i| kinds.contains(&self.tokens[i].kind()))
    }

    /// Index of the next punctuation token strictly after `from` with the
    /// given content.
    #[must_use]
    pub fn next_content(&self, from: usize, content: &str) -> Option<usize> {
        (from + 1..self.tokens.len()).find(|&i| self.tokens[i].is_content(content))
    }

    /// Index of the next token strictly after `from` that is neither
    /// whitespace nor a comment.
    #[must_use]
    pub fn next_meaningful(&self, from: usize) -> Option<usize> {
        (from + 1..self.tokens.len()).find(|&i| !self.tokens[i].kind().is_ignorable())
    }

    /// Index of the previous token strictly before `from` that is neither
    /// whitespace nor a comment.
    #[must_use]
    pub fn prev_meaningful(&self, from: usize) -> Option<usize> {
        (0..from).rev().find(|&i| !self.tokens[i].kind().is_ignorable())
    }

    /// Given the index of a block opener, the index of its matching closer.
    ///
    /// Returns `None` when `start` is not an opener or the block never
    /// closes; a validated stream always finds its closer.
    #[must_use]
    pub fn find_block_end(&self, start: usize) -> Option<usize> {
        let kind = BlockKind::from_opener(self.tokens.get(start)?)?;
        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(start) {
            if BlockKind::from_opener(token) == Some(kind) {
                depth += 1;
            } else if BlockKind::from_closer(token) == Some(kind) {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
        }
        None
    }

    /// Given the index of a block closer, the index of its matching opener.
    #[must_use]
    pub fn find_block_start(&self, end: usize) -> Option<usize> {
        let kind = BlockKind::from_closer(self.tokens.get(end)?)?;
        let mut depth = 0usize;
        for i in (0..=end).rev() {
            let token = &self.tokens[i];
            if BlockKind::from_closer(token) == Some(kind) {
                depth += 1;
            } else if BlockKind::from_opener(token) == Some(kind) {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
        }
        None
    }

    /// Searches `[start, end)` for a contiguous run of meaningful tokens
    /// matching `sequence`, ignoring whitespace and comments in between.
    ///
    /// Returns the index of the first matched token. Content matches are
    /// exact; `None` content matches any token of the kind.
    #[must_use]
    pub fn find_sequence(
        &self,
        sequence: &[SequenceItem<'_>],
        start: usize,
        end: usize,
    ) -> Option<usize> {
        let (first_kind, first_content) = *sequence.first()?;
        let end = end.min(self.tokens.len());
        'outer: for i in start..end {
            if !self.matches_item(i, first_kind, first_content) {
                continue;
            }
            let mut cursor = i;
            for &(kind, content) in &sequence[1..] {
                let Some(next) = self.next_meaningful(cursor) else {
                    return None;
                };
                if next >= end || !self.matches_item(next, kind, content) {
                    continue 'outer;
                }
                cursor = next;
            }
            return Some(i);
        }
        None
    }

    fn matches_item(&self, index: usize, kind: TokenKind, content: Option<&str>) -> bool {
        let token = &self.tokens[index];
        if !token.is_kind(kind) {
            return false;
        }
        // Keywords compare case-insensitively, like PHP itself.
        match content {
            None => true,
            Some(c) if kind == TokenKind::Keyword => token.content().eq_ignore_ascii_case(c),
            Some(c) => token.is_content(c),
        }
    }

    /// Makes sure the token at `index` is whitespace with exactly `content`.
    ///
    /// Replaces an existing whitespace token or inserts a new one, shifting
    /// later tokens. Returns whether the stream changed; callers traversing
    /// back-to-front stay index-safe because only positions at or after
    /// `index` move.
    pub fn ensure_whitespace_at(&mut self, index: usize, content: &str) -> bool {
        match self.tokens.get(index) {
            Some(token) if token.is_whitespace() => {
                if token.is_content(content) {
                    false
                } else {
                    self.tokens[index] = Token::whitespace(content);
                    true
                }
            }
            _ => {
                self.tokens.insert(index, Token::whitespace(content));
                true
            }
        }
    }

    /// Makes sure a whitespace token with exactly `content` sits directly
    /// before the (non-whitespace) token at `index`.
    ///
    /// Returns whether the stream changed. On insertion the anchor token
    /// shifts to `index + 1`.
    pub fn ensure_whitespace_before(&mut self, index: usize, content: &str) -> bool {
        if index > 0 && self.tokens[index - 1].is_whitespace() {
            self.ensure_whitespace_at(index - 1, content)
        } else {
            self.tokens.insert(index, Token::whitespace(content));
            true
        }
    }

    /// Makes sure a whitespace token with exactly `content` sits directly
    /// after the token at `index`.
    pub fn ensure_whitespace_after(&mut self, index: usize, content: &str) -> bool {
        self.ensure_whitespace_at(index + 1, content)
    }

    /// Whether at least one token of any of the given kinds exists.
    #[must_use]
    pub fn any_kind_found(&self, kinds: &[TokenKind]) -> bool {
        self.tokens.iter().any(|t| kinds.contains(&t.kind()))
    }

    /// Whether at least one token of every given kind exists.
    #[must_use]
    pub fn all_kinds_found(&self, kinds: &[TokenKind]) -> bool {
        kinds.iter().all(|k| self.tokens.iter().any(|t| t.is_kind(*k)))
    }

    /// Whether the given keyword appears anywhere in the stream.
    #[must_use]
    pub fn keyword_found(&self, name: &str) -> bool {
        self.tokens.iter().any(|t| t.is_keyword(name))
    }

    /// Concatenates all token contents back into source text.
    #[must_use]
    pub fn to_source(&self) -> String {
        let capacity = self.tokens.iter().map(|t| t.content().len()).sum();
        let mut out = String::with_capacity(capacity);
        for token in &self.tokens {
            out.push_str(token.content());
        }
        out
    }

    /// Checks that every delimiter block is balanced and properly nested.
    ///
    /// Run once after tokenization; fixers rely on this holding and must
    /// preserve it.
    pub fn validate_balance(&self) -> Result<(), TokenizeError> {
        let mut stack: SmallVec<[(BlockKind, char, usize); 16]> = SmallVec::new();
        let mut line = 1usize;
        for token in &self.tokens {
            if let Some(kind) = BlockKind::from_opener(token) {
                let opener = token
                    .content()
                    .chars()
                    .last()
                    .unwrap_or(kind.closer());
                stack.push((kind, opener, line));
            } else if let Some(kind) = BlockKind::from_closer(token) {
                match stack.pop() {
                    None => {
                        return Err(TokenizeError::UnexpectedClose {
                            delimiter: kind.closer(),
                            line,
                        });
                    }
                    Some((open_kind, opener, _)) if open_kind != kind => {
                        return Err(TokenizeError::MismatchedDelimiter {
                            found: kind.closer(),
                            expected: opener,
                            line,
                        });
                    }
                    Some(_) => {}
                }
            }
            line += token.content().matches('\n').count();
        }
        if let Some((_, opener, open_line)) = stack.pop() {
            return Err(TokenizeError::UnclosedDelimiter {
                delimiter: opener,
                line: open_line,
            });
        }
        Ok(())
    }
}

impl std::ops::Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}
