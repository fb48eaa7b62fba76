//! Lossless PHP tokenizer.
//!
//! Splits raw source into the closed [`TokenKind`] set without dropping a
//! byte: concatenating the produced token contents reproduces the input
//! exactly. Heredoc bodies and string interpolation are kept verbatim inside
//! their literal token; no fixer inspects their interior.

use crate::error::TokenizeError;
use crate::token::{Token, TokenKind};
use crate::tokens::TokenStream;

/// Reserved words lexed as [`TokenKind::Keyword`], matched case-insensitively.
const KEYWORDS: &[&str] = &[
    "abstract", "and", "array", "as", "break", "callable", "case", "catch", "class", "clone",
    "const", "continue", "declare", "default", "do", "echo", "else", "elseif", "enum", "extends",
    "final", "finally", "fn", "for", "foreach", "function", "global", "if", "implements",
    "instanceof", "insteadof", "interface", "list", "match", "namespace", "new", "or", "print",
    "private", "protected", "public", "readonly", "return", "static", "switch", "throw", "trait",
    "try", "use", "var", "while", "xor", "yield",
];

/// Multi-character operators, ordered so longest-match wins.
const OPERATORS: &[&str] = &[
    "<=>", "===", "!==", "**=", "<<=", ">>=", "??=", "?->", "...", "==", "!=", "<>", "<=", ">=",
    "&&", "||", "->", "=>", "++", "--", "+=", "-=", "*=", "/=", ".=", "%=", "??", "**", "<<",
    ">>", "|=", "&=", "^=", "+", "-", "*", "/", "%", ".", "=", "<", ">", "!", "?", "|", "&", "^",
    "~", "@",
];

const SINGLE_PUNCTUATION: &[char] = &['(', ')', '{', '}', '[', ']', ',', ';', '\\', ':', '$'];

/// Tokenizes `source` and validates delimiter balance.
///
/// This is the only entry point fixers go through; an error here skips the
/// file without touching it.
pub fn tokenize(source: &str) -> Result<TokenStream, TokenizeError> {
    let tokens = Lexer::new(source).run()?;
    let stream = TokenStream::new(tokens);
    stream.validate_balance()?;
    Ok(stream)
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    in_php: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            in_php: false,
            tokens: Vec::with_capacity(source.len() / 4),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, TokenizeError> {
        while self.pos < self.bytes.len() {
            if self.in_php {
                self.lex_php()?;
            } else {
                self.lex_html();
            }
        }
        Ok(self.tokens)
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        let text = &self.source[start..self.pos];
        self.line += text.matches('\n').count();
        self.tokens.push(Token::new(kind, text));
    }

    /// Everything up to the next open tag is one inline-HTML token.
    fn lex_html(&mut self) {
        let start = self.pos;
        let rest = self.rest();
        let tag_at = find_open_tag(rest);
        match tag_at {
            Some((offset, tag_len)) => {
                if offset > 0 {
                    self.pos += offset;
                    self.push(TokenKind::InlineHtml, start);
                }
                let tag_start = self.pos;
                self.pos += tag_len;
                self.push(TokenKind::OpenTag, tag_start);
                self.in_php = true;
            }
            None => {
                self.pos = self.bytes.len();
                self.push(TokenKind::InlineHtml, start);
            }
        }
    }

    fn lex_php(&mut self) -> Result<(), TokenizeError> {
        let start = self.pos;
        let rest = self.rest();
        let first = rest.chars().next().unwrap_or('\0');

        if first.is_whitespace() {
            self.pos += rest
                .char_indices()
                .find(|&(_, c)| !c.is_whitespace())
                .map_or(rest.len(), |(i, _)| i);
            self.push(TokenKind::Whitespace, start);
            return Ok(());
        }

        if rest.starts_with("?>") {
            self.pos += 2;
            self.push(TokenKind::CloseTag, start);
            self.in_php = false;
            return Ok(());
        }

        if rest.starts_with("/*") {
            return self.lex_block_comment(start);
        }
        if rest.starts_with("//") || (first == '#' && !rest.starts_with("#[")) {
            // A close tag ends a line comment just like a newline does.
            let newline = rest.find('\n').unwrap_or(rest.len());
            let close_tag = rest.find("?>").unwrap_or(rest.len());
            self.pos += newline.min(close_tag);
            // Keep any \r with the whitespace token, not the comment.
            if self.source[start..self.pos].ends_with('\r') {
                self.pos -= 1;
            }
            self.push(TokenKind::Comment, start);
            return Ok(());
        }
        if rest.starts_with("#[") {
            self.pos += 2;
            self.push(TokenKind::Punctuation, start);
            return Ok(());
        }

        if first == '\'' || first == '"' {
            return self.lex_string(start, first);
        }

        if first == '$' && is_ident_start(rest.chars().nth(1).unwrap_or('\0')) {
            self.pos += 1 + ident_len(&rest[1..]);
            self.push(TokenKind::Variable, start);
            return Ok(());
        }

        if first.is_ascii_digit() {
            self.pos += number_len(rest);
            self.push(TokenKind::NumberLiteral, start);
            return Ok(());
        }

        if is_ident_start(first) {
            self.pos += ident_len(rest);
            let text = &self.source[start..self.pos];
            let kind = if KEYWORDS.iter().any(|k| text.eq_ignore_ascii_case(k)) {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            };
            self.push(kind, start);
            return Ok(());
        }

        if rest.starts_with("::") {
            self.pos += 2;
            self.push(TokenKind::Punctuation, start);
            return Ok(());
        }
        if SINGLE_PUNCTUATION.contains(&first) {
            self.pos += first.len_utf8();
            self.push(TokenKind::Punctuation, start);
            return Ok(());
        }

        for op in OPERATORS {
            if rest.starts_with(op) {
                self.pos += op.len();
                self.push(TokenKind::Operator, start);
                return Ok(());
            }
        }

        // Anything unclassified degrades to single-char punctuation so the
        // stream stays lossless.
        self.pos += first.len_utf8();
        self.push(TokenKind::Punctuation, start);
        Ok(())
    }

    fn lex_block_comment(&mut self, start: usize) -> Result<(), TokenizeError> {
        let rest = self.rest();
        let end = rest[2..].find("*/").map_or(rest.len(), |i| i + 4);
        self.pos += end;
        let text = &self.source[start..self.pos];
        self.push(classify_block_comment(text), start);
        Ok(())
    }

    fn lex_string(&mut self, start: usize, quote: char) -> Result<(), TokenizeError> {
        let start_line = self.line;
        let mut chars = self.rest().char_indices().skip(1);
        while let Some((i, c)) = chars.next() {
            if c == '\\' {
                chars.next();
            } else if c == quote {
                self.pos += i + quote.len_utf8();
                self.push(TokenKind::StringLiteral, start);
                return Ok(());
            }
        }
        Err(TokenizeError::UnterminatedString { line: start_line })
    }
}

/// A `/**` comment followed by whitespace is a doc comment, same rule the
/// PHP tokenizer applies.
pub(crate) fn classify_block_comment(text: &str) -> TokenKind {
    let is_doc = text
        .strip_prefix("/**")
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_whitespace);
    if is_doc {
        TokenKind::DocComment
    } else {
        TokenKind::Comment
    }
}

fn find_open_tag(text: &str) -> Option<(usize, usize)> {
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find("<?") {
        let at = search_from + rel;
        let after = &text[at + 2..];
        // Byte comparison: the remainder may continue with multibyte HTML.
        if after
            .as_bytes()
            .get(..3)
            .is_some_and(|b| b.eq_ignore_ascii_case(b"php"))
        {
            return Some((at, 5));
        }
        if after.starts_with('=') {
            return Some((at, 3));
        }
        search_from = at + 2;
    }
    None
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c as u32 >= 0x80
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c as u32 >= 0x80
}

fn ident_len(text: &str) -> usize {
    text.char_indices()
        .find(|&(_, c)| !is_ident_continue(c))
        .map_or(text.len(), |(i, _)| i)
}

fn number_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    if text.starts_with("0x") || text.starts_with("0X") {
        let mut i = 2;
        while i < bytes.len() && (bytes[i].is_ascii_hexdigit() || bytes[i] == b'_') {
            i += 1;
        }
        return i;
    }
    let mut i = 0;
    let mut seen_dot = false;
    let mut seen_exp = false;
    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_digit() || b == b'_' {
            i += 1;
        } else if b == b'.' && !seen_dot && !seen_exp && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
            seen_dot = true;
            i += 1;
        } else if (b == b'e' || b == b'E')
            && !seen_exp
            && bytes
                .get(i + 1)
                .is_some_and(|&n| n.is_ascii_digit() || n == b'+' || n == b'-')
        {
            seen_exp = true;
            i += 1;
        } else {
            break;
        }
    }
    i
}
