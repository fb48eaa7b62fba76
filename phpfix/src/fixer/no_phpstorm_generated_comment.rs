//! Removes the file header comment PhpStorm generates for new files.

use crate::fixer::{CodeSample, Fixer, FixerDefinition};
use crate::token::{Token, TokenKind};
use crate::tokens::TokenStream;
use regex::Regex;
use std::sync::OnceLock;

const NAME: &str = "no_phpstorm_generated_comment";

/// # Panics
///
/// Panics if the regex pattern is invalid.
fn generated_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"(?i)^/\*+[\s*]*created by phpstorm").expect("invalid comment regex")
    })
}

/// # Panics
///
/// Panics if the regex pattern is invalid.
fn trailing_hspace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"[ \t]+$").expect("invalid whitespace regex"))
}

/// # Panics
///
/// Panics if the regex pattern is invalid.
fn leading_newline_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"^(\r\n|\r|\n)").expect("invalid whitespace regex"))
}

/// Comments generated by PhpStorm carry no information and are removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPhpStormGeneratedCommentFixer;

impl Fixer for NoPhpStormGeneratedCommentFixer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn definition(&self) -> FixerDefinition {
        FixerDefinition {
            summary: "There must be no comment generated by PhpStorm.",
            samples: vec![CodeSample {
                before: "<?php\n/**\n * Created by PhpStorm.\n * User: root\n * Date: 01.01.70\n * Time: 12:34\n */\nnamespace Foo;\n",
                after: "<?php\nnamespace Foo;\n",
            }],
            minimum_php_version: None,
        }
    }

    fn is_candidate(&self, tokens: &TokenStream) -> bool {
        tokens.any_kind_found(&[TokenKind::Comment, TokenKind::DocComment])
    }

    fn apply(&self, tokens: &mut TokenStream) {
        // Back-to-front; every removal happens at or after the current index.
        for index in (0..tokens.len()).rev() {
            let token = &tokens[index];
            if !token.is_comment() || !generated_comment_re().is_match(token.content()) {
                continue;
            }
            strip_leading_newline(tokens, index + 1);
            tokens.remove(index);
            if index > 0 {
                strip_trailing_hspace(tokens, index - 1);
            }
        }
    }
}

/// Drops the first line break of the whitespace token at `index`, so the
/// removed comment's own line ending does not survive it.
fn strip_leading_newline(tokens: &mut TokenStream, index: usize) {
    if index >= tokens.len() || tokens[index].kind() != TokenKind::Whitespace {
        return;
    }
    let content = tokens[index].content().to_owned();
    let stripped = leading_newline_re().replace(&content, "").into_owned();
    if stripped.is_empty() {
        tokens.remove(index);
    } else if stripped != content {
        tokens.replace(index, Token::new(TokenKind::Whitespace, stripped));
    }
}

/// Drops the indentation that used to position the removed comment. A
/// same-line separator with no line break stays, it may be the only thing
/// keeping the neighbors apart.
fn strip_trailing_hspace(tokens: &mut TokenStream, index: usize) {
    if tokens[index].kind() != TokenKind::Whitespace {
        return;
    }
    let content = tokens[index].content().to_owned();
    let stripped = trailing_hspace_re().replace(&content, "").into_owned();
    if !stripped.is_empty() && stripped != content {
        tokens.replace(index, Token::new(TokenKind::Whitespace, stripped));
    }
}
