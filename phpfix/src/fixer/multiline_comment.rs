//! Keeps multiline comment delimiters on lines of their own.
//!
//! The rewrites are regex edits of the comment token's own content; comment
//! interiors have no structural token model, so this is the one place
//! textual patching is the right tool.

use crate::fixer::{CodeSample, Fixer, FixerDefinition};
use crate::token::{Token, TokenKind};
use crate::tokenizer::classify_block_comment;
use crate::tokens::TokenStream;
use regex::Regex;
use std::sync::OnceLock;

const NAME: &str = "multiline_comment_opening_closing_alone";

macro_rules! comment_re {
    ($fn_name:ident, $pattern:literal) => {
        /// # Panics
        ///
        /// Panics if the regex pattern is invalid.
        fn $fn_name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            #[allow(clippy::expect_used)]
            RE.get_or_init(|| Regex::new($pattern).expect("invalid comment regex"))
        }
    };
}

comment_re!(opening_alone_re, r"^/\*+(\r\n|\r|\n)");
comment_re!(inner_indent_re, r"(\r\n|\r|\n)([ \t]*)");
comment_re!(opening_split_re, r"(?s)^(/\*+)(.*?)(\r\n|\r|\n)(.*)$");
comment_re!(hspace_only_re, r"^[ \t]+$");
comment_re!(closing_alone_re, r"(\r\n|\r|\n)[ \t]*\*+/$");
comment_re!(closing_split_re, r"(\r\n|\r|\n)(.+?)[ \t]*(\*+/)$");

/// Multiline comments and PHPDocs must open and close on dedicated lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultilineCommentOpeningClosingAloneFixer;

impl Fixer for MultilineCommentOpeningClosingAloneFixer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn definition(&self) -> FixerDefinition {
        FixerDefinition {
            summary: "Multiline comments or PHPDocs must contain an opening and closing line \
                      with no additional content.",
            samples: vec![CodeSample {
                before: "<?php\n/** Hello\n * World!\n */;\n",
                after: "<?php\n/**\n * Hello\n * World!\n */;\n",
            }],
            minimum_php_version: None,
        }
    }

    /// Must run before comment alignment fixers, which expect the frame to
    /// already be in place.
    fn priority(&self) -> i32 {
        28
    }

    fn constraints(&self) -> crate::fixer::OrderingConstraints {
        crate::fixer::OrderingConstraints {
            runs_before: &["align_multiline_comment", "multiline_comment_opening_closing"],
            runs_after: &[],
        }
    }

    fn is_candidate(&self, tokens: &TokenStream) -> bool {
        tokens.any_kind_found(&[TokenKind::Comment, TokenKind::DocComment])
    }

    fn apply(&self, tokens: &mut TokenStream) {
        for index in (0..tokens.len()).rev() {
            let token = &tokens[index];
            if !token.is_comment() || !token.has_newline() {
                continue;
            }
            fix_opening(tokens, index);
            fix_closing(tokens, index);
        }
    }
}

fn fix_opening(tokens: &mut TokenStream, index: usize) {
    let content = tokens[index].content().to_owned();
    if opening_alone_re().is_match(&content) {
        return;
    }

    let Some(indent_caps) = inner_indent_re().captures(&content) else {
        return;
    };
    let mut indent = format!("{}*", &indent_caps[2]);

    let Some(caps) = opening_split_re().captures(&content) else {
        return;
    };
    let (opening, before_newline, newline, after_newline) =
        (&caps[1], &caps[2], &caps[3], &caps[4]);

    if !before_newline.starts_with(' ') {
        indent.push(' ');
    }

    let insert = if hspace_only_re().is_match(before_newline) {
        String::new()
    } else {
        format!("{newline}{indent}{before_newline}")
    };

    let new_content = format!("{opening}{insert}{newline}{after_newline}");
    if new_content != content {
        // A reshaped opening can flip the comment between doc and plain.
        let kind = classify_block_comment(&new_content);
        tokens.replace(index, Token::new(kind, new_content));
    }
}

fn fix_closing(tokens: &mut TokenStream, index: usize) {
    let content = tokens[index].content().to_owned();
    if closing_alone_re().is_match(&content) {
        return;
    }

    let indent = inner_indent_re()
        .captures(&content)
        .map_or_else(String::new, |caps| caps[2].to_owned());

    let replacement = format!("${{1}}${{2}}${{1}}{indent}${{3}}");
    let new_content = closing_split_re()
        .replace(&content, replacement.as_str())
        .into_owned();
    if new_content != content {
        let kind = tokens[index].kind();
        tokens.replace(index, Token::new(kind, new_content));
    }
}
