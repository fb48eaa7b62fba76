//! Moves binary operators to the configured side of a line break.

use crate::error::ConfigError;
use crate::fixer::registry::{bool_option, check_known_options, str_option};
use crate::fixer::{AllowedKind, CodeSample, Fixer, FixerDefinition, OptionSchema};
use crate::token::{Token, TokenKind};
use crate::tokens::TokenStream;
use toml::Table;

const NAME: &str = "operator_linebreak";

/// Boolean operators, always in scope.
const BOOLEAN_OPERATORS: &[&str] = &["&&", "||"];

/// Keyword spellings of boolean operators.
const BOOLEAN_KEYWORDS: &[&str] = &["and", "or", "xor"];

/// The rest of the binary operator set, in scope unless `only_booleans`.
/// Ternary `?`/`:` and object operators are deliberately out.
const NON_BOOLEAN_OPERATORS: &[&str] = &[
    "=", "+", "-", "*", "/", "%", ".", "==", "===", "!=", "!==", "<>", "<", ">", "<=", ">=",
    "<=>", "??", "&", "|", "^", "<<", ">>", "**", "+=", "-=", "*=", "/=", ".=", "%=", "**=",
    "&=", "|=", "^=", "<<=", ">>=", "??=",
];

/// Which side of the line break the operator belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorPosition {
    /// The operator starts the continuation line.
    Beginning,
    /// The operator ends the line before the break.
    End,
}

impl OperatorPosition {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "beginning" => Some(Self::Beginning),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}

/// Binary operators adjacent to a line break sit on the configured side.
#[derive(Debug, Clone, Copy)]
pub struct OperatorLinebreakFixer {
    only_booleans: bool,
    position: OperatorPosition,
}

impl Default for OperatorLinebreakFixer {
    fn default() -> Self {
        Self {
            only_booleans: false,
            position: OperatorPosition::Beginning,
        }
    }
}

impl OperatorLinebreakFixer {
    /// Builds a fixer with explicit options.
    #[must_use]
    pub fn new(only_booleans: bool, position: OperatorPosition) -> Self {
        Self {
            only_booleans,
            position,
        }
    }

    /// Builds the fixer from a validated option table.
    pub fn from_options(options: Option<&Table>) -> Result<Self, ConfigError> {
        if let Some(table) = options {
            check_known_options(NAME, &Self::schema(), table)?;
        }
        let only_booleans = bool_option(NAME, options, "only_booleans", false)?;
        let position_raw = str_option(NAME, options, "position", "beginning")?;
        let position =
            OperatorPosition::parse(&position_raw).ok_or_else(|| ConfigError::InvalidValue {
                fixer: NAME.to_owned(),
                option: "position".to_owned(),
                expected: "\"beginning\" or \"end\"",
                found: position_raw,
            })?;
        Ok(Self {
            only_booleans,
            position,
        })
    }

    fn schema() -> Vec<OptionSchema> {
        vec![
            OptionSchema {
                name: "only_booleans",
                description: "whether to limit operators to boolean ones",
                kind: AllowedKind::Boolean,
                default: toml::Value::Boolean(false),
            },
            OptionSchema {
                name: "position",
                description: "whether the operator should start or end the line",
                kind: AllowedKind::String,
                default: toml::Value::String("beginning".to_owned()),
            },
        ]
    }

    fn is_selected(&self, token: &Token) -> bool {
        match token.kind() {
            TokenKind::Operator => {
                BOOLEAN_OPERATORS.contains(&token.content())
                    || (!self.only_booleans && NON_BOOLEAN_OPERATORS.contains(&token.content()))
            }
            TokenKind::Keyword => BOOLEAN_KEYWORDS.iter().any(|k| token.is_keyword(k)),
            _ => false,
        }
    }
}

impl Fixer for OperatorLinebreakFixer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn definition(&self) -> FixerDefinition {
        FixerDefinition {
            summary: "Binary operators must be at the beginning or at the end of the line \
                      when the expression wraps.",
            samples: vec![CodeSample {
                before: "<?php\nreturn $foo ||\n    $bar;\n",
                after: "<?php\nreturn $foo\n    || $bar;\n",
            }],
            minimum_php_version: None,
        }
    }

    fn options_schema(&self) -> Vec<OptionSchema> {
        Self::schema()
    }

    fn is_candidate(&self, tokens: &TokenStream) -> bool {
        tokens.any_kind_found(&[TokenKind::Operator])
            || BOOLEAN_KEYWORDS.iter().any(|k| tokens.keyword_found(k))
    }

    fn apply(&self, tokens: &mut TokenStream) {
        // Collect first, then relocate back-to-front: a relocation only
        // shifts indices at or above the operator it moves.
        let operator_indices: Vec<usize> = (0..tokens.len())
            .filter(|&i| self.is_selected(&tokens[i]))
            .collect();

        for &index in operator_indices.iter().rev() {
            let Some(prev) = tokens.prev_meaningful(index) else {
                continue;
            };
            let Some(next) = tokens.next_meaningful(index) else {
                continue;
            };
            // Binary use only: the left neighbor must be able to end an
            // operand, otherwise this is a unary occurrence.
            if !ends_operand(&tokens[prev]) {
                continue;
            }

            let break_before = has_line_break(tokens, prev, index);
            let break_after = has_line_break(tokens, index, next);

            match self.position {
                OperatorPosition::Beginning if break_after => {
                    move_to_continuation_line(tokens, index, next);
                }
                OperatorPosition::End if break_before => {
                    move_to_operand_line(tokens, prev, index);
                }
                _ => {}
            }
        }
    }
}

fn ends_operand(token: &Token) -> bool {
    matches!(
        token.kind(),
        TokenKind::Variable
            | TokenKind::Identifier
            | TokenKind::NumberLiteral
            | TokenKind::StringLiteral
    ) || (token.is_kind(TokenKind::Punctuation) && matches!(token.content(), ")" | "]"))
}

fn has_line_break(tokens: &TokenStream, from: usize, to: usize) -> bool {
    (from + 1..to).any(|i| tokens[i].is_whitespace() && tokens[i].has_newline())
}

/// Places the operator at the start of the continuation line, one space
/// before the next operand. Comments between operand and operator stay on
/// the operand's line.
fn move_to_continuation_line(tokens: &mut TokenStream, index: usize, next: usize) {
    let operator = tokens[index].clone();
    tokens.insert_many(next, [operator, Token::whitespace(" ")]);
    tokens.remove(index);
    collapse_whitespace_at(tokens, index);
}

/// Places the operator at the end of the previous operand's line, directly
/// after the operand and before any trailing comment.
fn move_to_operand_line(tokens: &mut TokenStream, prev: usize, index: usize) {
    let operator = tokens[index].clone();
    tokens.insert_many(prev + 1, [Token::whitespace(" "), operator]);
    let removed_at = index + 2;
    tokens.remove(removed_at);
    collapse_whitespace_at(tokens, removed_at);
}

/// After removing the operator at `index`, merges the whitespace tokens
/// left adjacent to each other, preferring the one carrying the line break.
fn collapse_whitespace_at(tokens: &mut TokenStream, index: usize) {
    if index == 0 || index >= tokens.len() {
        return;
    }
    let left = &tokens[index - 1];
    let right = &tokens[index];
    if !left.is_whitespace() || !right.is_whitespace() {
        return;
    }
    let merged = if right.has_newline() {
        right.content().to_owned()
    } else if left.has_newline() {
        left.content().to_owned()
    } else {
        " ".to_owned()
    };
    tokens.replace(index - 1, Token::whitespace(merged));
    tokens.remove(index);
}
