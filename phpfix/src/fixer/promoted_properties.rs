//! Splits constructors with promoted properties onto one line per
//! parameter.

use crate::analyzer::constructor::{find_non_abstract_constructor, parameters};
use crate::analyzer::whitespace::{detect_indent, WhitespaceStyle};
use crate::error::ConfigError;
use crate::fixer::registry::{check_known_options, usize_option};
use crate::fixer::{
    AllowedKind, CodeSample, Fixer, FixerDefinition, OptionSchema, OrderingConstraints,
};
use crate::tokens::{BlockKind, TokenStream};
use toml::Table;

const NAME: &str = "multiline_promoted_properties";

/// A constructor with promoted properties gets one parameter per line.
#[derive(Debug, Clone)]
pub struct MultilinePromotedPropertiesFixer {
    minimum_number_of_parameters: usize,
    style: WhitespaceStyle,
}

impl Default for MultilinePromotedPropertiesFixer {
    fn default() -> Self {
        Self {
            minimum_number_of_parameters: 1,
            style: WhitespaceStyle::default(),
        }
    }
}

impl MultilinePromotedPropertiesFixer {
    /// Builds a fixer with an explicit parameter count floor.
    #[must_use]
    pub fn new(minimum_number_of_parameters: usize) -> Self {
        Self {
            minimum_number_of_parameters,
            style: WhitespaceStyle::default(),
        }
    }

    /// Builds the fixer from a validated option table.
    pub fn from_options(options: Option<&Table>) -> Result<Self, ConfigError> {
        if let Some(table) = options {
            check_known_options(NAME, &Self::schema(), table)?;
        }
        Ok(Self {
            minimum_number_of_parameters: usize_option(
                NAME,
                options,
                "minimum_number_of_parameters",
                1,
            )?,
            style: WhitespaceStyle::default(),
        })
    }

    fn schema() -> Vec<OptionSchema> {
        vec![OptionSchema {
            name: "minimum_number_of_parameters",
            description: "minimum number of parameters in the constructor to fix",
            kind: AllowedKind::Integer,
            default: toml::Value::Integer(1),
        }]
    }

    fn reflow(&self, tokens: &mut TokenStream, open_paren: usize, close_paren: usize) {
        let indent = detect_indent(tokens, open_paren);
        let closing_break = format!("{}{}", self.style.line_ending(), indent);
        let parameter_break = format!(
            "{}{}{}",
            self.style.line_ending(),
            indent,
            self.style.indent()
        );

        // A trailing comma keeps the closing break that follows it; no
        // parameter break belongs after it.
        let trailing_comma = tokens
            .prev_meaningful(close_paren)
            .filter(|&i| tokens[i].is_content(","));

        // Closing parenthesis first; the walk below never revisits indices
        // at or beyond it.
        tokens.ensure_whitespace_before(close_paren, &closing_break);

        // Walk backward over top-level commas, jumping nested blocks whole.
        let mut cursor = close_paren;
        while let Some(prev) = tokens.prev_meaningful(cursor) {
            if prev <= open_paren {
                break;
            }
            if BlockKind::from_closer(&tokens[prev]).is_some() {
                if let Some(start) = tokens.find_block_start(prev) {
                    cursor = start;
                    continue;
                }
            }
            if tokens[prev].is_content(",") && Some(prev) != trailing_comma {
                tokens.ensure_whitespace_after(prev, &parameter_break);
            }
            cursor = prev;
        }
        tokens.ensure_whitespace_after(open_paren, &parameter_break);
    }
}

impl Fixer for MultilinePromotedPropertiesFixer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn definition(&self) -> FixerDefinition {
        FixerDefinition {
            summary: "A constructor with promoted properties must have them in separate lines.",
            samples: vec![CodeSample {
                before: "<?php class Foo {\n    public function __construct(private array $a, private bool $b, private int $i) {}\n}\n",
                after: "<?php class Foo {\n    public function __construct(\n        private array $a,\n        private bool $b,\n        private int $i\n    ) {}\n}\n",
            }],
            minimum_php_version: Some("8.0"),
        }
    }

    /// Must run after the fixer that promotes constructor properties and
    /// before generic brace layout.
    fn priority(&self) -> i32 {
        36
    }

    fn constraints(&self) -> OrderingConstraints {
        OrderingConstraints {
            runs_before: &["braces"],
            runs_after: &["promoted_constructor_property"],
        }
    }

    fn options_schema(&self) -> Vec<OptionSchema> {
        Self::schema()
    }

    fn is_candidate(&self, tokens: &TokenStream) -> bool {
        tokens.keyword_found("function")
            && ["public", "protected", "private", "readonly"]
                .iter()
                .any(|k| tokens.keyword_found(k))
    }

    fn apply(&self, tokens: &mut TokenStream) {
        // Back-to-front so reflowing one constructor never shifts the
        // classes still to visit.
        for index in (0..tokens.len()).rev() {
            if !tokens[index].is_keyword("class") {
                continue;
            }
            let Some(analysis) = find_non_abstract_constructor(tokens, index) else {
                continue;
            };
            let Some(open_paren) = tokens.next_content(analysis.name_index, "(") else {
                continue;
            };
            let Some(close_paren) = tokens.find_block_end(open_paren) else {
                continue;
            };

            let params = parameters(tokens, open_paren, close_paren);
            let has_promoted = params.iter().any(|p| p.promoted);
            if !has_promoted || params.len() < self.minimum_number_of_parameters {
                continue;
            }

            self.reflow(tokens, open_paren, close_paren);
        }
    }
}
