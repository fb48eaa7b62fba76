//! Renames a data provider used by exactly one test after that test.
//!
//! Risky: other code may locate the provider by its old name through
//! reflection or convention, so the rename is an explicit, documented
//! behavioral change.

use crate::analyzer::data_provider::data_providers;
use crate::analyzer::test_class::TestClassRanges;
use crate::error::ConfigError;
use crate::fixer::registry::{check_known_options, str_option};
use crate::fixer::{AllowedKind, CodeSample, Fixer, FixerDefinition, OptionSchema};
use crate::token::{Token, TokenKind};
use crate::tokens::TokenStream;
use regex::Regex;
use std::sync::OnceLock;
use toml::Table;

const NAME: &str = "data_provider_name";
const DEFAULT_PREFIX: &str = "provide";
const DEFAULT_SUFFIX: &str = "Cases";

/// Strips the `test` prefix (plus trailing underscores) from a test name.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
fn test_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new("(?i)^test_*").expect("invalid test prefix regex"))
}

/// Renames single-use data providers to match their test's name.
#[derive(Debug, Clone)]
pub struct DataProviderNameFixer {
    prefix: String,
    suffix: String,
}

impl Default for DataProviderNameFixer {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_owned(),
            suffix: DEFAULT_SUFFIX.to_owned(),
        }
    }
}

impl DataProviderNameFixer {
    /// Builds a fixer with explicit prefix and suffix.
    #[must_use]
    pub fn new(prefix: &str, suffix: &str) -> Self {
        Self {
            prefix: prefix.to_owned(),
            suffix: suffix.to_owned(),
        }
    }

    /// Builds the fixer from a validated option table.
    pub fn from_options(options: Option<&Table>) -> Result<Self, ConfigError> {
        if let Some(table) = options {
            check_known_options(NAME, &Self::schema(), table)?;
        }
        Ok(Self {
            prefix: str_option(NAME, options, "prefix", DEFAULT_PREFIX)?,
            suffix: str_option(NAME, options, "suffix", DEFAULT_SUFFIX)?,
        })
    }

    fn schema() -> Vec<OptionSchema> {
        vec![
            OptionSchema {
                name: "prefix",
                description: "prefix that replaces \"test\"",
                kind: AllowedKind::String,
                default: toml::Value::String(DEFAULT_PREFIX.to_owned()),
            },
            OptionSchema {
                name: "suffix",
                description: "suffix to be added at the end",
                kind: AllowedKind::String,
                default: toml::Value::String(DEFAULT_SUFFIX.to_owned()),
            },
        ]
    }

    /// Derives the provider name for a test method name.
    ///
    /// Only the first character's case is adjusted after stripping the
    /// `test` prefix; mixed case and leading digits pass through untouched.
    fn provider_name_for_test(&self, test_name: &str) -> String {
        let mut stem = test_prefix_re().replace(test_name, "").into_owned();
        if self.prefix.is_empty() {
            lower_first(&mut stem);
        } else if !self.prefix.ends_with('_') {
            upper_first(&mut stem);
        }
        format!("{}{}{}", self.prefix, stem, self.suffix)
    }

    fn fix_class(&self, tokens: &mut TokenStream, body_start: usize, body_end: usize) {
        for record in data_providers(tokens, body_start, body_end) {
            // Providers shared by several tests have no single right name.
            if record.usage_indices.len() != 1 {
                continue;
            }
            let usage_index = record.usage_indices[0];

            let Some(test_name_index) = tokens.next_of_kind(usage_index, &[TokenKind::Identifier])
            else {
                continue;
            };
            let new_name = self.provider_name_for_test(tokens[test_name_index].content());

            let collision = tokens
                .find_sequence(
                    &[
                        (TokenKind::Keyword, Some("function")),
                        (TokenKind::Identifier, Some(&new_name)),
                    ],
                    body_start,
                    body_end,
                )
                .is_some();
            if collision {
                continue;
            }

            tokens.replace(
                record.name_index,
                Token::new(TokenKind::Identifier, new_name.as_str()),
            );

            // Patch only the annotation payload inside the doc comment;
            // everything else in that token stays verbatim.
            let pattern = format!(r"(@dataProvider\s+){}", regex::escape(&record.name));
            let Ok(annotation_re) = Regex::new(&pattern) else {
                continue;
            };
            let usage_kind = tokens[usage_index].kind();
            let old_content = tokens[usage_index].content().to_owned();
            let new_content = annotation_re
                .replace_all(&old_content, format!("${{1}}{new_name}"))
                .into_owned();
            if new_content != old_content {
                tokens.replace(usage_index, Token::new(usage_kind, new_content));
            }
        }
    }
}

impl Fixer for DataProviderNameFixer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn definition(&self) -> FixerDefinition {
        FixerDefinition {
            summary: "Data provider names used only once must match the name of the test.",
            samples: vec![CodeSample {
                before: "<?php\nclass FooTest extends TestCase {\n    /**\n     * @dataProvider dataProvider\n     */\n    public function testSomething($expected, $actual) {}\n    public function dataProvider() {}\n}\n",
                after: "<?php\nclass FooTest extends TestCase {\n    /**\n     * @dataProvider provideSomethingCases\n     */\n    public function testSomething($expected, $actual) {}\n    public function provideSomethingCases() {}\n}\n",
            }],
            minimum_php_version: None,
        }
    }

    fn is_risky(&self) -> bool {
        true
    }

    fn options_schema(&self) -> Vec<OptionSchema> {
        Self::schema()
    }

    fn is_candidate(&self, tokens: &TokenStream) -> bool {
        tokens.all_kinds_found(&[TokenKind::DocComment, TokenKind::Identifier])
            && tokens.keyword_found("class")
            && tokens.keyword_found("extends")
            && tokens.keyword_found("function")
    }

    fn apply(&self, tokens: &mut TokenStream) {
        // Only token contents change here, never token counts, so the
        // collected ranges stay valid throughout.
        let ranges: Vec<_> = TestClassRanges::new(tokens).collect();
        for (body_start, body_end) in ranges {
            self.fix_class(tokens, body_start, body_end);
        }
    }
}

fn upper_first(s: &mut String) {
    if let Some(first) = s.chars().next() {
        let upper = first.to_ascii_uppercase();
        s.replace_range(..first.len_utf8(), &upper.to_string());
    }
}

fn lower_first(s: &mut String) {
    if let Some(first) = s.chars().next() {
        let lower = first.to_ascii_lowercase();
        s.replace_range(..first.len_utf8(), &lower.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_default_provider_name() {
        let fixer = DataProviderNameFixer::default();
        assert_eq!(
            fixer.provider_name_for_test("testSomething"),
            "provideSomethingCases"
        );
        assert_eq!(fixer.provider_name_for_test("test_foo"), "provideFooCases");
    }

    #[test]
    fn empty_prefix_lowercases_stem() {
        let fixer = DataProviderNameFixer {
            prefix: String::new(),
            suffix: "Data".to_owned(),
        };
        assert_eq!(fixer.provider_name_for_test("testSomething"), "somethingData");
    }

    #[test]
    fn underscore_prefix_keeps_stem_case() {
        let fixer = DataProviderNameFixer {
            prefix: "data_".to_owned(),
            suffix: String::new(),
        };
        assert_eq!(fixer.provider_name_for_test("test_snake_case"), "data_snake_case");
    }
}
