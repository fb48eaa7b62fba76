//! Fixer contract and shared rule metadata.
//!
//! A fixer is a self-contained rule: a cheap applicability test, an
//! immutable configuration (built once at setup, so one instance is safely
//! shared across per-file workers), a priority, a risk classification and a
//! rewrite procedure. Ordering relative to other rules is declared by name
//! and resolved by the orchestrator.

use crate::tokens::TokenStream;
use serde::Serialize;

/// Renames single-use data providers after their test.
pub mod data_provider_name;
/// Reshapes multiline comment opening/closing lines.
pub mod multiline_comment;
/// Removes PhpStorm's generated file header comment.
pub mod no_phpstorm_generated_comment;
/// Moves binary operators to the configured side of a line break.
pub mod operator_linebreak;
/// Splits promoted constructor parameters onto separate lines.
pub mod promoted_properties;
/// Builds configured fixer instances from validated options.
pub mod registry;

/// An illustrative before/after pair for a rule's documentation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CodeSample {
    /// Source before the fixer runs.
    pub before: &'static str,
    /// Source after the fixer runs.
    pub after: &'static str,
}

/// Human-facing definition of a rule.
#[derive(Debug, Clone, Serialize)]
pub struct FixerDefinition {
    /// One-paragraph description of what the rule enforces.
    pub summary: &'static str,
    /// Before/after samples.
    pub samples: Vec<CodeSample>,
    /// Minimum PHP version the rewrite output requires, e.g. `"8.0"`.
    pub minimum_php_version: Option<&'static str>,
}

/// The kind a configuration option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedKind {
    /// A TOML string.
    String,
    /// A TOML integer.
    Integer,
    /// A TOML boolean.
    Boolean,
}

impl AllowedKind {
    /// Human-readable kind name for error messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

/// One entry of a fixer's configuration schema.
#[derive(Debug, Clone, Serialize)]
pub struct OptionSchema {
    /// Option name as it appears in the config file.
    pub name: &'static str,
    /// What the option controls.
    pub description: &'static str,
    /// Accepted value kind.
    pub kind: AllowedKind,
    /// Default used when the option is absent.
    pub default: toml::Value,
}

/// Declared ordering relations, naming other rules.
///
/// Names that are not registered are inert; relations only order fixers
/// that are actually enabled together.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderingConstraints {
    /// Rules this fixer must run before.
    pub runs_before: &'static [&'static str],
    /// Rules this fixer must run after.
    pub runs_after: &'static [&'static str],
}

/// A style-correction rule: detect a pattern, rewrite the stream.
pub trait Fixer: Send + Sync {
    /// Unique rule name, snake_case.
    fn name(&self) -> &'static str;

    /// Description and code samples.
    fn definition(&self) -> FixerDefinition;

    /// Scheduling priority; higher runs earlier within a pass.
    fn priority(&self) -> i32 {
        0
    }

    /// Whether the rewrite can change program behavior.
    fn is_risky(&self) -> bool {
        false
    }

    /// Ordering relations to other rules.
    fn constraints(&self) -> OrderingConstraints {
        OrderingConstraints::default()
    }

    /// Configuration schema, in documented order.
    fn options_schema(&self) -> Vec<OptionSchema> {
        Vec::new()
    }

    /// Cheap token-kind-presence pre-check before [`Fixer::apply`].
    fn is_candidate(&self, tokens: &TokenStream) -> bool;

    /// Rewrites the stream in place. Must leave delimiters balanced.
    fn apply(&self, tokens: &mut TokenStream);
}

/// Serializable view of a rule, consumed by `phpfix rules`.
#[derive(Debug, Clone, Serialize)]
pub struct RuleDescriptor {
    /// Rule name.
    pub name: &'static str,
    /// One-paragraph description.
    pub summary: &'static str,
    /// Whether the rule can change behavior.
    pub risky: bool,
    /// Scheduling priority.
    pub priority: i32,
    /// Minimum PHP version gate, if any.
    pub minimum_php_version: Option<&'static str>,
    /// Before/after samples.
    pub samples: Vec<CodeSample>,
    /// Configuration schema.
    pub options: Vec<OptionSchema>,
}

/// Builds the descriptor for one fixer.
#[must_use]
pub fn describe(fixer: &dyn Fixer) -> RuleDescriptor {
    let definition = fixer.definition();
    RuleDescriptor {
        name: fixer.name(),
        summary: definition.summary,
        risky: fixer.is_risky(),
        priority: fixer.priority(),
        minimum_php_version: definition.minimum_php_version,
        samples: definition.samples,
        options: fixer.options_schema(),
    }
}
