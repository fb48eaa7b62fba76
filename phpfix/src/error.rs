//! Error types shared across the engine.
//!
//! Three failure domains exist, and they never bleed into each other:
//! tokenization errors abort a single file, configuration errors abort a
//! fixer's activation at setup, and scheduling errors abort the whole run
//! before any file is touched.

use thiserror::Error;

/// Failure while turning raw source into a token stream.
///
/// Any of these skips the offending file; the batch continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// A closing delimiter appeared without a matching opener.
    #[error("unexpected closing delimiter `{delimiter}` on line {line}")]
    UnexpectedClose {
        /// The delimiter character found.
        delimiter: char,
        /// 1-indexed line of the offending token.
        line: usize,
    },
    /// An opening delimiter was never closed before end of input.
    #[error("unclosed delimiter `{delimiter}` opened on line {line}")]
    UnclosedDelimiter {
        /// The delimiter character left open.
        delimiter: char,
        /// 1-indexed line where it was opened.
        line: usize,
    },
    /// Delimiters are closed in the wrong order, e.g. `(]`.
    #[error("mismatched delimiter: `{found}` on line {line} closes `{expected}`")]
    MismatchedDelimiter {
        /// The closer that was found.
        found: char,
        /// The opener on top of the stack.
        expected: char,
        /// 1-indexed line of the closer.
        line: usize,
    },
    /// A quoted string ran to end of input.
    #[error("unterminated string literal starting on line {line}")]
    UnterminatedString {
        /// 1-indexed line where the literal started.
        line: usize,
    },
}

/// Invalid fixer configuration, detected at setup before any file is read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The enabled-fixer list names a rule that does not exist.
    #[error("unknown fixer `{0}`")]
    UnknownFixer(String),
    /// An option table contains a key the fixer's schema does not declare.
    #[error("fixer `{fixer}` has no option `{option}`")]
    UnknownOption {
        /// Fixer whose schema was consulted.
        fixer: String,
        /// The unrecognized option name.
        option: String,
    },
    /// An option value has the wrong kind or an out-of-range value.
    #[error("invalid value for `{fixer}.{option}`: expected {expected}, got `{found}`")]
    InvalidValue {
        /// Fixer whose schema was consulted.
        fixer: String,
        /// Option that failed validation.
        option: String,
        /// Human-readable expected kind, e.g. "string".
        expected: &'static str,
        /// Display form of the rejected value.
        found: String,
    },
}

/// Failure while resolving the fixer execution order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The declared runs-before/runs-after relations form a cycle.
    #[error("ordering constraint cycle between fixers: {}", names.join(" -> "))]
    Cycle {
        /// Names of the fixers participating in the cycle, in edge order.
        names: Vec<String>,
    },
    /// A declared constraint contradicts the numeric priorities.
    #[error(
        "fixer `{before}` (priority {before_priority}) must run before `{after}` \
         (priority {after_priority}) but has lower priority"
    )]
    PriorityConflict {
        /// The fixer declared to run earlier.
        before: String,
        /// Its numeric priority.
        before_priority: i32,
        /// The fixer declared to run later.
        after: String,
        /// Its numeric priority.
        after_priority: i32,
    },
}

/// Top-level error for fixing one file.
#[derive(Debug, Error)]
pub enum FixError {
    /// The file could not be tokenized.
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    /// The file could not be read or written.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
