//! Builds configured fixer instances from raw option tables.
//!
//! Validation happens here, once, before any file is processed: unknown
//! fixer names, unknown option keys and wrong-kind values are all
//! configuration errors.

use crate::config::Config;
use crate::error::ConfigError;
use crate::fixer::data_provider_name::DataProviderNameFixer;
use crate::fixer::multiline_comment::MultilineCommentOpeningClosingAloneFixer;
use crate::fixer::no_phpstorm_generated_comment::NoPhpStormGeneratedCommentFixer;
use crate::fixer::operator_linebreak::OperatorLinebreakFixer;
use crate::fixer::promoted_properties::MultilinePromotedPropertiesFixer;
use crate::fixer::{Fixer, OptionSchema};
use toml::Table;

/// Names of every fixer this build ships, in registration order.
pub const FIXER_NAMES: &[&str] = &[
    "data_provider_name",
    "multiline_comment_opening_closing_alone",
    "no_phpstorm_generated_comment",
    "operator_linebreak",
    "multiline_promoted_properties",
];

/// Instantiates the enabled fixers with their validated configuration.
pub fn build_fixers(config: &Config) -> Result<Vec<Box<dyn Fixer>>, ConfigError> {
    let mut fixers: Vec<Box<dyn Fixer>> = Vec::new();
    for name in config.phpfix.enabled_fixers() {
        let options = config.phpfix.fixer_options(name);
        let fixer: Box<dyn Fixer> = match name {
            "data_provider_name" => Box::new(DataProviderNameFixer::from_options(options)?),
            "multiline_comment_opening_closing_alone" => {
                reject_options(name, options)?;
                Box::new(MultilineCommentOpeningClosingAloneFixer)
            }
            "no_phpstorm_generated_comment" => {
                reject_options(name, options)?;
                Box::new(NoPhpStormGeneratedCommentFixer)
            }
            "operator_linebreak" => Box::new(OperatorLinebreakFixer::from_options(options)?),
            "multiline_promoted_properties" => {
                Box::new(MultilinePromotedPropertiesFixer::from_options(options)?)
            }
            _ => return Err(ConfigError::UnknownFixer(name.to_owned())),
        };
        fixers.push(fixer);
    }
    Ok(fixers)
}

/// Builds every fixer with default configuration, for `phpfix rules`.
#[must_use]
pub fn all_fixers_with_defaults() -> Vec<Box<dyn Fixer>> {
    vec![
        Box::new(DataProviderNameFixer::default()),
        Box::new(MultilineCommentOpeningClosingAloneFixer),
        Box::new(NoPhpStormGeneratedCommentFixer),
        Box::new(OperatorLinebreakFixer::default()),
        Box::new(MultilinePromotedPropertiesFixer::default()),
    ]
}

/// Rejects any option for a fixer that declares none.
fn reject_options(fixer: &str, options: Option<&Table>) -> Result<(), ConfigError> {
    if let Some(table) = options {
        if let Some(key) = table.keys().next() {
            return Err(ConfigError::UnknownOption {
                fixer: fixer.to_owned(),
                option: key.clone(),
            });
        }
    }
    Ok(())
}

/// Rejects option keys not declared in `schema`.
pub(crate) fn check_known_options(
    fixer: &str,
    schema: &[OptionSchema],
    options: &Table,
) -> Result<(), ConfigError> {
    for key in options.keys() {
        if !schema.iter().any(|o| o.name == key) {
            return Err(ConfigError::UnknownOption {
                fixer: fixer.to_owned(),
                option: key.clone(),
            });
        }
    }
    Ok(())
}

/// Reads a string option, or `default` when absent.
pub(crate) fn str_option(
    fixer: &str,
    options: Option<&Table>,
    name: &str,
    default: &str,
) -> Result<String, ConfigError> {
    match options.and_then(|t| t.get(name)) {
        None => Ok(default.to_owned()),
        Some(toml::Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ConfigError::InvalidValue {
            fixer: fixer.to_owned(),
            option: name.to_owned(),
            expected: "string",
            found: other.to_string(),
        }),
    }
}

/// Reads a boolean option, or `default` when absent.
pub(crate) fn bool_option(
    fixer: &str,
    options: Option<&Table>,
    name: &str,
    default: bool,
) -> Result<bool, ConfigError> {
    match options.and_then(|t| t.get(name)) {
        None => Ok(default),
        Some(toml::Value::Boolean(b)) => Ok(*b),
        Some(other) => Err(ConfigError::InvalidValue {
            fixer: fixer.to_owned(),
            option: name.to_owned(),
            expected: "boolean",
            found: other.to_string(),
        }),
    }
}

/// Reads a non-negative integer option, or `default` when absent.
pub(crate) fn usize_option(
    fixer: &str,
    options: Option<&Table>,
    name: &str,
    default: usize,
) -> Result<usize, ConfigError> {
    match options.and_then(|t| t.get(name)) {
        None => Ok(default),
        Some(toml::Value::Integer(i)) if *i >= 0 => Ok(usize::try_from(*i).unwrap_or(usize::MAX)),
        Some(other) => Err(ConfigError::InvalidValue {
            fixer: fixer.to_owned(),
            option: name.to_owned(),
            expected: "non-negative integer",
            found: other.to_string(),
        }),
    }
}
