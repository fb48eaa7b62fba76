use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::constants::{ALT_CONFIG_FILENAME, CONFIG_FILENAME};
use crate::fixer::registry::FIXER_NAMES;
use crate::orchestrator::DEFAULT_MAX_PASSES;

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The main configuration section.
    pub phpfix: PhpfixConfig,
    /// The path to the configuration file this was loaded from.
    /// `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<std::path::PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Configuration options for phpfix.
pub struct PhpfixConfig {
    /// Names of fixers to run. All fixers run when absent.
    pub fixers: Option<Vec<String>>,
    /// Pass cap for the convergence loop.
    pub max_passes: Option<usize>,
    /// Per-fixer option tables, keyed by fixer name under
    /// `[phpfix.options.<fixer>]`.
    #[serde(default)]
    pub options: BTreeMap<String, toml::Table>,
}

impl PhpfixConfig {
    /// Names of the fixers to run, in configured order.
    #[must_use]
    pub fn enabled_fixers(&self) -> Vec<&str> {
        match &self.fixers {
            Some(names) => names.iter().map(String::as_str).collect(),
            None => FIXER_NAMES.to_vec(),
        }
    }

    /// The option table configured for one fixer, if any.
    #[must_use]
    pub fn fixer_options(&self, name: &str) -> Option<&toml::Table> {
        self.options.get(name)
    }

    /// The effective pass cap.
    #[must_use]
    pub fn max_passes(&self) -> usize {
        self.max_passes.unwrap_or(DEFAULT_MAX_PASSES)
    }
}

impl Config {
    /// Loads configuration from default locations in the current directory.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration from an explicit file, bypassing the ancestor
    /// search. Returns `None` when the file cannot be read or parsed.
    #[must_use]
    pub fn load_file(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        let mut config = toml::from_str::<Config>(&content).ok()?;
        config.config_file_path = Some(path.to_path_buf());
        Some(config)
    }

    /// Loads configuration starting from a specific path and traversing up.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            for filename in [CONFIG_FILENAME, ALT_CONFIG_FILENAME] {
                let candidate = current.join(filename);
                if candidate.exists() {
                    if let Ok(content) = fs::read_to_string(&candidate) {
                        if let Ok(mut config) = toml::from_str::<Config>(&content) {
                            config.config_file_path = Some(candidate);
                            return config;
                        }
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }
}
