/// Name of the dedicated configuration file searched for in the target
/// directory and its ancestors.
pub const CONFIG_FILENAME: &str = ".phpfix.toml";

/// Fallback configuration file name, without the leading dot.
pub const ALT_CONFIG_FILENAME: &str = "phpfix.toml";

/// File extension of the sources the fix command walks.
pub const PHP_EXTENSION: &str = "php";
