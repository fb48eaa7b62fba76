use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.phpfix.toml):
  Create this file in your project root to set defaults.

  [phpfix]
  # Fixers to run, in any order (scheduling is automatic).
  # All fixers run when this key is absent.
  fixers = [
      \"data_provider_name\",
      \"multiline_comment_opening_closing_alone\",
      \"no_phpstorm_generated_comment\",
      \"operator_linebreak\",
      \"multiline_promoted_properties\",
  ]
  max_passes = 10            # Pass cap for the convergence loop

  # Per-fixer options
  [phpfix.options.data_provider_name]
  prefix = \"provide\"
  suffix = \"Cases\"

  [phpfix.options.operator_linebreak]
  only_booleans = false
  position = \"beginning\"   # or \"end\"

  [phpfix.options.multiline_promoted_properties]
  minimum_number_of_parameters = 1
";

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are legitimately booleans
pub struct OutputOptions {
    /// Output raw JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output for debugging (shows files being fixed).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: show only the summary line, no per-file details.
    #[arg(long)]
    pub quiet: bool,
}

/// Shared path arguments.
#[derive(Args, Debug, Default, Clone)]
pub struct PathArgs {
    /// Paths to fix (files or directories).
    /// Can be a single directory, multiple files, or a mix of both.
    /// When no paths are provided, defaults to the current directory.
    #[arg()]
    pub paths: Vec<PathBuf>,
}

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "phpfix - Rule-based PHP source rewriting for test providers, comments, operators, and promoted properties",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    #[command(subcommand)]
    /// The subcommand to execute (e.g., rules).
    pub command: Option<Commands>,

    /// Path options.
    #[command(flatten)]
    pub paths: PathArgs,

    /// Report files that would change without writing anything.
    /// Exits with code 1 when at least one file needs fixing.
    #[arg(long)]
    pub check: bool,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,

    /// Path to a configuration file (skips the ancestor search).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run only these fixers (overrides the config file).
    #[arg(long = "fixer", value_name = "NAME")]
    pub fixers: Vec<String>,

    /// Pass cap for the convergence loop (overrides the config file).
    #[arg(long)]
    pub max_passes: Option<usize>,
}

#[derive(Subcommand, Debug)]
/// Available subcommands.
pub enum Commands {
    /// List the available fixers with priorities and options
    Rules {
        /// Output JSON.
        #[arg(long)]
        json: bool,
    },
}
