//! Shared entry point used by both binaries.

use crate::cli::{Cli, Commands};
use crate::config::Config;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Run phpfix with the given arguments, writing output to stdout.
///
/// # Errors
///
/// Returns an error if command execution fails in a way that is not
/// reported through the exit code.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run phpfix with the given arguments, writing output to the specified
/// writer.
///
/// This is the testable version of `run_with_args` that allows output
/// capture.
///
/// # Errors
///
/// Returns an error if command execution fails in a way that is not
/// reported through the exit code.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["phpfix".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => {
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    // Let clap print help/version as intended, but captured
                    // by the writer.
                    write!(writer, "{e}")?;
                    writer.flush()?;
                    return Ok(0);
                }
                _ => {
                    eprint!("{e}");
                    return Ok(1);
                }
            }
        }
    };

    if let Some(Commands::Rules { json }) = cli.command {
        return crate::commands::run_rules(json, writer);
    }

    let paths = if cli.paths.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cli.paths.paths.clone()
    };

    // Config comes from --config when given, otherwise from the first
    // path's ancestors.
    let mut config = match &cli.config {
        Some(path) => match Config::load_file(path) {
            Some(config) => config,
            None => {
                eprintln!("Error: could not read config file '{}'.", path.display());
                return Ok(1);
            }
        },
        None => Config::load_from_path(&paths[0]),
    };

    // CLI flags override the file.
    if !cli.fixers.is_empty() {
        config.phpfix.fixers = Some(cli.fixers.clone());
    }
    if let Some(max_passes) = cli.max_passes {
        config.phpfix.max_passes = Some(max_passes);
    }

    if cli.output.verbose && !cli.output.json {
        eprintln!("[VERBOSE] phpfix v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("[VERBOSE] Using {} threads", rayon::current_num_threads());
        if let Some(path) = &config.config_file_path {
            eprintln!("[VERBOSE] Config file: {}", path.display());
        }
    }

    crate::commands::run_fix(&paths, cli.check, &cli.output, &config, writer)
}
