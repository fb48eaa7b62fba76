//! Command execution logic behind the CLI surface.

use crate::cli::OutputOptions;
use crate::config::Config;
use crate::constants::PHP_EXTENSION;
use crate::fixer::{describe, registry};
use crate::orchestrator::Orchestrator;
use crate::output::{self, FileStatus};

use anyhow::Result;
use colored::Colorize;
use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Result of processing one file, reported on stdout.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    changed: bool,
    passes: usize,
    reached_fixed_point: bool,
    applied_fixers: Vec<&'static str>,
    error: Option<String>,
}

/// Executes the fix run over the given paths.
///
/// Returns the process exit code: 1 when any file failed, or when `check`
/// found files that need fixing.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn run_fix<W: Write>(
    paths: &[PathBuf],
    check: bool,
    options: &OutputOptions,
    config: &Config,
    writer: &mut W,
) -> Result<i32> {
    let started = Instant::now();

    let fixers = match registry::build_fixers(config) {
        Ok(fixers) => fixers,
        Err(e) => {
            eprintln!("{} {e}", "Configuration error:".red().bold());
            return Ok(1);
        }
    };
    let orchestrator = match Orchestrator::new(fixers, config.phpfix.max_passes()) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            eprintln!("{} {e}", "Scheduling error:".red().bold());
            return Ok(1);
        }
    };

    if options.verbose && !options.json {
        let order = orchestrator
            .fixers()
            .iter()
            .map(|f| f.name())
            .collect::<Vec<_>>()
            .join(" -> ");
        eprintln!("[VERBOSE] Execution order: {order}");
    }

    let files = find_php_files(paths);
    let progress = output::create_progress_bar(files.len() as u64);

    let mut reports: Vec<FileReport> = files
        .par_iter()
        .map(|file_path| {
            let report = process_file(&orchestrator, file_path, check);
            progress.inc(1);
            report
        })
        .collect();
    progress.finish_and_clear();
    reports.sort_by(|a, b| a.file.cmp(&b.file));

    let changed = reports.iter().filter(|r| r.changed).count();
    let errors = reports.iter().filter(|r| r.error.is_some()).count();

    if options.json {
        let report = serde_json::json!({
            "files": reports,
            "summary": {
                "scanned": reports.len(),
                "changed": changed,
                "errors": errors,
                "check": check,
            },
        });
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        for report in &reports {
            if !report.reached_fixed_point {
                eprintln!(
                    "{} {} did not converge within {} passes",
                    "Warning:".yellow().bold(),
                    report.file,
                    report.passes
                );
            }
            if let Some(message) = &report.error {
                output::print_file_line(writer, &report.file, &FileStatus::Error { message })?;
            } else if report.changed && !options.quiet {
                let status = if check {
                    FileStatus::WouldFix {
                        applied: &report.applied_fixers,
                    }
                } else {
                    FileStatus::Fixed {
                        applied: &report.applied_fixers,
                    }
                };
                output::print_file_line(writer, &report.file, &status)?;
            }
        }
        output::print_summary(
            writer,
            reports.len(),
            changed,
            errors,
            check,
            started.elapsed(),
        )?;
    }

    if errors > 0 || (check && changed > 0) {
        return Ok(1);
    }
    Ok(0)
}

/// Executes the rules listing.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn run_rules<W: Write>(json: bool, writer: &mut W) -> Result<i32> {
    let fixers = registry::all_fixers_with_defaults();
    let descriptors: Vec<_> = fixers.iter().map(|f| describe(f.as_ref())).collect();

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&descriptors)?)?;
    } else {
        output::print_rules_table(writer, &descriptors)?;
    }
    Ok(0)
}

/// Fixes one file, writing the result back unless `check` is set.
fn process_file(orchestrator: &Orchestrator, path: &Path, check: bool) -> FileReport {
    let file = path.display().to_string();
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => return error_report(file, e.to_string()),
    };

    match orchestrator.fix_source(&source) {
        Ok(outcome) => {
            if outcome.changed && !check {
                if let Err(e) = fs::write(path, &outcome.output) {
                    return error_report(file, e.to_string());
                }
            }
            FileReport {
                file,
                changed: outcome.changed,
                passes: outcome.passes,
                reached_fixed_point: outcome.reached_fixed_point,
                applied_fixers: outcome.applied_fixers,
                error: None,
            }
        }
        Err(e) => error_report(file, e.to_string()),
    }
}

fn error_report(file: String, message: String) -> FileReport {
    FileReport {
        file,
        changed: false,
        passes: 0,
        reached_fixed_point: true,
        applied_fixers: Vec::new(),
        error: Some(message),
    }
}

/// Collects the .php files under the given paths.
///
/// Directories are walked with gitignore rules applied; explicit file
/// arguments are taken as-is regardless of extension.
fn find_php_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        for entry in WalkBuilder::new(path).build().filter_map(Result::ok) {
            let entry_path = entry.path();
            if entry_path.is_file()
                && entry_path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(PHP_EXTENSION))
            {
                files.push(entry_path.to_path_buf());
            }
        }
    }
    files.sort();
    files.dedup();
    files
}
