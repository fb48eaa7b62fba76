//! Rich CLI output formatting with colored text and progress bars.

use crate::fixer::RuleDescriptor;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Create a progress bar with file count.
///
/// In test mode, returns a hidden progress bar to avoid polluting test output.
#[must_use]
pub fn create_progress_bar(total_files: u64) -> ProgressBar {
    if cfg!(test) {
        return ProgressBar::hidden();
    }

    let pb =
        ProgressBar::with_draw_target(Some(total_files), ProgressDrawTarget::stderr_with_hz(20));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.set_message("fixing...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.tick();
    pb
}

/// Status of one processed file, for the non-JSON report.
pub enum FileStatus<'a> {
    /// The file was rewritten in place.
    Fixed {
        /// Names of the rules that changed the file.
        applied: &'a [&'static str],
    },
    /// The file needs changes but check mode left it untouched.
    WouldFix {
        /// Names of the rules that would change the file.
        applied: &'a [&'static str],
    },
    /// The file could not be processed.
    Error {
        /// Human-readable failure description.
        message: &'a str,
    },
}

/// Print one per-file result line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_file_line(
    writer: &mut impl Write,
    path: &str,
    status: &FileStatus<'_>,
) -> std::io::Result<()> {
    match status {
        FileStatus::Fixed { applied } => writeln!(
            writer,
            "{} {} {}",
            "[FIXED]".green().bold(),
            path,
            format!("({})", applied.join(", ")).dimmed()
        ),
        FileStatus::WouldFix { applied } => writeln!(
            writer,
            "{} {} {}",
            "[WOULD FIX]".yellow().bold(),
            path,
            format!("({})", applied.join(", ")).dimmed()
        ),
        FileStatus::Error { message } => writeln!(
            writer,
            "{} {} {}",
            "[ERROR]".red().bold(),
            path,
            message.red()
        ),
    }
}

/// Print the closing summary line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary(
    writer: &mut impl Write,
    total: usize,
    changed: usize,
    errors: usize,
    check: bool,
    elapsed: Duration,
) -> std::io::Result<()> {
    let verb = if check { "need fixing" } else { "fixed" };
    let changed_part = if changed == 0 {
        format!("0 {verb}").green().to_string()
    } else if check {
        format!("{changed} {verb}").yellow().bold().to_string()
    } else {
        format!("{changed} {verb}").green().bold().to_string()
    };
    let error_part = if errors == 0 {
        String::new()
    } else {
        format!(", {}", format!("{errors} errors").red().bold())
    };
    writeln!(
        writer,
        "{} files scanned, {changed_part}{error_part} in {:.2}s",
        total,
        elapsed.as_secs_f64()
    )
}

/// Print the fixer listing as a table.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_rules_table(
    writer: &mut impl Write,
    descriptors: &[RuleDescriptor],
) -> std::io::Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Name", "Priority", "Risky", "PHP", "Options", "Summary"]);

    for descriptor in descriptors {
        let options = descriptor
            .options
            .iter()
            .map(|o| o.name)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(descriptor.name),
            Cell::new(descriptor.priority),
            Cell::new(if descriptor.risky { "yes" } else { "no" }),
            Cell::new(descriptor.minimum_php_version.unwrap_or("-")),
            Cell::new(if options.is_empty() { "-".to_owned() } else { options }),
            Cell::new(descriptor.summary),
        ]);
    }

    writeln!(writer, "{table}")
}
