//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CheckSummary, CommandResult, CommandSummary, GenerateSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::issue::{Issue, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(summary: &CheckSummary, writer: &mut W) {
    let msg = format!(
        "Checked {} {}, {} {} - no issues found",
        summary.catalogs_checked,
        if summary.catalogs_checked == 1 { "catalog" } else { "catalogs" },
        summary.entries_checked,
        if summary.entries_checked == 1 { "key" } else { "keys" }
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

/// Print a warning about catalogs that could not be loaded.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} catalog(s) could not be loaded (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message,
        issue.rule.to_string().dimmed().cyan()
    );

    if let Some(path) = &issue.file_path {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
    }

    if let Some(details) = &issue.details {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "note:".bold(), details);
    }

    if let Some(hint) = &issue.hint {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "hint:".bold().cyan(), hint);
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

pub fn print(result: &CommandResult, verbose: bool) {
    let mut stdout = io::stdout().lock();
    print_to(result, verbose, &mut stdout);
    print_parse_warning_to(result.parse_error_count, verbose, &mut io::stderr().lock());
}

fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    match &result.summary {
        CommandSummary::Check(summary) => {
            report_to(&visible_issues(result, verbose), writer);
            if result.issues.is_empty() {
                print_success_to(summary, writer);
            }
        }
        CommandSummary::Generate(summary) => {
            report_to(&visible_issues(result, verbose), writer);
            print_generate_to(summary, result.error_count, writer);
        }
        CommandSummary::Init(summary) => print_init_to(summary, writer),
        CommandSummary::Output(line) => {
            let _ = writeln!(writer, "{}", line);
        }
    }
}

/// Parse errors are only listed one by one in verbose mode.
fn visible_issues(result: &CommandResult, verbose: bool) -> Vec<Issue> {
    result
        .issues
        .iter()
        .filter(|i| verbose || i.rule != crate::issue::Rule::ParseError)
        .cloned()
        .collect()
}

fn print_generate_to<W: Write>(summary: &GenerateSummary, error_count: usize, writer: &mut W) {
    let file_count = summary.files.len();
    if summary.written {
        let _ = writeln!(
            writer,
            "{} {} {} file(s).",
            SUCCESS_MARK.green(),
            "Wrote".green().bold(),
            file_count
        );
        return;
    }

    if summary.is_apply && error_count > 0 {
        let _ = writeln!(
            writer,
            "{} Not writing {} file(s) because of {} error(s).",
            FAILURE_MARK.red(),
            file_count,
            error_count
        );
        return;
    }

    let _ = writeln!(
        writer,
        "{} {} file(s):",
        "Would write".yellow().bold(),
        file_count
    );
    for file in &summary.files {
        let _ = writeln!(
            writer,
            "  {} ({} {})",
            file.path.display(),
            file.entry_count,
            if file.entry_count == 1 { "key" } else { "keys" }
        );
    }
    let _ = writeln!(writer, "Run with {} to write these files.", "--apply".cyan());
}

fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
    if let Some(error) = &summary.error {
        let _ = writeln!(writer, "{} {}", "error:".bold().red(), error);
    }
}
