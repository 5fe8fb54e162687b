use std::path::PathBuf;

use crate::issue::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Generate(GenerateSummary),
    Init(InitSummary),
    /// A single line printed as is.
    Output(String),
}

#[derive(Debug)]
pub struct CheckSummary {
    pub catalogs_checked: usize,
    pub entries_checked: usize,
}

#[derive(Debug)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub entry_count: usize,
}

#[derive(Debug)]
pub struct GenerateSummary {
    pub files: Vec<PlannedFile>,
    pub is_apply: bool,
    /// False when `--apply` was given but errors prevented writing.
    pub written: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running keybundle commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// All issues found, sorted.
    pub issues: Vec<Issue>,
    /// Number of catalog files that failed to load.
    pub parse_error_count: usize,
}
