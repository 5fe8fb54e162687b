use std::path::Path;

use anyhow::Result;

use super::{
    CheckSummary, CommandResult, CommandSummary,
    helper::{Project, finish},
};
use crate::{cli::args::CheckCommand, generate::plan};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let project = Project::open(&cmd.common)?;
    let (catalogs, mut issues) = project.load_catalogs()?;

    let plan = plan(&catalogs, &project.config.catalog_defaults());
    issues.extend(plan.issues);

    let output_dir = project.output_dir();
    for bundle in &plan.bundles {
        issues.extend(
            bundle
                .orphan_files(&output_dir)
                .into_iter()
                .map(|mut issue| {
                    issue.file_path = issue
                        .file_path
                        .map(|path| project.display_path(Path::new(&path)).display().to_string());
                    issue
                }),
        );
    }

    let summary = CheckSummary {
        catalogs_checked: catalogs.len(),
        entries_checked: plan.bundles.iter().map(|b| b.entries.len()).sum(),
    };

    Ok(finish(CommandSummary::Check(summary), issues))
}
