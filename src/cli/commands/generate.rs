use anyhow::Result;

use super::{
    CommandResult, CommandSummary, GenerateSummary, PlannedFile,
    helper::{Project, finish},
};
use crate::{
    cli::args::GenerateCommand,
    generate::{GeneratedFile, plan, write_files},
    issue::Severity,
};

pub fn generate(cmd: GenerateCommand) -> Result<CommandResult> {
    let project = Project::open(&cmd.common)?;
    let (catalogs, mut issues) = project.load_catalogs()?;

    let plan = plan(&catalogs, &project.config.catalog_defaults());
    issues.extend(plan.issues);

    let output_dir = project.output_dir();
    let files: Vec<GeneratedFile> = plan
        .bundles
        .iter()
        .flat_map(|bundle| bundle.files(&output_dir))
        .collect();

    let has_errors = issues.iter().any(|i| i.severity == Severity::Error);
    let written = cmd.apply && !has_errors;
    if written {
        write_files(&files)?;
    }

    let summary = GenerateSummary {
        files: files
            .iter()
            .map(|file| PlannedFile {
                path: project.display_path(&file.path),
                entry_count: file.entry_count,
            })
            .collect(),
        is_apply: cmd.apply,
        written,
    };

    Ok(finish(CommandSummary::Generate(summary), issues))
}
