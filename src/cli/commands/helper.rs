use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use rayon::prelude::*;

use super::{CommandResult, CommandSummary};
use crate::{
    catalog::{LoadedCatalog, load_catalog},
    cli::args::CommonArgs,
    config::{Config, load_config},
    issue::{Issue, Rule, Severity},
};

pub fn finish(summary: CommandSummary, mut issues: Vec<Issue>) -> CommandResult {
    issues.sort();

    let parse_error_count = issues.iter().filter(|i| i.rule == Rule::ParseError).count();

    let mut error_count = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    if let CommandSummary::Init(ref summary) = summary
        && summary.error.is_some()
    {
        error_count += 1;
    }

    CommandResult {
        summary,
        error_count,
        warning_count,
        issues,
        parse_error_count,
    }
}

/// Project directory together with its configuration.
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
}

impl Project {
    pub fn open(common: &CommonArgs) -> Result<Self> {
        let root = match &common.path {
            Some(path) => path.clone(),
            None => env::current_dir().context("Failed to determine current directory")?,
        };
        let config = load_config(&root)?.config;
        Ok(Self { root, config })
    }

    /// Path from the configuration, relative to the project directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.config.output_dir)
    }

    /// Catalog files matched by the configured patterns, sorted.
    pub fn catalog_paths(&self) -> Result<Vec<PathBuf>> {
        let root = Pattern::escape(&self.root.to_string_lossy());
        let mut paths = Vec::new();
        for pattern in &self.config.catalogs {
            let full = format!("{}/{}", root, pattern);
            for entry in glob::glob(&full)
                .with_context(|| format!("Invalid glob pattern in 'catalogs': \"{}\"", pattern))?
            {
                match entry {
                    Ok(path) if path.is_file() => paths.push(path),
                    Ok(_) => {}
                    Err(err) => tracing::warn!("skipping unreadable path: {}", err),
                }
            }
        }
        paths.sort();
        paths.dedup();
        Ok(paths)
    }

    /// Load all catalogs in parallel. Catalogs that fail to load become
    /// parse errors.
    pub fn load_catalogs(&self) -> Result<(Vec<LoadedCatalog>, Vec<Issue>)> {
        let paths = self.catalog_paths()?;
        tracing::debug!(count = paths.len(), "loading catalogs");

        let results: Vec<(PathBuf, Result<LoadedCatalog>)> = paths
            .par_iter()
            .map(|path| (self.display_path(path), load_catalog(path)))
            .collect();

        let mut catalogs = Vec::new();
        let mut issues = Vec::new();
        for (display, result) in results {
            match result {
                Ok(mut loaded) => {
                    loaded.path = display;
                    catalogs.push(loaded);
                }
                Err(err) => issues.push(Issue::parse_error(
                    &display.display().to_string(),
                    &format!("{:#}", err),
                )),
            }
        }
        Ok((catalogs, issues))
    }

    /// `path` relative to the project directory where possible.
    pub fn display_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root).unwrap_or(path).to_path_buf()
    }
}
