//! Turning catalogs into `.properties` bundle families.
//!
//! Every catalog entry becomes one key. The default bundle
//! (`<Base>.properties`) holds the default-language texts, each language
//! gets its own `<Base>_<lang>.properties`. Keys are written sorted so that
//! regenerating an unchanged catalog gives identical files.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use unic_langid::LanguageIdentifier;
use walkdir::WalkDir;

use crate::{
    catalog::{LoadedCatalog, Translation},
    issue::Issue,
    keys::{
        DEFAULT_BASE_BUNDLE_NAME, DEFAULT_LANGUAGE, DEFAULT_MESSAGE_PREFIX, compose_message_key,
        compose_text_key,
    },
    loader::{BUNDLE_EXTENSION, bundle_path},
    properties::write_properties,
};

/// Values used where a catalog does not set its own.
#[derive(Debug, Clone)]
pub struct CatalogDefaults {
    pub base_bundle_name: String,
    pub message_prefix: String,
    pub default_language: String,
}

impl Default for CatalogDefaults {
    fn default() -> Self {
        Self {
            base_bundle_name: DEFAULT_BASE_BUNDLE_NAME.to_string(),
            message_prefix: DEFAULT_MESSAGE_PREFIX.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// One key with its texts.
#[derive(Debug, Clone)]
pub struct Entry {
    pub key: String,
    pub description: String,
    /// Language tag → text.
    pub translations: BTreeMap<String, String>,
    /// Catalog file that declared the entry.
    pub source: String,
}

/// Everything that goes into one bundle family.
#[derive(Debug, Clone)]
pub struct BundlePlan {
    pub base_name: String,
    pub default_language: String,
    pub entries: BTreeMap<String, Entry>,
    pub languages: BTreeSet<String>,
    pub sources: Vec<String>,
}

/// A file the generator wants to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    /// `None` for the default bundle.
    pub language: Option<String>,
    pub content: String,
    pub entry_count: usize,
}

/// Result of planning: bundle families plus the problems found.
#[derive(Debug, Default)]
pub struct Plan {
    pub bundles: Vec<BundlePlan>,
    pub issues: Vec<Issue>,
}

/// Collect the entries of all catalogs, grouped by bundle family.
pub fn plan(catalogs: &[LoadedCatalog], defaults: &CatalogDefaults) -> Plan {
    let mut families: BTreeMap<String, BundlePlan> = BTreeMap::new();
    let mut issues = Vec::new();

    for loaded in catalogs {
        let source = loaded.path.display().to_string();
        let catalog = &loaded.catalog;

        let (base_name, default_language) = match &catalog.base_bundle_name {
            Some(base) => (base.name.clone(), base.default_language.clone()),
            None => (
                defaults.base_bundle_name.clone(),
                defaults.default_language.clone(),
            ),
        };
        let prefix = catalog
            .message_prefix
            .clone()
            .unwrap_or_else(|| defaults.message_prefix.clone());

        let family = families
            .entry(base_name.clone())
            .or_insert_with(|| BundlePlan {
                base_name: base_name.clone(),
                default_language: default_language.clone(),
                entries: BTreeMap::new(),
                languages: BTreeSet::new(),
                sources: Vec::new(),
            });
        family.sources.push(source.clone());

        if !same_language(&family.default_language, &default_language) {
            issues.push(Issue::invalid_entry(
                &source,
                &format!(
                    "default language \"{}\" conflicts with \"{}\" of bundle {}",
                    default_language, family.default_language, base_name
                ),
            ));
        }

        for (index, message) in catalog.messages.iter().enumerate() {
            let key = match compose_message_key(&prefix, message.id.as_id()) {
                Ok(key) => key,
                Err(err) => {
                    issues.push(Issue::invalid_entry(
                        &source,
                        &format!("messages[{}]: {}", index, err),
                    ));
                    continue;
                }
            };
            add_entry(family, &mut issues, &source, key, &message.description, &message.translations);
        }

        for (index, text) in catalog.texts.iter().enumerate() {
            let key = text
                .resolve_use_and_id()
                .and_then(|(text_use, id)| Ok(compose_text_key(&text.class_name, text_use, &id)?));
            let key = match key {
                Ok(key) => key,
                Err(err) => {
                    issues.push(Issue::invalid_entry(
                        &source,
                        &format!("texts[{}]: {}", index, err),
                    ));
                    continue;
                }
            };
            add_entry(family, &mut issues, &source, key, &text.description, &text.translations);
        }
    }

    let bundles: Vec<BundlePlan> = families.into_values().collect();
    for bundle in &bundles {
        check_translations(bundle, &mut issues);
    }

    issues.sort();
    Plan { bundles, issues }
}

fn add_entry(
    family: &mut BundlePlan,
    issues: &mut Vec<Issue>,
    source: &str,
    key: String,
    description: &str,
    translations: &[Translation],
) {
    if let Some(existing) = family.entries.get(&key) {
        issues.push(Issue::duplicate_key(source, &key, &existing.source));
        return;
    }

    let mut texts = BTreeMap::new();
    for translation in translations {
        let Some(language) = normalize_language(&translation.language) else {
            issues.push(Issue::invalid_entry(
                source,
                &format!("{}: invalid language tag \"{}\"", key, translation.language),
            ));
            continue;
        };
        if texts.contains_key(&language) {
            issues.push(Issue::invalid_entry(
                source,
                &format!("{}: language \"{}\" translated twice", key, language),
            ));
            continue;
        }
        family.languages.insert(language.clone());
        texts.insert(language, translation.text.clone());
    }

    family.entries.insert(
        key.clone(),
        Entry {
            key,
            description: description.to_string(),
            translations: texts,
            source: source.to_string(),
        },
    );
}

fn check_translations(bundle: &BundlePlan, issues: &mut Vec<Issue>) {
    let default_language =
        normalize_language(&bundle.default_language).unwrap_or_else(|| bundle.default_language.clone());

    for entry in bundle.entries.values() {
        if !entry.translations.contains_key(&default_language) {
            issues.push(Issue::missing_default(
                &entry.source,
                &entry.key,
                &default_language,
            ));
        }

        let missing: Vec<String> = bundle
            .languages
            .iter()
            .filter(|language| !entry.translations.contains_key(*language))
            .filter(|language| **language != default_language)
            .cloned()
            .collect();
        if !missing.is_empty() {
            issues.push(Issue::untranslated(&entry.source, &entry.key, &missing));
        }
    }
}

/// Canonical form of a language tag, or `None` if it does not parse.
pub fn normalize_language(tag: &str) -> Option<String> {
    let tag = tag.replace('_', "-");
    tag.parse::<LanguageIdentifier>()
        .ok()
        .filter(|id| id.language.to_string() != "und")
        .map(|id| id.to_string())
}

fn same_language(a: &str, b: &str) -> bool {
    match (normalize_language(a), normalize_language(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}

impl BundlePlan {
    /// Files making up this family below `output_dir`.
    pub fn files(&self, output_dir: &Path) -> Vec<GeneratedFile> {
        let default_language =
            normalize_language(&self.default_language).unwrap_or_else(|| self.default_language.clone());
        let header = format!(
            "Generated by keybundle from {}. Do not edit.",
            self.sources.join(", ")
        );

        let mut files = vec![self.file(
            output_dir,
            None,
            &default_language,
            &header,
        )];

        for language in &self.languages {
            files.push(self.file(output_dir, Some(language), language, &header));
        }
        files
    }

    fn file(
        &self,
        output_dir: &Path,
        language: Option<&String>,
        texts_of: &str,
        header: &str,
    ) -> GeneratedFile {
        let entries: Vec<(&str, &str, Option<&str>)> = self
            .entries
            .values()
            .filter_map(|entry| {
                let text = entry.translations.get(texts_of)?;
                let comment = (!entry.description.is_empty()).then_some(entry.description.as_str());
                Some((entry.key.as_str(), text.as_str(), comment))
            })
            .collect();

        let locale = language.and_then(|tag| tag.parse::<LanguageIdentifier>().ok());
        GeneratedFile {
            path: bundle_path(output_dir, &self.base_name, locale.as_ref()),
            language: language.cloned(),
            entry_count: entries.len(),
            content: write_properties(Some(header), entries),
        }
    }

    /// Bundle files of this family in `output_dir` whose language is no
    /// longer used by any catalog.
    pub fn orphan_files(&self, output_dir: &Path) -> Vec<Issue> {
        let default_path = bundle_path(output_dir, &self.base_name, None);
        let (Some(dir), Some(stem)) = (
            default_path.parent(),
            default_path.file_stem().and_then(|s| s.to_str()),
        ) else {
            return Vec::new();
        };
        if !dir.is_dir() {
            return Vec::new();
        }

        let prefix = format!("{}_", stem);
        let mut issues = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(BUNDLE_EXTENSION) {
                continue;
            }
            let Some(suffix) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.strip_prefix(&prefix))
            else {
                continue;
            };
            match normalize_language(suffix) {
                Some(language) if self.languages.contains(&language) => {}
                Some(language) => issues.push(Issue::orphan_bundle(
                    &path.display().to_string(),
                    &language,
                )),
                None => {}
            }
        }
        issues.sort();
        issues
    }
}

/// Write the files, creating directories as needed.
pub fn write_files(files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        if let Some(parent) = file.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&file.path, &file.content)
            .with_context(|| format!("Failed to write file: {}", file.path.display()))?;
        tracing::debug!(path = %file.path.display(), entries = file.entry_count, "wrote bundle file");
    }
    Ok(())
}
