//! Locale-aware lookup of resource bundles on disk.
//!
//! A bundle named `com.foo.bar.Texts` lives in
//! `<root>/com/foo/bar/Texts.properties`, with per-locale siblings such as
//! `Texts_de.properties` or `Texts_de_CH.properties`.
//!
//! For a target locale `de-CH` the candidates are `de_CH` then `de`. If
//! none of them exists the candidates of the fallback language are tried,
//! and finally the default bundle alone. Every more general candidate that
//! exists becomes a parent of the one found first.

use std::{
    env,
    path::{Path, PathBuf},
};

use unic_langid::LanguageIdentifier;

use crate::{
    bundle::ResourceBundle,
    error::{Result, require_not_empty},
    keys::DEFAULT_LANGUAGE,
    properties::read_properties,
};

/// Environment variable holding the bundle search path.
pub const RESOURCE_PATH_ENV: &str = "KEYBUNDLE_RESOURCE_PATH";

/// File extension of bundle files.
pub const BUNDLE_EXTENSION: &str = "properties";

#[derive(Debug, Clone)]
pub struct BundleLoader {
    roots: Vec<PathBuf>,
    locale: Option<LanguageIdentifier>,
    fallback_language: Option<LanguageIdentifier>,
}

impl BundleLoader {
    /// Loader searching `roots` in order, with no target locale and English
    /// as fallback language.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            locale: None,
            fallback_language: DEFAULT_LANGUAGE.parse().ok(),
        }
    }

    /// Loader configured from the process environment: roots from
    /// `KEYBUNDLE_RESOURCE_PATH` (current directory if unset), locale from
    /// the operating system.
    pub fn from_env() -> Self {
        let roots = match env::var_os(RESOURCE_PATH_ENV) {
            Some(paths) => env::split_paths(&paths).collect(),
            None => vec![PathBuf::from(".")],
        };
        let locale = sys_locale::get_locale().and_then(|tag| parse_locale(&tag));
        Self::new(roots).with_locale(locale)
    }

    pub fn with_locale(mut self, locale: Option<LanguageIdentifier>) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_fallback_language(mut self, language: Option<LanguageIdentifier>) -> Self {
        self.fallback_language = language;
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn locale(&self) -> Option<&LanguageIdentifier> {
        self.locale.as_ref()
    }

    /// Load the bundle family `base_name` for the configured locale.
    ///
    /// Returns `Ok(None)` when no file of the family exists. Files that
    /// exist but cannot be read or parsed are errors.
    pub fn load(&self, base_name: &str) -> Result<Option<ResourceBundle>> {
        let base_name = require_not_empty(base_name, "baseBundleName")?;

        let mut sequences: Vec<Vec<LanguageIdentifier>> = Vec::new();
        if let Some(locale) = &self.locale {
            sequences.push(candidate_locales(locale));
        }
        if let Some(fallback) = &self.fallback_language
            && self.locale.as_ref() != Some(fallback)
        {
            sequences.push(candidate_locales(fallback));
        }

        let root = self.find(base_name, None);

        for candidates in sequences {
            let found: Vec<(LanguageIdentifier, PathBuf)> = candidates
                .into_iter()
                .filter_map(|locale| {
                    let path = self.find(base_name, Some(&locale))?;
                    Some((locale, path))
                })
                .collect();

            if found.is_empty() {
                continue;
            }

            let mut chain = match &root {
                Some(path) => Some(ResourceBundle::new(base_name, None, read_properties(path)?)),
                None => None,
            };
            for (locale, path) in found.into_iter().rev() {
                let bundle = ResourceBundle::new(base_name, Some(locale), read_properties(&path)?);
                chain = Some(match chain {
                    Some(parent) => bundle.with_parent(parent),
                    None => bundle,
                });
            }
            return Ok(chain);
        }

        match root {
            Some(path) => Ok(Some(ResourceBundle::new(
                base_name,
                None,
                read_properties(&path)?,
            ))),
            None => {
                tracing::debug!(bundle = base_name, "resource bundle not found");
                Ok(None)
            }
        }
    }

    /// First root holding the file for `base_name` and `locale`.
    fn find(&self, base_name: &str, locale: Option<&LanguageIdentifier>) -> Option<PathBuf> {
        self.roots.iter().find_map(|root| {
            let path = bundle_path(root, base_name, locale);
            tracing::trace!(path = %path.display(), "probing bundle file");
            path.is_file().then_some(path)
        })
    }
}

/// Load the bundle family `name` using the environment's defaults.
///
/// Absence of the bundle is not an error: it yields `Ok(None)`.
pub fn load_bundle(name: &str) -> Result<Option<ResourceBundle>> {
    BundleLoader::from_env().load(name)
}

/// Parse a locale tag as reported by the OS or typed by a user.
///
/// Accepts `de-CH`, `de_CH` and POSIX forms like `de_CH.UTF-8@euro`.
pub fn parse_locale(tag: &str) -> Option<LanguageIdentifier> {
    let tag = tag.split(['.', '@']).next().unwrap_or_default();
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    tag.replace('_', "-").parse().ok()
}

/// Candidate locales from most to least specific, without the root.
pub fn candidate_locales(locale: &LanguageIdentifier) -> Vec<LanguageIdentifier> {
    let language = locale.language.to_string();
    if language == "und" {
        return Vec::new();
    }

    let region = locale.region.as_ref().map(ToString::to_string);
    let script = locale.script.as_ref().map(ToString::to_string);
    let variants: Vec<String> = locale.variants().map(|v| v.to_string()).collect();

    let mut tags: Vec<Vec<String>> = Vec::new();
    let prefixes: Vec<Vec<String>> = match &script {
        Some(script) => vec![
            vec![language.clone(), script.clone()],
            vec![language.clone()],
        ],
        None => vec![vec![language.clone()]],
    };

    for prefix in prefixes {
        if let Some(region) = &region {
            if !variants.is_empty() {
                let mut tag = prefix.clone();
                tag.push(region.clone());
                tag.extend(variants.iter().cloned());
                tags.push(tag);
            }
            let mut tag = prefix.clone();
            tag.push(region.clone());
            tags.push(tag);
        } else if !variants.is_empty() {
            let mut tag = prefix.clone();
            tag.extend(variants.iter().cloned());
            tags.push(tag);
        }
        tags.push(prefix);
    }

    let mut candidates: Vec<LanguageIdentifier> = Vec::new();
    for tag in tags {
        if let Ok(candidate) = tag.join("-").parse::<LanguageIdentifier>()
            && !candidates.contains(&candidate)
        {
            candidates.push(candidate);
        }
    }
    candidates
}

/// File-name suffix for a locale: `de-CH` → `_de_CH`.
pub fn locale_suffix(locale: &LanguageIdentifier) -> String {
    format!("_{}", locale.to_string().replace('-', "_"))
}

/// Path of the bundle file for `base_name` below `root`.
pub fn bundle_path(root: &Path, base_name: &str, locale: Option<&LanguageIdentifier>) -> PathBuf {
    let relative = base_name.replace('.', "/");
    let suffix = locale.map(locale_suffix).unwrap_or_default();
    root.join(format!("{}{}.{}", relative, suffix, BUNDLE_EXTENSION))
}
