use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::{
    generate::CatalogDefaults,
    keys::{DEFAULT_BASE_BUNDLE_NAME, DEFAULT_LANGUAGE, DEFAULT_MESSAGE_PREFIX},
};

pub const CONFIG_FILE_NAME: &str = ".keybundlerc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_catalogs")]
    pub catalogs: Vec<String>,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_resource_roots")]
    pub resource_roots: Vec<String>,
    #[serde(default = "default_base_bundle_name")]
    pub base_bundle_name: String,
    #[serde(default = "default_message_prefix")]
    pub message_prefix: String,
    #[serde(default = "default_language")]
    pub default_language: String,
}

fn default_catalogs() -> Vec<String> {
    vec!["i18n/**/*.json".to_string()]
}

fn default_output_dir() -> String {
    "./resources".to_string()
}

fn default_resource_roots() -> Vec<String> {
    vec![default_output_dir()]
}

fn default_base_bundle_name() -> String {
    DEFAULT_BASE_BUNDLE_NAME.to_string()
}

fn default_message_prefix() -> String {
    DEFAULT_MESSAGE_PREFIX.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalogs: default_catalogs(),
            output_dir: default_output_dir(),
            resource_roots: default_resource_roots(),
            base_bundle_name: default_base_bundle_name(),
            message_prefix: default_message_prefix(),
            default_language: default_language(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `catalogs`, empty
    /// names and a default language that is not a language tag.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.catalogs {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'catalogs': \"{}\"", pattern))?;
        }

        if self.base_bundle_name.trim().is_empty() {
            bail!("'baseBundleName' must not be empty");
        }
        if self.message_prefix.trim().is_empty() {
            bail!("'messagePrefix' must not be empty");
        }
        if self.output_dir.trim().is_empty() {
            bail!("'outputDir' must not be empty");
        }

        self.default_language
            .replace('_', "-")
            .parse::<LanguageIdentifier>()
            .ok()
            .filter(|id| id.language.to_string() != "und")
            .with_context(|| {
                format!(
                    "Invalid language tag in 'defaultLanguage': \"{}\"",
                    self.default_language
                )
            })?;

        Ok(())
    }

    pub fn catalog_defaults(&self) -> CatalogDefaults {
        CatalogDefaults {
            base_bundle_name: self.base_bundle_name.clone(),
            message_prefix: self.message_prefix.clone(),
            default_language: self.default_language.clone(),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
