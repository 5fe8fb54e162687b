//! JSON catalogs describing messages and texts with their translations.
//!
//! A catalog is the declarative form of what would otherwise be attached to
//! source elements: each entry carries a description and one translation per
//! language. The generator turns catalogs into bundle files.
//!
//! ```json
//! {
//!   "baseBundleName": { "name": "com.sample.Texts", "defaultLanguage": "en" },
//!   "messagePrefix": "SMP",
//!   "messages": [
//!     { "id": 1704, "description": "Disk full",
//!       "translations": [{ "language": "en", "text": "Disk %s is full" }] }
//!   ],
//!   "texts": [
//!     { "className": "com.sample.Example", "field": "TXT_Greeting",
//!       "description": "Greeting",
//!       "translations": [{ "language": "en", "text": "Hello" }] }
//!   ]
//! }
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::keys::{
    ADDITIONAL_TEXT_FILE, DEFAULT_BASE_BUNDLE_NAME, DEFAULT_LANGUAGE, MessageId, TextUse,
};

/// Field names like `TXT_Greeting` or `TOOLTIP_Property`.
static FIELD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+(?:_DEFAULT)?)_(.+)$").expect("valid regex"));

/// One translation of a message or text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Translation {
    pub language: String,
    pub text: String,
}

/// The bundle family a catalog contributes to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseBundleName {
    #[serde(default = "default_bundle_name")]
    pub name: String,
    #[serde(default = "default_language")]
    pub default_language: String,
    /// Kept for catalogs shared with the JVM tool chain; the provider class
    /// it requests is not generated here.
    #[serde(default)]
    pub create_resource_bundle_provider: bool,
}

fn default_bundle_name() -> String {
    DEFAULT_BASE_BUNDLE_NAME.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for BaseBundleName {
    fn default() -> Self {
        Self {
            name: default_bundle_name(),
            default_language: default_language(),
            create_resource_bundle_provider: false,
        }
    }
}

/// Where to find texts that are not declared in the catalog itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UseAdditionalTexts {
    /// Directory of the additional texts file, relative to the catalog.
    /// Empty means the catalog's own directory.
    #[serde(default)]
    pub location: String,
}

/// Id of a catalog message, written as a JSON string or number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MessageIdDef {
    Number(i64),
    Name(String),
}

impl MessageIdDef {
    pub fn as_id(&self) -> MessageId<'_> {
        match self {
            MessageIdDef::Number(number) => MessageId::Number(*number),
            MessageIdDef::Name(name) => MessageId::Name(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Message {
    pub id: MessageIdDef,
    pub description: String,
    pub translations: Vec<Translation>,
}

/// What kind of element a text belongs to. It decides the use when none
/// is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTarget {
    #[default]
    Field,
    Property,
    Enum,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub class_name: String,
    pub description: String,
    #[serde(default, rename = "use")]
    pub text_use: TextUse,
    #[serde(default)]
    pub id: String,
    /// Name of the element carrying the text, e.g. `TXT_Greeting`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default)]
    pub target: TextTarget,
    pub translations: Vec<Translation>,
}

impl Text {
    /// Resolve use and id.
    ///
    /// An explicit use wins. Otherwise a field name `<USE>_<Id>` supplies
    /// both, and failing that the target decides: `NAME` for properties,
    /// `STRING` for enum members, `TXT` for everything else. An empty id
    /// falls back to the field name.
    pub fn resolve_use_and_id(&self) -> Result<(TextUse, String)> {
        let from_field = self.field.as_deref().and_then(|field| {
            let captures = FIELD_NAME.captures(field)?;
            let text_use = TextUse::from_name(&captures[1])?;
            Some((text_use, captures[2].to_string()))
        });

        let text_use = match (self.text_use, &from_field) {
            (TextUse::TextuseDefault, Some((text_use, _))) => *text_use,
            (TextUse::TextuseDefault, None) => match self.target {
                TextTarget::Property => TextUse::Name,
                TextTarget::Enum => TextUse::String,
                TextTarget::Field => TextUse::Txt,
            },
            (explicit, _) => explicit,
        };

        let id = if !self.id.is_empty() {
            self.id.clone()
        } else if let Some((_, id)) = from_field {
            id
        } else if let Some(field) = &self.field {
            field.clone()
        } else {
            bail!(
                "text \"{}\" in {} has neither an id nor a field name",
                self.description,
                self.class_name
            );
        };

        Ok((text_use, id))
    }
}

/// Documents why an element deliberately has no text. Never processed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, rename = "use")]
    pub text_use: TextUse,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_bundle_name: Option<BaseBundleName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_additional_texts: Option<UseAdditionalTexts>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub texts: Vec<Text>,
    #[serde(default)]
    pub no_texts: Vec<NoText>,
}

/// Messages and texts kept in an additional texts file.
#[derive(Debug, Clone, Default, Deserialize)]
struct AdditionalTexts {
    #[serde(default)]
    messages: Vec<Message>,
    #[serde(default)]
    texts: Vec<Text>,
}

/// A catalog together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub path: PathBuf,
    pub catalog: Catalog,
}

/// Read a catalog and merge the additional texts it asks for.
pub fn load_catalog(path: &Path) -> Result<LoadedCatalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    let mut catalog: Catalog = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;

    if let Some(additional) = &catalog.use_additional_texts {
        let dir = path.parent().unwrap_or(Path::new("."));
        let file = dir.join(&additional.location).join(ADDITIONAL_TEXT_FILE);
        let content = fs::read_to_string(&file)
            .with_context(|| format!("Failed to read additional texts: {}", file.display()))?;
        let extra: AdditionalTexts = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse additional texts: {}", file.display()))?;
        tracing::debug!(
            file = %file.display(),
            messages = extra.messages.len(),
            texts = extra.texts.len(),
            "merged additional texts"
        );
        catalog.messages.extend(extra.messages);
        catalog.texts.extend(extra.texts);
    }

    Ok(LoadedCatalog {
        path: path.to_path_buf(),
        catalog,
    })
}
