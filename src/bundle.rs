//! A loaded resource bundle and its parent chain.

use std::collections::BTreeMap;

use unic_langid::LanguageIdentifier;

use crate::store::TextStore;

/// Templates for one locale of a bundle family.
///
/// Lookups that miss fall through to the parent, which holds the texts of
/// a more general locale (`de_CH` → `de` → default bundle).
#[derive(Debug, Clone)]
pub struct ResourceBundle {
    base_name: String,
    locale: Option<LanguageIdentifier>,
    entries: BTreeMap<String, String>,
    parent: Option<Box<ResourceBundle>>,
}

impl ResourceBundle {
    pub fn new(
        base_name: impl Into<String>,
        locale: Option<LanguageIdentifier>,
        entries: BTreeMap<String, String>,
    ) -> Self {
        Self {
            base_name: base_name.into(),
            locale,
            entries,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: ResourceBundle) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Locale of this bundle; `None` for the default bundle.
    pub fn locale(&self) -> Option<&LanguageIdentifier> {
        self.locale.as_ref()
    }

    pub fn parent(&self) -> Option<&ResourceBundle> {
        self.parent.as_deref()
    }

    /// Look up a template, consulting the parent chain.
    pub fn get(&self, key: &str) -> Option<&str> {
        let mut bundle = Some(self);
        while let Some(current) = bundle {
            if let Some(value) = current.entries.get(key) {
                return Some(value.as_str());
            }
            bundle = current.parent();
        }
        None
    }

    /// All keys visible through this bundle, including inherited ones.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        let mut bundle = Some(self);
        while let Some(current) = bundle {
            keys.extend(current.entries.keys().map(String::as_str));
            bundle = current.parent();
        }
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Number of entries defined directly in this bundle.
    pub fn own_len(&self) -> usize {
        self.entries.len()
    }
}

impl TextStore for ResourceBundle {
    fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key)
    }

    fn is_empty(&self) -> bool {
        let mut bundle = Some(self);
        while let Some(current) = bundle {
            if !current.entries.is_empty() {
                return false;
            }
            bundle = current.parent();
        }
        true
    }
}
