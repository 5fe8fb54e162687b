//! The key→template mapping consulted during resolution.

use std::collections::{BTreeMap, HashMap};

/// Read-only access to localized templates.
pub trait TextStore {
    /// Template stored for `key`, if any.
    fn get_text(&self, key: &str) -> Option<&str>;

    fn contains_key(&self, key: &str) -> bool {
        self.get_text(key).is_some()
    }

    /// True if the store holds no keys at all.
    fn is_empty(&self) -> bool;
}

impl TextStore for HashMap<String, String> {
    fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }

    fn is_empty(&self) -> bool {
        HashMap::is_empty(self)
    }
}

impl TextStore for BTreeMap<String, String> {
    fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }

    fn is_empty(&self) -> bool {
        BTreeMap::is_empty(self)
    }
}

impl<S: TextStore + ?Sized> TextStore for &S {
    fn get_text(&self, key: &str) -> Option<&str> {
        (**self).get_text(key)
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_stores() {
        let mut hash = HashMap::new();
        hash.insert("KEY".to_string(), "Value".to_string());
        assert_eq!(hash.get_text("KEY"), Some("Value"));
        assert!(hash.contains_key("KEY"));
        assert!(!hash.contains_key("OTHER"));
        assert!(!TextStore::is_empty(&hash));

        let tree: BTreeMap<String, String> = BTreeMap::new();
        assert_eq!(tree.get_text("KEY"), None);
        assert!(TextStore::is_empty(&tree));
    }
}
