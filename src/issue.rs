use std::{cmp::Ordering, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    DuplicateKey,
    MissingDefault,
    InvalidEntry,
    Untranslated,
    OrphanBundle,
    ParseError,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::DuplicateKey => write!(f, "duplicate-key"),
            Rule::MissingDefault => write!(f, "missing-default"),
            Rule::InvalidEntry => write!(f, "invalid-entry"),
            Rule::Untranslated => write!(f, "untranslated"),
            Rule::OrphanBundle => write!(f, "orphan-bundle"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub file_path: Option<String>,
    pub message: String,
    pub severity: Severity,
    pub rule: Rule,
    pub details: Option<String>,
    pub hint: Option<String>,
}

impl Issue {
    pub fn duplicate_key(file_path: &str, key: &str, first_seen_in: &str) -> Self {
        Self {
            file_path: Some(file_path.to_string()),
            message: key.to_string(),
            severity: Severity::Error,
            rule: Rule::DuplicateKey,
            details: Some(format!("already defined in {}", first_seen_in)),
            hint: None,
        }
    }

    pub fn missing_default(file_path: &str, key: &str, default_language: &str) -> Self {
        Self {
            file_path: Some(file_path.to_string()),
            message: key.to_string(),
            severity: Severity::Error,
            rule: Rule::MissingDefault,
            details: Some(format!("no translation for default language \"{}\"", default_language)),
            hint: Some(format!(
                "add {{ \"language\": \"{}\", \"text\": \"...\" }} to its translations",
                default_language
            )),
        }
    }

    pub fn invalid_entry(file_path: &str, reason: &str) -> Self {
        Self {
            file_path: Some(file_path.to_string()),
            message: reason.to_string(),
            severity: Severity::Error,
            rule: Rule::InvalidEntry,
            details: None,
            hint: None,
        }
    }

    pub fn untranslated(file_path: &str, key: &str, missing_in: &[String]) -> Self {
        Self {
            file_path: Some(file_path.to_string()),
            message: key.to_string(),
            severity: Severity::Warning,
            rule: Rule::Untranslated,
            details: Some(format!("missing in: {}", missing_in.join(", "))),
            hint: None,
        }
    }

    pub fn orphan_bundle(file_path: &str, language: &str) -> Self {
        Self {
            file_path: Some(file_path.to_string()),
            message: language.to_string(),
            severity: Severity::Warning,
            rule: Rule::OrphanBundle,
            details: Some("no catalog entry uses this language".to_string()),
            hint: Some("delete the file or add translations for the language".to_string()),
        }
    }

    pub fn parse_error(file_path: &str, error: &str) -> Self {
        Self {
            file_path: Some(file_path.to_string()),
            message: format!("Failed to parse: {}", error),
            severity: Severity::Error,
            rule: Rule::ParseError,
            details: None,
            hint: None,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> Ordering {
        // file_path (None last), then rule, then message so that output
        // does not depend on map iteration order
        match (&self.file_path, &other.file_path) {
            (Some(a), Some(b)) => a
                .cmp(b)
                .then_with(|| self.rule.cmp(&other.rule))
                .then_with(|| self.message.cmp(&other.message)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self
                .rule
                .cmp(&other.rule)
                .then_with(|| self.message.cmp(&other.message)),
        }
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
