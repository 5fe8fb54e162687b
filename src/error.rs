//! Error type for the key composition and text resolution library.
//!
//! Absence of a bundle or of a key is never represented here: missing
//! bundles are `None` and missing keys resolve to a fallback text.

use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, I18nError>;

#[derive(Debug, Error)]
pub enum I18nError {
    /// A required argument was empty or blank.
    #[error("argument '{argument}' must not be empty")]
    InvalidArgument { argument: &'static str },

    /// A template could not be applied to its arguments.
    #[error("invalid format template \"{template}\": {message}")]
    Format { template: String, message: String },

    /// The formatted text contained an unknown backslash escape.
    #[error("invalid escape sequence at offset {offset} in \"{text}\"")]
    Escape { text: String, offset: usize },

    /// A `.properties` file exists but cannot be parsed.
    #[error("{}:{line}: {message}", path.display())]
    Properties {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Fail with [`I18nError::InvalidArgument`] when `value` is empty.
pub(crate) fn require_not_empty<'a>(value: &'a str, argument: &'static str) -> Result<&'a str> {
    if value.is_empty() {
        Err(I18nError::InvalidArgument { argument })
    } else {
        Ok(value)
    }
}
