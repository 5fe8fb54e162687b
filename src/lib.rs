//! keybundle - resource-bundle keys and localized texts
//!
//! keybundle is a library and CLI for working with `.properties` resource
//! bundles. It composes message and text keys, resolves keys to localized
//! texts with a readable fallback when a bundle or key is missing, and
//! generates bundle files from JSON catalogs.
//!
//! ## Module Structure
//!
//! - `keys`: Key composition and the `TextUse` classification
//! - `resolve`: Text and message resolution with fallbacks
//! - `format`: printf-style templates and escape translation
//! - `store`, `bundle`, `loader`, `properties`: Backing stores on disk
//! - `catalog`, `generate`, `issue`: Catalogs and bundle generation
//! - `config`: Configuration file loading and parsing
//! - `cli`: Command-line interface layer

pub mod bundle;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod generate;
pub mod issue;
pub mod keys;
pub mod loader;
pub mod properties;
pub mod resolve;
pub mod store;

pub use bundle::ResourceBundle;
pub use error::{I18nError, Result};
pub use format::Arg;
pub use keys::{
    MessageId, TextEnum, TextUse, compose_enum_text_key, compose_message_key, compose_text_key,
};
pub use loader::{BundleLoader, load_bundle};
pub use resolve::{
    create_fallback, resolve_enum_text, resolve_text, resolve_text_or_missing, retrieve_enum_text,
    retrieve_message, retrieve_text,
};
pub use store::TextStore;
