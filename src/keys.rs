//! Key composition for messages and texts.
//!
//! Message keys look like `MSG-000042` (or `MSG-SomeName` for named ids),
//! text keys like `com.sample.Example.CAPTION_Property`. Composition is
//! pure: the same inputs always give the same key.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, require_not_empty};

/// Base bundle name used when a catalog does not configure one.
pub const DEFAULT_BASE_BUNDLE_NAME: &str = "MessagesAndTexts";

/// Message prefix used when a catalog does not configure one.
pub const DEFAULT_MESSAGE_PREFIX: &str = "MSG";

/// Language of the default bundle.
pub const DEFAULT_LANGUAGE: &str = "en";

/// File holding texts that are not attached to a catalog entry.
pub const ADDITIONAL_TEXT_FILE: &str = "AdditionalTexts.json";

/// Minimum width of a numeric message id.
const MESSAGE_ID_WIDTH: usize = 6;

/// The role of a text, used to tell apart several texts for the same id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextUse {
    Button,
    Caption,
    File,
    Folder,
    Help,
    Header,
    Link,
    Name,
    Menu,
    Message,
    Prompt,
    Section,
    String,
    Title,
    Tooltip,
    Txt,
    Usage,
    /// Unspecified; the generator replaces it with `NAME`, `STRING` or `TXT`.
    #[default]
    TextuseDefault,
}

impl TextUse {
    pub const ALL: [TextUse; 18] = [
        TextUse::Button,
        TextUse::Caption,
        TextUse::File,
        TextUse::Folder,
        TextUse::Help,
        TextUse::Header,
        TextUse::Link,
        TextUse::Name,
        TextUse::Menu,
        TextUse::Message,
        TextUse::Prompt,
        TextUse::Section,
        TextUse::String,
        TextUse::Title,
        TextUse::Tooltip,
        TextUse::Txt,
        TextUse::Usage,
        TextUse::TextuseDefault,
    ];

    /// Canonical name as it appears in keys.
    pub fn name(self) -> &'static str {
        match self {
            TextUse::Button => "BUTTON",
            TextUse::Caption => "CAPTION",
            TextUse::File => "FILE",
            TextUse::Folder => "FOLDER",
            TextUse::Help => "HELP",
            TextUse::Header => "HEADER",
            TextUse::Link => "LINK",
            TextUse::Name => "NAME",
            TextUse::Menu => "MENU",
            TextUse::Message => "MESSAGE",
            TextUse::Prompt => "PROMPT",
            TextUse::Section => "SECTION",
            TextUse::String => "STRING",
            TextUse::Title => "TITLE",
            TextUse::Tooltip => "TOOLTIP",
            TextUse::Txt => "TXT",
            TextUse::Usage => "USAGE",
            TextUse::TextuseDefault => "TEXTUSE_DEFAULT",
        }
    }

    /// Look up a use by its canonical name. Case-sensitive.
    pub fn from_name(name: &str) -> Option<TextUse> {
        Self::ALL.into_iter().find(|u| u.name() == name)
    }
}

impl fmt::Display for TextUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An enum whose members carry localized names.
///
/// Use [`text_enum!`](crate::text_enum) to declare one.
pub trait TextEnum {
    /// Fully-qualified name of the enum type, e.g. `com.sample.Month`.
    fn qualified_name(&self) -> &'static str;

    /// Canonical name of this member, e.g. `JUNE`.
    fn member_name(&self) -> &'static str;
}

/// Declare an enum that implements [`TextEnum`].
///
/// ```
/// use keybundle::keys::{TextEnum, compose_enum_text_key};
///
/// keybundle::text_enum! {
///     #[derive(Debug, Clone, Copy)]
///     pub enum Season in "com.sample.Season" {
///         Spring => "SPRING",
///         Summer => "SUMMER",
///     }
/// }
///
/// assert_eq!(Season::Summer.member_name(), "SUMMER");
/// assert_eq!(
///     compose_enum_text_key(&Season::Spring).unwrap(),
///     "com.sample.Season.STRING_SPRING"
/// );
/// ```
#[macro_export]
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident in $qualified:literal {
            $($variant:ident => $member:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($variant),+
        }

        impl $crate::keys::TextEnum for $name {
            fn qualified_name(&self) -> &'static str {
                $qualified
            }

            fn member_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $member),+
                }
            }
        }
    };
}

impl TextEnum for TextUse {
    fn qualified_name(&self) -> &'static str {
        "keybundle.TextUse"
    }

    fn member_name(&self) -> &'static str {
        self.name()
    }
}

/// Identifier of a message: a name or a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageId<'a> {
    Name(&'a str),
    Number(i64),
}

impl<'a> From<&'a str> for MessageId<'a> {
    fn from(name: &'a str) -> Self {
        MessageId::Name(name)
    }
}

impl<'a> From<&'a String> for MessageId<'a> {
    fn from(name: &'a String) -> Self {
        MessageId::Name(name.as_str())
    }
}

impl From<i64> for MessageId<'_> {
    fn from(number: i64) -> Self {
        MessageId::Number(number)
    }
}

impl From<i32> for MessageId<'_> {
    fn from(number: i32) -> Self {
        MessageId::Number(i64::from(number))
    }
}

/// Compose `<prefix>-<id>`.
///
/// Numeric ids are zero-padded to at least six digits; wider values are
/// kept as they are.
///
/// ```
/// use keybundle::keys::compose_message_key;
///
/// assert_eq!(compose_message_key("MSG", 1704_i32).unwrap(), "MSG-001704");
/// assert_eq!(compose_message_key("MSG", "AMessage").unwrap(), "MSG-AMessage");
/// ```
pub fn compose_message_key<'a>(prefix: &str, id: impl Into<MessageId<'a>>) -> Result<String> {
    let prefix = require_not_empty(prefix, "messagePrefix")?;
    let key = match id.into() {
        MessageId::Name(name) => format!("{}-{}", prefix, require_not_empty(name, "id")?),
        MessageId::Number(number) => {
            format!("{}-{:0width$}", prefix, number, width = MESSAGE_ID_WIDTH)
        }
    };
    Ok(key)
}

/// Compose `<qualifiedName>.<USE>_<id>`.
pub fn compose_text_key(qualified_name: &str, text_use: TextUse, id: &str) -> Result<String> {
    let qualified_name = require_not_empty(qualified_name, "sourceClass")?;
    let id = require_not_empty(id, "id")?;
    Ok(format!("{}.{}_{}", qualified_name, text_use.name(), id))
}

/// Compose the text key for an enum member: use is always `STRING`, the id
/// is the member's canonical name.
pub fn compose_enum_text_key<E: TextEnum + ?Sized>(value: &E) -> Result<String> {
    compose_text_key(value.qualified_name(), TextUse::String, value.member_name())
}
