//! Resolution of keys against an optional store.
//!
//! Three situations are kept apart: no store at all, a store that lacks the
//! key, and a store holding the key. A missing store or key never fails;
//! it yields a fallback text instead.

use crate::{
    error::{Result, require_not_empty},
    format::{Arg, format_template, render_args, translate_escapes},
    keys::{MessageId, TextEnum, compose_enum_text_key, compose_message_key},
    store::TextStore,
};

/// Key used by [`resolve_text_or_missing`] when the caller has none.
pub const MISSING_TEXT_KEY: &str = "MissingTextKey";

/// Key embedded in the fallback built by [`resolve_text_or_missing`] when
/// the caller has no text.
pub const MISSING_TEXT: &str = "MissingText";

/// Build `[<key>] – <args>`.
///
/// ```
/// use keybundle::{Arg, resolve::create_fallback};
///
/// assert_eq!(create_fallback("KEY", Some(&[])).unwrap(), "[KEY] – []");
/// assert_eq!(create_fallback("KEY", None).unwrap(), "[KEY] – null");
/// assert_eq!(
///     create_fallback("KEY", Some(&[Arg::from("a"), Arg::from(2)])).unwrap(),
///     "[KEY] – [a, 2]"
/// );
/// ```
pub fn create_fallback(key: &str, args: Option<&[Arg]>) -> Result<String> {
    let key = require_not_empty(key, "key")?;
    Ok(format!("[{}] \u{2013} {}", key, render_args(args)))
}

/// Look up `key` and apply `args` to the template found.
///
/// Escape sequences in the formatted text are translated. A missing key
/// gives the [`create_fallback`] text.
pub fn retrieve_text<S>(store: &S, key: &str, args: Option<&[Arg]>) -> Result<String>
where
    S: TextStore + ?Sized,
{
    let key = require_not_empty(key, "key")?;
    match store.get_text(key) {
        Some(template) => apply(template, args.unwrap_or_default()),
        None => create_fallback(key, args),
    }
}

/// Look up the `STRING` text of an enum member.
///
/// Unlike [`retrieve_text`], a missing store or key gives the text key
/// itself rather than the bracketed fallback.
pub fn retrieve_enum_text<E>(store: Option<&dyn TextStore>, value: &E) -> Result<String>
where
    E: TextEnum + ?Sized,
{
    let key = compose_enum_text_key(value)?;
    match store.and_then(|store| store.get_text(&key)) {
        Some(template) => apply(template, &[]),
        None => Ok(key),
    }
}

/// Use the store when there is one and `key` is not blank; otherwise
/// return `text` unchanged.
pub fn resolve_text(
    store: Option<&dyn TextStore>,
    text: &str,
    key: &str,
    args: Option<&[Arg]>,
) -> Result<String> {
    match store {
        Some(store) if !key.trim().is_empty() => retrieve_text(store, key, args),
        _ => Ok(require_not_empty(text, "text")?.to_string()),
    }
}

/// Variant of [`resolve_text`] for callers whose text or key may be absent.
///
/// A missing text becomes the fallback for [`MISSING_TEXT`], a missing key
/// becomes [`MISSING_TEXT_KEY`].
pub fn resolve_text_or_missing(
    store: Option<&dyn TextStore>,
    text: Option<&str>,
    key: Option<&str>,
    args: Option<&[Arg]>,
) -> Result<String> {
    let text = match text {
        Some(text) => text.to_string(),
        None => create_fallback(MISSING_TEXT, args)?,
    };
    resolve_text(store, &text, key.unwrap_or(MISSING_TEXT_KEY), args)
}

/// Resolve an enum member: without a store its canonical name is used.
pub fn resolve_enum_text<E>(store: Option<&dyn TextStore>, value: &E) -> Result<String>
where
    E: TextEnum + ?Sized,
{
    match store {
        Some(store) => retrieve_enum_text(Some(store), value),
        None => Ok(require_not_empty(value.member_name(), "value")?.to_string()),
    }
}

/// Retrieve a message by prefix and id. With `add_key` the key is put in
/// front: `[MSG-000042] The text`.
pub fn retrieve_message<'a, S>(
    store: &S,
    prefix: &str,
    id: impl Into<MessageId<'a>>,
    add_key: bool,
    args: Option<&[Arg]>,
) -> Result<String>
where
    S: TextStore + ?Sized,
{
    let key = compose_message_key(prefix, id)?;
    let message = retrieve_text(store, &key, args)?;
    if add_key {
        Ok(format!("[{}] {}", key, message))
    } else {
        Ok(message)
    }
}

fn apply(template: &str, args: &[Arg]) -> Result<String> {
    let formatted = format_template(template, args)?;
    translate_escapes(&formatted)
}
