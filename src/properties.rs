//! Reading and writing `.properties` bundle files.
//!
//! Files are always treated as UTF-8, whatever the platform default is.
//! The syntax is the classic one: `#`/`!` comments, `key=value`,
//! `key: value` or `key value`, backslash line continuations and
//! `\uXXXX` escapes. A key defined twice keeps its last value.

use std::{collections::BTreeMap, fs, path::Path};

use crate::error::{I18nError, Result};

/// Read and parse a properties file.
pub fn read_properties(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = fs::read_to_string(path).map_err(|source| I18nError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_properties(&content, path)
}

/// Parse properties text. `path` is only used in error messages.
pub fn parse_properties(content: &str, path: &Path) -> Result<BTreeMap<String, String>> {
    let mut entries = BTreeMap::new();

    for (line_number, logical) in logical_lines(content) {
        let fail = |message: &str| I18nError::Properties {
            path: path.to_path_buf(),
            line: line_number,
            message: message.to_string(),
        };

        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key).map_err(fail)?;
        let value = unescape(raw_value).map_err(fail)?;
        entries.insert(key, value);
    }

    Ok(entries)
}

/// Join continued lines. Yields the 1-based number of the first natural
/// line together with the logical line, comments and blank lines removed.
fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (index, natural) in natural_lines(content).enumerate() {
        let line_number = index + 1;
        let trimmed = natural.trim_start_matches([' ', '\t', '\u{000C}']);

        let (start, mut text) = match current.take() {
            Some((start, text)) => (start, text),
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                (line_number, String::new())
            }
        };

        if ends_with_continuation(trimmed) {
            text.push_str(&trimmed[..trimmed.len() - 1]);
            current = Some((start, text));
        } else {
            text.push_str(trimmed);
            lines.push((start, text));
        }
    }

    if let Some(pending) = current {
        lines.push(pending);
    }

    lines
}

/// Lines terminated by `\n`, `\r\n` or a bare `\r`.
fn natural_lines(content: &str) -> impl Iterator<Item = &str> {
    let content = content
        .strip_suffix("\r\n")
        .or_else(|| content.strip_suffix(['\n', '\r']))
        .unwrap_or(content);
    content.split("\r\n").flat_map(|line| line.split(['\n', '\r']))
}

fn ends_with_continuation(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|c| *c == '\\').count();
    trailing % 2 == 1
}

/// Split at the first unescaped `=`, `:` or whitespace.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\u{000C}' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches([' ', '\t', '\u{000C}']);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches([' ', '\t', '\u{000C}']);
    }
    (key, rest)
}

const MALFORMED_UNICODE: &str = "malformed \\uxxxx encoding";

/// Four hex digits of a `\uXXXX` escape.
fn read_code_unit(chars: &mut std::str::Chars<'_>) -> std::result::Result<u32, &'static str> {
    let mut code = 0;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or(MALFORMED_UNICODE)?;
        code = code * 16 + digit;
    }
    Ok(code)
}

fn unescape(raw: &str) -> std::result::Result<String, &'static str> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let code = read_code_unit(&mut chars)?;
                let decoded = match code {
                    0xD800..=0xDBFF => {
                        if chars.next() != Some('\\') || chars.next() != Some('u') {
                            return Err(MALFORMED_UNICODE);
                        }
                        let low = read_code_unit(&mut chars)?;
                        if !(0xDC00..=0xDFFF).contains(&low) {
                            return Err(MALFORMED_UNICODE);
                        }
                        char::from_u32(0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00))
                    }
                    _ => char::from_u32(code),
                };
                out.push(decoded.ok_or(MALFORMED_UNICODE)?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

/// Escape a key so that it reads back unchanged.
pub fn escape_key(key: &str) -> String {
    escape(key, true)
}

/// Escape a value so that it reads back unchanged.
pub fn escape_value(value: &str) -> String {
    escape(value, false)
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{000C}' => out.push_str("\\f"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' | '#' | '!' if is_key => {
                out.push('\\');
                out.push(c);
            }
            '#' | '!' if i == 0 => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Render entries as properties text. Each entry may carry a comment
/// written on the line before it.
pub fn write_properties<'a, I>(header: Option<&str>, entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str, Option<&'a str>)>,
{
    let mut out = String::new();
    if let Some(header) = header {
        for line in header.lines() {
            out.push_str("# ");
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }
    for (key, value, comment) in entries {
        if let Some(comment) = comment {
            for line in comment.lines() {
                out.push_str("# ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push_str(&escape_key(key));
        out.push('=');
        out.push_str(&escape_value(value));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn parse(content: &str) -> BTreeMap<String, String> {
        parse_properties(content, Path::new("test.properties")).unwrap()
    }

    #[test]
    fn test_separators_and_comments() {
        let entries = parse(
            "# comment\n! other comment\n\nequals=one\ncolon: two\nspace three\n  indented = four \n",
        );
        assert_eq!(entries["equals"], "one");
        assert_eq!(entries["colon"], "two");
        assert_eq!(entries["space"], "three");
        assert_eq!(entries["indented"], "four ");
        assert_eq!(entries.len(), 4);
    }

    #[test]
    fn test_continuation_lines() {
        let entries = parse("fruits=apple, \\\n    banana, \\\n    pear\nnext=1\n");
        assert_eq!(entries["fruits"], "apple, banana, pear");
        assert_eq!(entries["next"], "1");
    }

    #[test]
    fn test_even_backslashes_do_not_continue() {
        let entries = parse("path=C:\\\\\nother=x\n");
        assert_eq!(entries["path"], "C:\\");
        assert_eq!(entries["other"], "x");
    }

    #[test]
    fn test_escapes() {
        let entries = parse("newline=first line\\nsecond line\nunicode=caf\\u00e9\nkey\\ with\\=sep=v\nutf8=Grüße\n");
        assert_eq!(entries["newline"], "first line\nsecond line");
        assert_eq!(entries["unicode"], "café");
        assert_eq!(entries["key with=sep"], "v");
        assert_eq!(entries["utf8"], "Grüße");
    }

    #[test]
    fn test_surrogate_pair_escape() {
        let entries = parse("smile=\\ud83d\\ude00\nmixed=a\\uD83D\\uDE00b\n");
        assert_eq!(entries["smile"], "\u{1F600}");
        assert_eq!(entries["mixed"], "a\u{1F600}b");
    }

    #[test]
    fn test_unpaired_surrogate_is_error() {
        for content in [
            "lone=\\ud83d\n",
            "unpaired=\\ud83dx\n",
            "two_high=\\ud83d\\ud83d\n",
            "low_only=\\ude00\n",
            "short=\\u12\n",
        ] {
            let err = parse_properties(content, Path::new("bad.properties")).unwrap_err();
            assert!(
                matches!(&err, I18nError::Properties { line: 1, message, .. } if message == "malformed \\uxxxx encoding"),
                "{}: {:?}",
                content,
                err
            );
        }
    }

    #[test]
    fn test_line_terminators() {
        let entries = parse("a=1\rb=2\r\nc=3\nd=4\r");
        assert_eq!(entries["a"], "1");
        assert_eq!(entries["b"], "2");
        assert_eq!(entries["c"], "3");
        assert_eq!(entries["d"], "4");
        assert_eq!(entries.len(), 4);

        let entries = parse("list=x, \\\r  y\r");
        assert_eq!(entries["list"], "x, y");
    }

    #[test]
    fn test_line_numbers_count_bare_carriage_returns() {
        let err = parse_properties("a=1\rb=2\rbad=\\uZZZZ\r", Path::new("t.properties")).unwrap_err();
        assert!(matches!(err, I18nError::Properties { line: 3, .. }));
    }

    #[test]
    fn test_later_definition_wins() {
        let entries = parse("k=1\nk=2\n");
        assert_eq!(entries["k"], "2");
    }

    #[test]
    fn test_key_without_value() {
        let entries = parse("lonely\n");
        assert_eq!(entries["lonely"], "");
    }

    #[test]
    fn test_malformed_unicode_reports_line() {
        let err = parse_properties("ok=1\nbad=\\u12g4\n", Path::new("x.properties")).unwrap_err();
        match err {
            I18nError::Properties { path, line, .. } => {
                assert_eq!(path, PathBuf::from("x.properties"));
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_escape_round_trip_for_awkward_values() {
        let key = "odd key:=#";
        let value = " leading space\\n literal, tab\tand newline\n# not a comment";
        let text = write_properties(None, [(key, value, None)]);
        let entries = parse(&text);
        assert_eq!(entries[key], value);
    }

    #[test]
    fn test_write_properties_layout() {
        let text = write_properties(
            Some("Generated file"),
            [
                ("MSG-000001", "Hello %s", Some("Greeting")),
                ("MSG-000002", "Bye", None),
            ],
        );
        insta::assert_snapshot!(text, @r"
        # Generated file

        # Greeting
        MSG-000001=Hello %s
        MSG-000002=Bye
        ");
    }

    #[test]
    fn test_read_properties_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = read_properties(&dir.path().join("absent.properties")).unwrap_err();
        assert!(matches!(err, I18nError::Io { .. }));
    }
}
