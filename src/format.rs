//! printf-style templates and backslash escape translation.
//!
//! Templates stored in bundles use the `%[index$][flags][width][.precision]conv`
//! syntax: `%s`, `%d`, `%1$s`, `%<s`, `%,d`, `%08.3f`, `%%`, `%n` and friends.
//! Arguments are consumed in order unless an explicit index is given; an
//! explicit index does not move the ordinary counter.

use std::fmt;

use crate::error::{I18nError, Result};

/// A value that can be substituted into a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => f.write_str(s),
            Arg::Int(i) => write!(f, "{}", i),
            Arg::Float(x) => f.write_str(&double_to_string(*x)),
            Arg::Bool(b) => write!(f, "{}", b),
            Arg::Char(c) => write!(f, "{}", c),
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Str(value.clone())
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Arg::Int(i64::from(value))
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<u32> for Arg {
    fn from(value: u32) -> Self {
        Arg::Int(i64::from(value))
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

impl From<char> for Arg {
    fn from(value: char) -> Self {
        Arg::Char(value)
    }
}

/// Decimal form for magnitudes in `[1e-3, 1e7)`, `1.0E20` style otherwise,
/// and `NaN`/`Infinity` for non-finite values.
fn double_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-Infinity" } else { "Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        // Debug keeps the trailing ".0" for integral values
        return format!("{:?}", value);
    }

    let raw = format!("{:e}", value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{}E{}", mantissa, exponent),
        Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
        None => raw,
    }
}

/// Render an argument list the way fallback texts show it:
/// `null` for no list at all, otherwise `[a, b, c]`.
pub fn render_args(args: Option<&[Arg]>) -> String {
    match args {
        None => "null".to_string(),
        Some(args) => {
            let items: Vec<String> = args.iter().map(ToString::to_string).collect();
            format!("[{}]", items.join(", "))
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Flags {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    group: bool,
    alternate: bool,
}

#[derive(Debug, Clone, Copy)]
enum ArgRef {
    Next,
    Previous,
    Explicit(usize),
}

#[derive(Debug)]
struct Spec {
    arg: ArgRef,
    flags: Flags,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
}

/// Apply `args` to `template`.
pub fn format_template(template: &str, args: &[Arg]) -> Result<String> {
    let error = |message: String| I18nError::Format {
        template: template.to_string(),
        message,
    };

    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();
    let mut next_ordinary = 0;
    let mut last_used: Option<usize> = None;

    while let Some((_, c)) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let spec = parse_spec(&mut chars).map_err(&error)?;

        match spec.conversion {
            '%' => {
                pad_into(&mut out, "%", spec.width, spec.flags.left);
                continue;
            }
            'n' => {
                out.push('\n');
                continue;
            }
            _ => {}
        }

        let index = match spec.arg {
            ArgRef::Next => {
                next_ordinary += 1;
                next_ordinary - 1
            }
            ArgRef::Previous => {
                last_used.ok_or_else(|| error("'%<' used before any argument".to_string()))?
            }
            ArgRef::Explicit(n) => n - 1,
        };
        last_used = Some(index);

        let arg = args.get(index).ok_or_else(|| {
            error(format!(
                "missing argument {} for '%{}'",
                index + 1,
                spec.conversion
            ))
        })?;

        let rendered = convert(&spec, arg).map_err(&error)?;
        out.push_str(&rendered);
    }

    Ok(out)
}

fn parse_spec(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) -> std::result::Result<Spec, String> {
    let mut arg = ArgRef::Next;
    let mut flags = Flags::default();

    if chars.peek().map(|(_, c)| *c) == Some('<') {
        chars.next();
        arg = ArgRef::Previous;
    }

    // Leading digits are either an argument index (when followed by '$')
    // or the width.
    let mut digits = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if c.is_ascii_digit() && !(digits.is_empty() && c == '0') {
            digits.push(c);
            chars.next();
        } else {
            break;
        }
    }

    let mut width = None;
    if !digits.is_empty() {
        if chars.peek().map(|(_, c)| *c) == Some('$') {
            chars.next();
            let index: usize = digits.parse().map_err(|_| "argument index too large")?;
            if index == 0 {
                return Err("argument index must start at 1".to_string());
            }
            arg = ArgRef::Explicit(index);
        } else {
            width = Some(digits.parse().map_err(|_| "width too large")?);
        }
    }

    if width.is_none() {
        while let Some(&(_, c)) = chars.peek() {
            match c {
                '-' => flags.left = true,
                '0' => flags.zero = true,
                '+' => flags.plus = true,
                ' ' => flags.space = true,
                ',' => flags.group = true,
                '#' => flags.alternate = true,
                _ => break,
            }
            chars.next();
        }

        let mut digits = String::new();
        while let Some(&(_, c)) = chars.peek() {
            if c.is_ascii_digit() {
                digits.push(c);
                chars.next();
            } else {
                break;
            }
        }
        if !digits.is_empty() {
            width = Some(digits.parse().map_err(|_| "width too large")?);
        }
    }

    let mut precision = None;
    if chars.peek().map(|(_, c)| *c) == Some('.') {
        chars.next();
        let mut digits = String::new();
        while let Some(&(_, c)) = chars.peek() {
            if c.is_ascii_digit() {
                digits.push(c);
                chars.next();
            } else {
                break;
            }
        }
        if digits.is_empty() {
            return Err("missing precision after '.'".to_string());
        }
        precision = Some(digits.parse().map_err(|_| "precision too large")?);
    }

    let conversion = match chars.next() {
        Some((_, c)) => c,
        None => return Err("incomplete format specifier at end of template".to_string()),
    };

    if flags.left && width.is_none() {
        return Err(format!("'-' flag requires a width in '%{}'", conversion));
    }

    Ok(Spec {
        arg,
        flags,
        width,
        precision,
        conversion,
    })
}

fn convert(spec: &Spec, arg: &Arg) -> std::result::Result<String, String> {
    let conversion = spec.conversion;
    let text = match conversion {
        's' | 'S' => {
            let mut text = arg.to_string();
            if let Some(precision) = spec.precision {
                text = text.chars().take(precision).collect();
            }
            if conversion == 'S' {
                text = text.to_uppercase();
            }
            return Ok(padded(&text, spec.width, spec.flags.left));
        }
        'b' | 'B' => {
            let value = match arg {
                Arg::Bool(b) => *b,
                _ => true,
            };
            let text = if conversion == 'B' {
                value.to_string().to_uppercase()
            } else {
                value.to_string()
            };
            return Ok(padded(&text, spec.width, spec.flags.left));
        }
        'c' | 'C' => {
            let c = match arg {
                Arg::Char(c) => *c,
                Arg::Int(i) => u32::try_from(*i)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("{} is not a valid code point", i))?,
                other => return Err(mismatch(conversion, other)),
            };
            let text = if conversion == 'C' {
                c.to_uppercase().collect()
            } else {
                c.to_string()
            };
            return Ok(padded(&text, spec.width, spec.flags.left));
        }
        'd' => {
            if spec.precision.is_some() {
                return Err("precision is not allowed for '%d'".to_string());
            }
            let value = integer(conversion, arg)?;
            let digits = value.unsigned_abs().to_string();
            let digits = if spec.flags.group {
                group_thousands(&digits)
            } else {
                digits
            };
            signed(value < 0, digits, spec)
        }
        'x' | 'X' | 'o' => {
            let value = integer(conversion, arg)?;
            let mut digits = match conversion {
                'x' => format!("{:x}", value),
                'X' => format!("{:X}", value),
                _ => format!("{:o}", value),
            };
            if spec.flags.alternate {
                digits = match conversion {
                    'x' => format!("0x{}", digits),
                    'X' => format!("0X{}", digits),
                    _ => format!("0{}", digits),
                };
            }
            zero_or_space_pad(digits, spec)
        }
        'f' => {
            let value = float(conversion, arg)?;
            if !value.is_finite() {
                return Ok(non_finite(value, false, spec));
            }
            let precision = spec.precision.unwrap_or(6);
            let digits = format!("{:.*}", precision, value.abs());
            let digits = if spec.flags.group {
                match digits.split_once('.') {
                    Some((int, frac)) => format!("{}.{}", group_thousands(int), frac),
                    None => group_thousands(&digits),
                }
            } else {
                digits
            };
            signed(value.is_sign_negative() && value != 0.0, digits, spec)
        }
        'e' | 'E' => {
            let value = float(conversion, arg)?;
            if !value.is_finite() {
                return Ok(non_finite(value, conversion == 'E', spec));
            }
            let precision = spec.precision.unwrap_or(6);
            let digits = scientific(value.abs(), precision);
            let digits = if conversion == 'E' {
                digits.to_uppercase()
            } else {
                digits
            };
            signed(value.is_sign_negative() && value != 0.0, digits, spec)
        }
        other => return Err(format!("unknown conversion '%{}'", other)),
    }?;
    Ok(text)
}

fn mismatch(conversion: char, arg: &Arg) -> String {
    format!("'%{}' cannot format argument '{}'", conversion, arg)
}

fn integer(conversion: char, arg: &Arg) -> std::result::Result<i64, String> {
    match arg {
        Arg::Int(i) => Ok(*i),
        other => Err(mismatch(conversion, other)),
    }
}

fn float(conversion: char, arg: &Arg) -> std::result::Result<f64, String> {
    match arg {
        Arg::Float(x) => Ok(*x),
        other => Err(mismatch(conversion, other)),
    }
}

/// Prefix a sign (or the space/plus flag) and pad to the width.
fn signed(negative: bool, digits: String, spec: &Spec) -> std::result::Result<String, String> {
    let sign = if negative {
        "-"
    } else if spec.flags.plus {
        "+"
    } else if spec.flags.space {
        " "
    } else {
        ""
    };

    match spec.width {
        Some(width) if spec.flags.zero && !spec.flags.left => {
            let len = sign.len() + digits.chars().count();
            let zeros = "0".repeat(width.saturating_sub(len));
            Ok(format!("{}{}{}", sign, zeros, digits))
        }
        _ => Ok(padded(&format!("{}{}", sign, digits), spec.width, spec.flags.left)),
    }
}

/// `NaN` and `Infinity` take sign flags but are padded with spaces only.
fn non_finite(value: f64, upper: bool, spec: &Spec) -> String {
    let text = if value.is_nan() {
        "NaN".to_string()
    } else {
        let sign = if value < 0.0 {
            "-"
        } else if spec.flags.plus {
            "+"
        } else if spec.flags.space {
            " "
        } else {
            ""
        };
        format!("{}Infinity", sign)
    };
    let text = if upper { text.to_uppercase() } else { text };
    padded(&text, spec.width, spec.flags.left)
}

fn zero_or_space_pad(digits: String, spec: &Spec) -> std::result::Result<String, String> {
    match spec.width {
        Some(width) if spec.flags.zero && !spec.flags.left => {
            let zeros = "0".repeat(width.saturating_sub(digits.chars().count()));
            Ok(format!("{}{}", zeros, digits))
        }
        _ => Ok(padded(&digits, spec.width, spec.flags.left)),
    }
}

fn padded(text: &str, width: Option<usize>, left: bool) -> String {
    let mut out = String::new();
    pad_into(&mut out, text, width, left);
    out
}

fn pad_into(out: &mut String, text: &str, width: Option<usize>, left: bool) {
    let len = text.chars().count();
    let fill = width.map_or(0, |w| w.saturating_sub(len));
    if left {
        out.push_str(text);
        out.extend(std::iter::repeat_n(' ', fill));
    } else {
        out.extend(std::iter::repeat_n(' ', fill));
        out.push_str(text);
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `1.234568e+04` style output: at least two exponent digits, always signed.
fn scientific(value: f64, precision: usize) -> String {
    let raw = format!("{:.*e}", precision, value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, magnitude) = match exponent.strip_prefix('-') {
                Some(rest) => ('-', rest),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, magnitude)
        }
        None => raw,
    }
}

/// Translate backslash escapes: `\b \t \n \f \r \s \" \' \\`, octal
/// escapes up to `\377`, and a backslash before a line terminator, which
/// joins the lines.
pub fn translate_escapes(text: &str) -> Result<String> {
    if !text.contains('\\') {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let invalid = || I18nError::Escape {
            text: text.to_string(),
            offset,
        };

        let Some((_, escaped)) = chars.next() else {
            return Err(invalid());
        };

        match escaped {
            'b' => out.push('\u{0008}'),
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'f' => out.push('\u{000C}'),
            'r' => out.push('\r'),
            's' => out.push(' '),
            '"' | '\'' | '\\' => out.push(escaped),
            '\n' => {}
            '\r' => {
                if chars.peek().map(|(_, c)| *c) == Some('\n') {
                    chars.next();
                }
            }
            '0'..='7' => {
                let limit = if escaped <= '3' { 2 } else { 1 };
                let mut code = escaped.to_digit(8).unwrap_or(0);
                for _ in 0..limit {
                    match chars.peek().and_then(|(_, c)| c.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(code).ok_or_else(invalid)?);
            }
            _ => return Err(invalid()),
        }
    }

    Ok(out)
}
