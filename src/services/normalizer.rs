//! Tolerant decoding of detail-table fields.
//!
//! The detail table was exported from a dataframe whose list columns were
//! stringified, so a genre list may arrive as a real JSON array, as
//! `"['Action', 'Adventure']"`, or as garbage. None of these functions fail:
//! anything undecodable becomes an empty list or the caller's default.

use serde_json::Value;

/// Decodes a list-valued field into a sequence of strings.
///
/// Strategies, in order: structured array passthrough, strict decode of the
/// text with single quotes swapped for double quotes, relaxed decode of a
/// Python-style list literal, and finally an empty list.
pub fn parse_list_field(raw: Option<&Value>) -> Vec<String> {
    match raw {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(Value::String(text)) => decode_strict(text)
            .or_else(|| decode_relaxed(text))
            .unwrap_or_default(),
        Some(_) => Vec::new(),
    }
}

/// Coerces a numeric field; null, NaN and anything unparseable become `0.0`
pub fn coerce_float(raw: Option<&Value>) -> f64 {
    let value = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Coerces a text field, substituting `default` for null or NaN markers
pub fn coerce_string(raw: Option<&Value>, default: &str) -> String {
    coerce_optional_string(raw).unwrap_or_else(|| default.to_string())
}

/// Like [`coerce_string`] but keeps absence visible
pub fn coerce_optional_string(raw: Option<&Value>) -> Option<String> {
    match raw {
        Some(Value::String(s)) if is_nan_marker(s) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    }
}

fn is_nan_marker(s: &str) -> bool {
    s.eq_ignore_ascii_case("nan")
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn decode_strict(text: &str) -> Option<Vec<String>> {
    // An escaped quote would turn into a JSON escape and silently change the value
    if text.contains("\\'") {
        return None;
    }
    let normalized = text.replace('\'', "\"");
    let items: Vec<Value> = serde_json::from_str(&normalized).ok()?;
    Some(items.iter().filter_map(scalar_to_string).collect())
}

/// Scans a Python-style list literal: `['a', "b's", 3, ]`.
///
/// Accepts either quote style with backslash escapes, bare scalar tokens and a
/// trailing comma. Returns `None` on anything else.
fn decode_relaxed(text: &str) -> Option<Vec<String>> {
    let mut chars = text.trim().chars().peekable();
    if chars.next()? != '[' {
        return None;
    }

    let mut items = Vec::new();
    loop {
        skip_whitespace(&mut chars);
        match chars.peek().copied()? {
            ']' => {
                chars.next();
                break;
            }
            '\'' | '"' => {
                let quote = chars.next()?;
                items.push(read_quoted(&mut chars, quote)?);
            }
            _ => {
                let token = read_bare(&mut chars);
                if token.is_empty() {
                    return None;
                }
                if token != "None" {
                    items.push(token);
                }
            }
        }

        skip_whitespace(&mut chars);
        match chars.next()? {
            ',' => continue,
            ']' => break,
            _ => return None,
        }
    }

    // Nothing may follow the closing bracket
    if chars.next().is_some() {
        return None;
    }
    Some(items)
}

type Chars<'a> = std::iter::Peekable<std::str::Chars<'a>>;

fn skip_whitespace(chars: &mut Chars<'_>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

fn read_quoted(chars: &mut Chars<'_>, quote: char) -> Option<String> {
    let mut out = String::new();
    loop {
        match chars.next()? {
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                other => out.push(other),
            },
            c if c == quote => return Some(out),
            c => out.push(c),
        }
    }
}

fn read_bare(chars: &mut Chars<'_>) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if c == ',' || c == ']' || c == '\'' || c == '"' {
            break;
        }
        out.push(c);
        chars.next();
    }
    out.trim_end().to_string()
}
