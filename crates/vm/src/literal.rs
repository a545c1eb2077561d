//! Literal parsing for LOAD_CONST arguments.
//!
//! Forms are tried in this order: `true`/`false` (any case), `[a, b, ...]`
//! lists, `"string"`, `'c'` chars, integers, floats. Strings have no escape
//! processing. Each call builds fresh list storage.

use microvm_common::Value;

use crate::error::ErrorKind;

/// Parse a literal into a runtime value.
pub fn parse_literal(text: &str) -> Result<Value, ErrorKind> {
    let text = text.trim();

    if text.eq_ignore_ascii_case("true") {
        return Ok(Value::Bool(true));
    }
    if text.eq_ignore_ascii_case("false") {
        return Ok(Value::Bool(false));
    }

    if let Some(inner) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        return parse_list(inner);
    }

    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return Ok(Value::Str(text[1..text.len() - 1].to_string()));
    }

    if let Some(c) = char_literal(text) {
        return Ok(Value::Char(c));
    }

    if let Ok(i) = text.parse::<i64>() {
        return Ok(Value::Int(i));
    }
    if let Ok(f) = text.parse::<f64>() {
        return Ok(Value::Float(f));
    }

    Err(ErrorKind::InvalidLiteral {
        text: text.to_string(),
    })
}

fn parse_list(inner: &str) -> Result<Value, ErrorKind> {
    if inner.trim().is_empty() {
        return Ok(Value::list(Vec::new()));
    }
    let items = split_elements(inner)
        .into_iter()
        .map(parse_literal)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::list(items))
}

/// `'x'` with exactly one character between the quotes.
fn char_literal(text: &str) -> Option<char> {
    let inner = text.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut chars = inner.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Split on commas that sit outside nested brackets and quotes.
fn split_elements(inner: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in inner.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&inner[start..]);
    parts
}
