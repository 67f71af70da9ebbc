use serde_json::Value;

/// Render a string as a single-quoted SQL literal.
///
/// Every `'` is doubled. This is the only escaping applied, so callers must
/// target a dialect with standard-conforming strings (the `PostgreSQL` default).
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

/// Render an arbitrary JSON value as a literal SQL token.
///
/// - `null` becomes the bare keyword `NULL`
/// - strings are quoted with [`quote_string`]
/// - numbers and booleans are written unquoted
/// - arrays become a parenthesized, comma-joined list of their encoded items,
///   usable in `IN (...)` position
/// - objects are serialized to JSON text and then quoted, leaving the cast to
///   the surrounding fragment
///
/// Every operator handler goes through this function; none of them escape
/// values on their own.
pub fn encode_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => quote_string(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(encode_literal).collect();
            format!("({})", parts.join(","))
        }
        Value::Object(_) => quote_string(&value.to_string()),
    }
}

/// Inverse of [`quote_string`] for a single literal token.
///
/// Returns `None` when `literal` is not one well-formed quoted string. Only
/// used to check that encoding is lossless.
pub fn unquote_string(literal: &str) -> Option<String> {
    let inner = literal.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\'' {
            // A quote inside the literal must be the first half of a doubled pair.
            if chars.next() != Some('\'') {
                return None;
            }
        }
        out.push(ch);
    }
    Some(out)
}
