/// Wrap an identifier in double quotes, doubling any embedded `"`.
///
/// Identifiers are never bound as parameters, so column names passed here
/// must come from trusted column metadata.
pub fn quote_identifier(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Normalize a declared column type for comparison.
///
/// Trims whitespace, lowercases, and collapses internal runs of whitespace so
/// `"TIMESTAMP  WITH TIME ZONE"` compares equal to `"timestamp with time zone"`.
pub fn normalize_data_type(data_type: &str) -> String {
    data_type
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when `name` is a plain lower-case identifier (`[a-z_][a-z0-9_]*`)
/// that can be spliced into SQL text without quoting.
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_lowercase() || first == '_')
        && chars.all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_')
        && name.len() <= 63
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_identifier_wraps_and_escapes() {
        assert_eq!(quote_identifier("created_at"), r#""created_at""#);
        assert_eq!(quote_identifier("Mixed Case"), r#""Mixed Case""#);
        assert_eq!(quote_identifier(r#"a"b"#), r#""a""b""#);
    }

    #[test]
    fn normalize_data_type_lowercases_and_collapses_spaces() {
        assert_eq!(
            normalize_data_type("  TIMESTAMP   WITH TIME ZONE "),
            "timestamp with time zone"
        );
        assert_eq!(normalize_data_type("JSONB"), "jsonb");
    }

    #[test]
    fn plain_identifier_accepts_schema_names_only() {
        assert!(is_plain_identifier("supamode"));
        assert!(is_plain_identifier("_admin_2"));
        assert!(!is_plain_identifier(""));
        assert!(!is_plain_identifier("2fast"));
        assert!(!is_plain_identifier("Admin"));
        assert!(!is_plain_identifier("a; drop"));
        assert!(!is_plain_identifier(&"x".repeat(64)));
    }
}
