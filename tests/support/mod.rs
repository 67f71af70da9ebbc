#![allow(dead_code)]

use serde_json::Value;
use sqlgate::config::TimezoneSetting;
use sqlgate::filter::{ColumnDescriptor, Compiled, FilterCondition, FilterContext, HandlerRegistry};
use sqlparser::ast::{Expr, Statement};
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;

/// Columns covering every type family the handlers distinguish.
pub(crate) fn sample_context() -> FilterContext {
    FilterContext::new(vec![
        ColumnDescriptor::new("id", "uuid"),
        ColumnDescriptor::new("title", "text"),
        ColumnDescriptor::new("price", "numeric"),
        ColumnDescriptor::new("tags", "text[]"),
        ColumnDescriptor::new("metadata", "jsonb"),
        ColumnDescriptor::new("settings", "json"),
        ColumnDescriptor::new("published_on", "date"),
        ColumnDescriptor::new("created_at", "timestamp"),
        ColumnDescriptor::new("updated_at", "timestamp with time zone"),
    ])
}

pub(crate) fn utc_registry() -> HandlerRegistry {
    HandlerRegistry::with_defaults(TimezoneSetting::Utc)
}

pub(crate) fn compile(column: &str, operator: &str, value: Value) -> Compiled {
    let condition = FilterCondition::new(column, operator, value);
    sqlgate::filter::compile_filter_condition(&condition, &sample_context(), &utc_registry())
        .unwrap_or_else(|e| panic!("{column} {operator} should compile: {e}"))
}

pub(crate) fn fragment(column: &str, operator: &str, value: Value) -> String {
    match compile(column, operator, value) {
        Compiled::Fragment(sql) => sql,
        Compiled::NotHandled => panic!("{column} {operator} was not handled"),
    }
}

pub(crate) fn parse_expr(sql: &str) -> Expr {
    Parser::new(&PostgreSqlDialect {})
        .try_with_sql(sql)
        .unwrap_or_else(|e| panic!("tokenize failed for {sql}: {e}"))
        .parse_expr()
        .unwrap_or_else(|e| panic!("expression should parse: {sql}: {e}"))
}

pub(crate) fn parse_statements(sql: &str) -> Vec<Statement> {
    Parser::parse_sql(&PostgreSqlDialect {}, sql)
        .unwrap_or_else(|e| panic!("statement should parse: {sql}: {e}"))
}

/// Positional placeholder numbers in order of appearance.
pub(crate) fn placeholders(sql: &str) -> Vec<usize> {
    let bytes = sql.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if end > start {
                out.push(sql[start..end].parse().expect("digits parse"));
            }
            i = end.max(i + 1);
        } else {
            i += 1;
        }
    }
    out
}
