use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PermissionError;

/// Type tag carried on each batched result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    /// Authorization predicate.
    Boolean,
    /// Text lookup.
    String,
    /// Numeric lookup.
    Number,
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultType::Boolean => write!(f, "boolean"),
            ResultType::String => write!(f, "string"),
            ResultType::Number => write!(f, "number"),
        }
    }
}

/// One raw row returned by a batched permission query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionRow {
    /// Correlation key of the originating check.
    pub key: String,
    /// How `result` should be decoded.
    #[serde(rename = "type")]
    pub result_type: ResultType,
    /// Raw value as returned by the driver.
    #[serde(default)]
    pub result: Value,
}

/// A decoded result value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PermissionValue {
    /// Predicate outcome.
    Boolean(bool),
    /// Text lookup.
    String(String),
    /// Numeric lookup.
    Number(f64),
}

impl PermissionValue {
    /// The boolean, if this is a predicate outcome.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PermissionValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The text, if this is a text lookup.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PermissionValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The number, if this is a numeric lookup.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PermissionValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Decoded batch results keyed by correlation key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PermissionResults {
    values: BTreeMap<String, PermissionValue>,
}

impl PermissionResults {
    /// Value decoded for `key`.
    pub fn get(&self, key: &str) -> Option<&PermissionValue> {
        self.values.get(key)
    }

    /// True only when `key` decoded to boolean `true`. Missing keys deny.
    pub fn allowed(&self, key: &str) -> bool {
        self.get(key).and_then(PermissionValue::as_bool) == Some(true)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no rows were decoded.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PermissionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Decode rows into a key → value map, coercing each `result` by its type tag.
///
/// Rows are applied in order, so a repeated key keeps the last row's value.
pub fn parse_results(rows: &[PermissionRow]) -> PermissionResults {
    let mut values = BTreeMap::new();
    for row in rows {
        let value = match row.result_type {
            ResultType::Boolean => PermissionValue::Boolean(coerce_bool(&row.result)),
            ResultType::String => PermissionValue::String(coerce_string(&row.result)),
            ResultType::Number => PermissionValue::Number(coerce_number(&row.result)),
        };
        values.insert(row.key.clone(), value);
    }
    PermissionResults { values }
}

/// Decode a JSON array of rows.
pub fn parse_results_json(json: &str) -> Result<PermissionResults, PermissionError> {
    let rows: Vec<PermissionRow> =
        serde_json::from_str(json).map_err(|e| PermissionError::InvalidRow(e.to_string()))?;
    Ok(parse_results(&rows))
}

fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn coerce_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}
