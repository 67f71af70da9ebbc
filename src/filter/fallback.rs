use serde_json::Value;

use crate::error::FilterError;
use crate::filter::condition::{FilterCondition, FilterContext};
use crate::filter::operators::StandardOperator;
use crate::sql::literal::{encode_literal, quote_string};
use crate::sql::names::quote_identifier;

/// Compiles conditions that no registered handler rendered.
pub trait DefaultCompiler {
    /// Render `condition` as a SQL boolean fragment.
    fn compile(
        &self,
        condition: &FilterCondition,
        context: &FilterContext,
    ) -> Result<String, FilterError>;
}

/// Comparison, membership, pattern and null checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCompiler;

impl DefaultCompiler for StandardCompiler {
    fn compile(
        &self,
        condition: &FilterCondition,
        _context: &FilterContext,
    ) -> Result<String, FilterError> {
        let operator = StandardOperator::parse(&condition.operator)
            .ok_or_else(|| FilterError::UnsupportedOperator(condition.operator.clone()))?;
        let column = quote_identifier(&condition.column);
        let value = &condition.value;
        let invalid = |reason: &str| FilterError::InvalidValue {
            column: condition.column.clone(),
            operator: condition.operator.clone(),
            reason: reason.to_string(),
        };

        let sql = match operator {
            StandardOperator::Eq if value.is_null() => format!("{column} IS NULL"),
            StandardOperator::Eq => format!("{column} = {}", encode_literal(value)),
            StandardOperator::Neq if value.is_null() => format!("{column} IS NOT NULL"),
            StandardOperator::Neq => format!("{column} <> {}", encode_literal(value)),
            StandardOperator::Lt
            | StandardOperator::Lte
            | StandardOperator::Gt
            | StandardOperator::Gte => {
                if !is_scalar(value) {
                    return Err(invalid("comparison needs a non-null scalar"));
                }
                let symbol = match operator {
                    StandardOperator::Lt => "<",
                    StandardOperator::Lte => "<=",
                    StandardOperator::Gt => ">",
                    _ => ">=",
                };
                format!("{column} {symbol} {}", encode_literal(value))
            }
            StandardOperator::In | StandardOperator::NotIn => {
                let negate = operator == StandardOperator::NotIn;
                match value {
                    Value::Array(items) if items.is_empty() => {
                        (if negate { "TRUE" } else { "FALSE" }).to_string()
                    }
                    Value::Array(_) => {
                        let keyword = if negate { "NOT IN" } else { "IN" };
                        format!("{column} {keyword} {}", encode_literal(value))
                    }
                    Value::Null => return Err(invalid("membership needs a list")),
                    scalar => {
                        let keyword = if negate { "NOT IN" } else { "IN" };
                        format!("{column} {keyword} ({})", encode_literal(scalar))
                    }
                }
            }
            StandardOperator::Contains
            | StandardOperator::StartsWith
            | StandardOperator::EndsWith => {
                let text = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    _ => return Err(invalid("pattern match needs text")),
                };
                let escaped = escape_like(&text);
                let pattern = match operator {
                    StandardOperator::Contains => format!("%{escaped}%"),
                    StandardOperator::StartsWith => format!("{escaped}%"),
                    _ => format!("%{escaped}"),
                };
                format!("{column}::text ILIKE {}", quote_string(&pattern))
            }
            StandardOperator::IsNull => format!("{column} IS NULL"),
            StandardOperator::NotNull => format!("{column} IS NOT NULL"),
            StandardOperator::Range(range) => match value.as_array().map(Vec::as_slice) {
                Some([low, high]) => format!(
                    "{column} {range} {} AND {}",
                    encode_literal(low),
                    encode_literal(high)
                ),
                _ => return Err(invalid("range needs exactly two bounds")),
            },
        };
        Ok(sql)
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// Escape `LIKE` metacharacters so user text matches literally.
fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
