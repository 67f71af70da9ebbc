use serde_json::Value;

use super::FilterHandler;
use crate::error::FilterError;
use crate::filter::condition::{FilterCondition, FilterContext};
use crate::filter::operators::JsonOperator;
use crate::sql::literal::{encode_literal, quote_string};
use crate::sql::names::quote_identifier;

/// Handles JSON operators on `json`/`jsonb` columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonHandler;

impl FilterHandler for JsonHandler {
    fn name(&self) -> &'static str {
        "json"
    }

    fn can_handle(&self, condition: &FilterCondition, context: &FilterContext) -> bool {
        JsonOperator::parse(&condition.operator).is_some()
            && context
                .column_for(condition)
                .is_some_and(|column| column.is_json())
    }

    fn process(
        &self,
        condition: &FilterCondition,
        _context: &FilterContext,
    ) -> Result<Option<String>, FilterError> {
        let column = quote_identifier(&condition.column);
        let Some(operator) = JsonOperator::parse(&condition.operator) else {
            return Err(FilterError::UnsupportedJsonOperator(
                condition.operator.clone(),
            ));
        };

        let fragment = match operator {
            JsonOperator::ContainsText => {
                format!("{column}::text ILIKE {}", encode_literal(&condition.value))
            }
            JsonOperator::HasKey => format!("{column} ? {}", encode_literal(&condition.value)),
            JsonOperator::KeyEquals => key_equals(&column, condition)?,
            JsonOperator::PathExists => {
                format!("{column} #> {} IS NOT NULL", encode_literal(&condition.value))
            }
        };
        Ok(Some(fragment))
    }
}

/// `"key:val"` → containment check(s) against a one-key JSON object.
///
/// `true`/`false` may be stored either as JSON strings or JSON booleans, so
/// those two values match both representations.
fn key_equals(column: &str, condition: &FilterCondition) -> Result<String, FilterError> {
    let raw = match &condition.value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let Some((key, val)) = raw.split_once(':') else {
        return Err(FilterError::InvalidValue {
            column: condition.column.clone(),
            operator: condition.operator.clone(),
            reason: format!("expected 'key:value', got '{raw}'"),
        });
    };
    let key = key.trim();
    let val = val.trim();

    let as_string = containment_literal(key, Value::String(val.to_string()));
    match val {
        "true" | "false" => {
            let as_bool = containment_literal(key, Value::Bool(val == "true"));
            Ok(format!(
                "({column} @> {as_string} OR {column} @> {as_bool})"
            ))
        }
        _ => Ok(format!("{column} @> {as_string}")),
    }
}

fn containment_literal(key: &str, value: Value) -> String {
    let object = format!("{{{}: {}}}", Value::String(key.to_string()), value);
    quote_string(&object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::condition::ColumnDescriptor;
    use serde_json::json;

    fn ctx() -> FilterContext {
        FilterContext::new(vec![
            ColumnDescriptor::new("meta", "jsonb"),
            ColumnDescriptor::new("title", "text"),
        ])
    }

    fn render(operator: &str, value: Value) -> String {
        let cond = FilterCondition::new("meta", operator, value);
        JsonHandler
            .process(&cond, &ctx())
            .expect("json operator should render")
            .expect("json handler never declines")
    }

    #[test]
    fn claims_only_json_operators_on_json_columns() {
        let ctx = ctx();
        assert!(JsonHandler.can_handle(&FilterCondition::new("meta", "hasKey", json!("a")), &ctx));
        assert!(
            !JsonHandler.can_handle(&FilterCondition::new("title", "hasKey", json!("a")), &ctx)
        );
        assert!(!JsonHandler.can_handle(&FilterCondition::new("meta", "eq", json!("a")), &ctx));
        assert!(
            !JsonHandler.can_handle(&FilterCondition::new("missing", "hasKey", json!("a")), &ctx)
        );
    }

    #[test]
    fn renders_key_path_and_text_operators() {
        assert_eq!(render("hasKey", json!("tags")), r#""meta" ? 'tags'"#);
        assert_eq!(
            render("pathExists", json!("{address,city}")),
            r#""meta" #> '{address,city}' IS NOT NULL"#
        );
        assert_eq!(
            render("containsText", json!("%o'neil%")),
            r#""meta"::text ILIKE '%o''neil%'"#
        );
    }

    #[test]
    fn key_equals_boolean_matches_both_representations() {
        assert_eq!(
            render("keyEquals", json!("active:true")),
            r#"("meta" @> '{"active": "true"}' OR "meta" @> '{"active": true}')"#
        );
        assert_eq!(
            render("keyEquals", json!("active: false ")),
            r#"("meta" @> '{"active": "false"}' OR "meta" @> '{"active": false}')"#
        );
    }

    #[test]
    fn key_equals_plain_value_uses_single_containment() {
        assert_eq!(
            render("keyEquals", json!("status:open")),
            r#""meta" @> '{"status": "open"}'"#
        );
        // Only the first colon separates key from value.
        assert_eq!(
            render("keyEquals", json!("url:http://x")),
            r#""meta" @> '{"url": "http://x"}'"#
        );
        assert_eq!(
            render("keyEquals", json!("name:it's")),
            r#""meta" @> '{"name": "it''s"}'"#
        );
    }

    #[test]
    fn key_equals_without_separator_is_a_user_error() {
        let cond = FilterCondition::new("meta", "keyEquals", json!("status"));
        let err = JsonHandler
            .process(&cond, &ctx())
            .expect_err("missing colon should fail");
        assert!(err.is_user_error());
    }

    #[test]
    fn unknown_operator_is_an_internal_error() {
        let cond = FilterCondition::new("meta", "overlaps", json!(["a"]));
        let err = JsonHandler
            .process(&cond, &ctx())
            .expect_err("unknown operator should fail");
        assert_eq!(err, FilterError::UnsupportedJsonOperator("overlaps".to_string()));
        assert!(err.to_string().contains("Unsupported JSON operator"));
        assert!(!err.is_user_error());
    }
}
