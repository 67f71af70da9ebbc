use serde_json::Value;

use super::FilterHandler;
use crate::error::FilterError;
use crate::filter::condition::{FilterCondition, FilterContext};
use crate::filter::operators::RangeOperator;
use crate::sql::literal::encode_literal;
use crate::sql::names::quote_identifier;

/// Handles `between`/`notBetween` whose value is one `"low,high"` string.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommaRangeHandler;

impl FilterHandler for CommaRangeHandler {
    fn name(&self) -> &'static str {
        "comma_range"
    }

    fn can_handle(&self, condition: &FilterCondition, _context: &FilterContext) -> bool {
        RangeOperator::parse(&condition.operator).is_some()
            && condition.value_str().is_some_and(|s| s.contains(','))
    }

    fn process(
        &self,
        condition: &FilterCondition,
        _context: &FilterContext,
    ) -> Result<Option<String>, FilterError> {
        let (Some(operator), Some(raw)) = (
            RangeOperator::parse(&condition.operator),
            condition.value_str(),
        ) else {
            return Ok(None);
        };
        let malformed = || FilterError::MalformedRange {
            column: condition.column.clone(),
            value: raw.to_string(),
        };

        let (low, high) = raw.split_once(',').ok_or_else(malformed)?;
        let (low, high) = (low.trim(), high.trim());
        if low.is_empty() || high.is_empty() {
            return Err(malformed());
        }

        Ok(Some(format!(
            "{} {operator} {} AND {}",
            quote_identifier(&condition.column),
            encode_literal(&Value::String(low.to_string())),
            encode_literal(&Value::String(high.to_string())),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(operator: &str, value: Value) -> Result<Option<String>, FilterError> {
        CommaRangeHandler.process(
            &FilterCondition::new("price", operator, value),
            &FilterContext::default(),
        )
    }

    #[test]
    fn claims_only_comma_strings_for_range_operators() {
        let ctx = FilterContext::default();
        let claims = |op: &str, value: Value| {
            CommaRangeHandler.can_handle(&FilterCondition::new("price", op, value), &ctx)
        };
        assert!(claims("between", json!("1,2")));
        assert!(claims("notBetween", json!("a,")));
        assert!(!claims("between", json!("12")));
        assert!(!claims("between", json!(["1", "2"])));
        assert!(!claims("eq", json!("1,2")));
    }

    #[test]
    fn splits_on_first_comma_and_trims() {
        assert_eq!(
            render("between", json!("10, 20")).expect("range should render"),
            Some(r#""price" BETWEEN '10' AND '20'"#.to_string())
        );
        assert_eq!(
            render("notBetween", json!(" a , b,c ")).expect("range should render"),
            Some(r#""price" NOT BETWEEN 'a' AND 'b,c'"#.to_string())
        );
    }

    #[test]
    fn bounds_are_escaped_independently() {
        assert_eq!(
            render("between", json!("o'a,o'z")).expect("range should render"),
            Some(r#""price" BETWEEN 'o''a' AND 'o''z'"#.to_string())
        );
    }

    #[test]
    fn empty_side_is_a_user_error() {
        for value in ["a,", ",b", " , "] {
            let err = render("notBetween", json!(value)).expect_err("empty bound should fail");
            assert!(matches!(err, FilterError::MalformedRange { .. }));
            assert!(err.is_user_error());
        }
    }
}
