use super::FilterHandler;
use crate::error::FilterError;
use crate::filter::condition::{FilterCondition, FilterContext};
use crate::filter::operators::ArrayOperator;
use crate::sql::literal::encode_literal;
use crate::sql::names::quote_identifier;

/// Handles array set operators. The column type is not checked; callers only
/// offer these operators for array columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayHandler;

impl FilterHandler for ArrayHandler {
    fn name(&self) -> &'static str {
        "array"
    }

    fn can_handle(&self, condition: &FilterCondition, _context: &FilterContext) -> bool {
        ArrayOperator::parse(&condition.operator).is_some()
    }

    fn process(
        &self,
        condition: &FilterCondition,
        _context: &FilterContext,
    ) -> Result<Option<String>, FilterError> {
        let operator = ArrayOperator::parse(&condition.operator).ok_or_else(|| {
            FilterError::UnsupportedArrayOperator(condition.operator.clone())
        })?;
        Ok(Some(format!(
            "{} {} {}",
            quote_identifier(&condition.column),
            operator.sql_operator(),
            encode_literal(&condition.value)
        )))
    }
}
