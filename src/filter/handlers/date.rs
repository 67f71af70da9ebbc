use serde_json::Value;

use super::FilterHandler;
use crate::config::TimezoneSetting;
use crate::error::FilterError;
use crate::filter::calendar::{day_bounds, iso_millis, parse_instant};
use crate::filter::condition::{FilterCondition, FilterContext};
use crate::filter::operators::RangeOperator;
use crate::sql::literal::{encode_literal, quote_string};
use crate::sql::names::quote_identifier;

/// Date handling the fallback compiler lacks, on `date`/`timestamp` columns:
///
/// - `eq` with a plain date string matches the whole calendar day
/// - `eq` with a resolved `[start, end]` pair matches that span
/// - `between`/`notBetween` with a list value
///
/// Relative-date sentinels are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateHandler {
    timezone: TimezoneSetting,
}

impl DateHandler {
    /// Handler whose calendar days are taken in `timezone`.
    pub fn new(timezone: TimezoneSetting) -> Self {
        Self { timezone }
    }
}

impl FilterHandler for DateHandler {
    fn name(&self) -> &'static str {
        "date"
    }

    fn can_handle(&self, condition: &FilterCondition, context: &FilterContext) -> bool {
        if !context
            .column_for(condition)
            .is_some_and(|column| column.is_date_like())
        {
            return false;
        }
        match (condition.operator.as_str(), &condition.value) {
            ("eq", Value::String(_)) => !condition.has_relative_date_value(),
            ("eq", Value::Array(items)) => items.len() == 2,
            (op, Value::Array(_)) => RangeOperator::parse(op).is_some(),
            _ => false,
        }
    }

    fn process(
        &self,
        condition: &FilterCondition,
        _context: &FilterContext,
    ) -> Result<Option<String>, FilterError> {
        let column = quote_identifier(&condition.column);

        let (keyword, low, high) = match (condition.operator.as_str(), &condition.value) {
            ("eq", Value::String(raw)) => {
                let Some((start, end)) =
                    parse_instant(raw, &self.timezone).and_then(|i| day_bounds(&self.timezone, i))
                else {
                    tracing::trace!(column = %condition.column, "unparseable date, deferring");
                    return Ok(None);
                };
                (
                    RangeOperator::Between,
                    quote_string(&iso_millis(start)),
                    quote_string(&iso_millis(end)),
                )
            }
            ("eq", Value::Array(items)) if items.len() == 2 => (
                RangeOperator::Between,
                encode_literal(&items[0]),
                encode_literal(&items[1]),
            ),
            (op, Value::Array(items)) => match (RangeOperator::parse(op), items.as_slice()) {
                (Some(range), [low, high]) => (range, encode_literal(low), encode_literal(high)),
                _ => return Ok(None),
            },
            _ => return Ok(None),
        };

        Ok(Some(format!("{column} {keyword} {low} AND {high}")))
    }
}
