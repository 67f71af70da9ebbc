use chrono::{DateTime, Utc};

use crate::config::TimezoneSetting;
use crate::error::FilterError;
use crate::filter::condition::{FilterCondition, FilterContext};
use crate::filter::fallback::DefaultCompiler;
use crate::filter::registry::{Compiled, HandlerRegistry};
use crate::filter::relative_date::expand_relative_date;

/// Compile one condition through the handler registry.
///
/// Fails with [`FilterError::UnknownColumn`] when the column is not described
/// by `context`; otherwise returns whatever the registry decides.
pub fn compile_filter_condition(
    condition: &FilterCondition,
    context: &FilterContext,
    registry: &HandlerRegistry,
) -> Result<Compiled, FilterError> {
    if context.column_for(condition).is_none() {
        return Err(FilterError::UnknownColumn(condition.column.clone()));
    }
    registry.compile(condition, context)
}

/// Compile a list of conditions into one `AND`-joined boolean expression.
///
/// Relative dates are resolved against `now` first; conditions the registry
/// does not handle go to `fallback`. An empty list yields an empty string.
pub fn build_where_clause(
    conditions: &[FilterCondition],
    context: &FilterContext,
    registry: &HandlerRegistry,
    fallback: &dyn DefaultCompiler,
    timezone: &TimezoneSetting,
    now: DateTime<Utc>,
) -> Result<String, FilterError> {
    let mut fragments = Vec::with_capacity(conditions.len());
    for condition in conditions {
        let condition = expand_relative_date(condition, context, timezone, now);
        let fragment = match compile_filter_condition(&condition, context, registry)? {
            Compiled::Fragment(sql) => sql,
            Compiled::NotHandled => fallback.compile(&condition, context)?,
        };
        fragments.push(fragment);
    }

    tracing::debug!(conditions = fragments.len(), "built where clause");
    Ok(match fragments.as_slice() {
        [] => String::new(),
        [single] => single.clone(),
        _ => fragments
            .iter()
            .map(|f| format!("({f})"))
            .collect::<Vec<_>>()
            .join(" AND "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::condition::ColumnDescriptor;
    use crate::filter::fallback::StandardCompiler;
    use serde_json::json;

    fn ctx() -> FilterContext {
        FilterContext::new(vec![
            ColumnDescriptor::new("status", "text"),
            ColumnDescriptor::new("created_at", "timestamp"),
        ])
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-13T12:00:00Z")
            .expect("valid instant")
            .with_timezone(&Utc)
    }

    #[test]
    fn unknown_columns_are_rejected_before_dispatch() {
        let registry = HandlerRegistry::with_defaults(TimezoneSetting::Utc);
        let err = compile_filter_condition(
            &FilterCondition::new("nope", "eq", json!(1)),
            &ctx(),
            &registry,
        )
        .expect_err("unknown column should fail");
        assert_eq!(err, FilterError::UnknownColumn("nope".to_string()));
    }

    #[test]
    fn empty_and_single_conditions() {
        let registry = HandlerRegistry::with_defaults(TimezoneSetting::Utc);
        let tz = TimezoneSetting::Utc;
        assert_eq!(
            build_where_clause(&[], &ctx(), &registry, &StandardCompiler, &tz, now()).as_deref(),
            Ok("")
        );
        let single = [FilterCondition::new("status", "eq", json!("open"))];
        assert_eq!(
            build_where_clause(&single, &ctx(), &registry, &StandardCompiler, &tz, now())
                .as_deref(),
            Ok(r#""status" = 'open'"#)
        );
    }

    #[test]
    fn relative_dates_reach_the_date_handler_resolved() {
        let registry = HandlerRegistry::with_defaults(TimezoneSetting::Utc);
        let tz = TimezoneSetting::Utc;
        let conditions = [
            FilterCondition::new("created_at", "eq", json!("__rel_date:yesterday")),
            FilterCondition::new("status", "in", json!(["open", "held"])),
        ];
        assert_eq!(
            build_where_clause(&conditions, &ctx(), &registry, &StandardCompiler, &tz, now())
                .as_deref(),
            Ok(concat!(
                r#"("created_at" BETWEEN '2024-03-12T00:00:00.000Z'"#,
                r#" AND '2024-03-12T23:59:59.999Z')"#,
                r#" AND ("status" IN ('open','held'))"#
            ))
        );
    }
}
