//! Expansion of relative-date sentinels (`__rel_date:thisMonth`) into a
//! concrete `[start, end]` pair, ahead of handler dispatch.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use serde_json::Value;

use crate::config::TimezoneSetting;
use crate::filter::calendar::{day_span, iso_millis};
use crate::filter::condition::{FilterCondition, FilterContext, RELATIVE_DATE_PREFIX};

/// A named span of calendar days relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDate {
    /// The current day.
    Today,
    /// The day before today.
    Yesterday,
    /// The day after today.
    Tomorrow,
    /// Monday through Sunday of the current week.
    ThisWeek,
    /// Monday through Sunday of the previous week.
    LastWeek,
    /// The current calendar month.
    ThisMonth,
    /// The previous calendar month.
    LastMonth,
    /// The current calendar year.
    ThisYear,
    /// The previous calendar year.
    LastYear,
    /// Today and the six days before it.
    Last7Days,
    /// Today and the 29 days before it.
    Last30Days,
}

impl RelativeDate {
    /// Parse the token following [`RELATIVE_DATE_PREFIX`].
    pub fn parse(token: &str) -> Option<Self> {
        let span = match token {
            "today" => RelativeDate::Today,
            "yesterday" => RelativeDate::Yesterday,
            "tomorrow" => RelativeDate::Tomorrow,
            "thisWeek" => RelativeDate::ThisWeek,
            "lastWeek" => RelativeDate::LastWeek,
            "thisMonth" => RelativeDate::ThisMonth,
            "lastMonth" => RelativeDate::LastMonth,
            "thisYear" => RelativeDate::ThisYear,
            "lastYear" => RelativeDate::LastYear,
            "last7Days" => RelativeDate::Last7Days,
            "last30Days" => RelativeDate::Last30Days,
            _ => return None,
        };
        Some(span)
    }

    /// First and last calendar day of the span, given today's date.
    pub fn days(self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            RelativeDate::Today => Some((today, today)),
            RelativeDate::Yesterday => today.pred_opt().map(|d| (d, d)),
            RelativeDate::Tomorrow => today.succ_opt().map(|d| (d, d)),
            RelativeDate::ThisWeek => week_of(today),
            RelativeDate::LastWeek => week_of(today.checked_sub_days(Days::new(7))?),
            RelativeDate::ThisMonth => month_of(today),
            RelativeDate::LastMonth => month_of(today.checked_sub_months(Months::new(1))?),
            RelativeDate::ThisYear => year_of(today.year()),
            RelativeDate::LastYear => year_of(today.year() - 1),
            RelativeDate::Last7Days => Some((today.checked_sub_days(Days::new(6))?, today)),
            RelativeDate::Last30Days => Some((today.checked_sub_days(Days::new(29))?, today)),
        }
    }
}

fn week_of(day: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let monday =
        day.checked_sub_days(Days::new(u64::from(day.weekday().num_days_from_monday())))?;
    Some((monday, monday.checked_add_days(Days::new(6))?))
}

fn month_of(day: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = day.with_day(1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((first, last))
}

fn year_of(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

/// Replace an `eq` relative-date sentinel on a date-like column with its
/// resolved `[start, end]` instants.
///
/// Anything else, including unknown tokens, is returned unchanged.
pub fn expand_relative_date(
    condition: &FilterCondition,
    context: &FilterContext,
    tz: &TimezoneSetting,
    now: DateTime<Utc>,
) -> FilterCondition {
    let token = condition
        .value_str()
        .and_then(|s| s.strip_prefix(RELATIVE_DATE_PREFIX));
    let is_date_column = context
        .column_for(condition)
        .is_some_and(|column| column.is_date_like());

    let (Some(token), true, "eq") = (token, is_date_column, condition.operator.as_str()) else {
        return condition.clone();
    };

    let today = tz.wall_clock(now).date();
    let resolved = RelativeDate::parse(token)
        .and_then(|span| span.days(today))
        .and_then(|(first, last)| day_span(tz, first, last));

    match resolved {
        Some((start, end)) => FilterCondition {
            value: Value::Array(vec![
                Value::String(iso_millis(start)),
                Value::String(iso_millis(end)),
            ]),
            ..condition.clone()
        },
        None => {
            tracing::debug!(column = %condition.column, token, "unresolved relative date");
            condition.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::condition::ColumnDescriptor;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn spans_are_computed_from_today() {
        // A Wednesday.
        let today = date(2024, 3, 13);
        assert_eq!(RelativeDate::Today.days(today), Some((today, today)));
        assert_eq!(
            RelativeDate::Yesterday.days(today),
            Some((date(2024, 3, 12), date(2024, 3, 12)))
        );
        assert_eq!(
            RelativeDate::ThisWeek.days(today),
            Some((date(2024, 3, 11), date(2024, 3, 17)))
        );
        assert_eq!(
            RelativeDate::LastWeek.days(today),
            Some((date(2024, 3, 4), date(2024, 3, 10)))
        );
        assert_eq!(
            RelativeDate::LastMonth.days(today),
            Some((date(2024, 2, 1), date(2024, 2, 29)))
        );
        assert_eq!(
            RelativeDate::LastYear.days(today),
            Some((date(2023, 1, 1), date(2023, 12, 31)))
        );
        assert_eq!(
            RelativeDate::Last7Days.days(today),
            Some((date(2024, 3, 7), today))
        );
    }

    #[test]
    fn expands_eq_sentinels_on_date_columns_only() {
        let ctx = FilterContext::new(vec![
            ColumnDescriptor::new("created_at", "timestamp with time zone"),
            ColumnDescriptor::new("label", "text"),
        ]);
        let now = DateTime::parse_from_rfc3339("2024-03-13T12:00:00Z")
            .expect("valid instant")
            .with_timezone(&Utc);

        let cond = FilterCondition::new("created_at", "eq", json!("__rel_date:thisMonth"));
        let expanded = expand_relative_date(&cond, &ctx, &TimezoneSetting::Utc, now);
        assert_eq!(
            expanded.value,
            json!(["2024-03-01T00:00:00.000Z", "2024-03-31T23:59:59.999Z"])
        );

        let text = FilterCondition::new("label", "eq", json!("__rel_date:thisMonth"));
        assert_eq!(expand_relative_date(&text, &ctx, &TimezoneSetting::Utc, now), text);

        let unknown = FilterCondition::new("created_at", "eq", json!("__rel_date:someday"));
        assert_eq!(
            expand_relative_date(&unknown, &ctx, &TimezoneSetting::Utc, now),
            unknown
        );
    }
}
