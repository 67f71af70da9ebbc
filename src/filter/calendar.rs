use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::config::TimezoneSetting;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a client-supplied date string into an instant.
///
/// - RFC 3339 text carries its own offset.
/// - A bare `YYYY-MM-DD` is midnight UTC.
/// - A date-time without an offset is read as wall-clock time in `tz`.
pub fn parse_instant(value: &str, tz: &TimezoneSetting) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .and_then(|naive| tz.instant_at(naive))
}

/// First and last millisecond of the days `first..=last` in `tz`.
pub fn day_span(
    tz: &TimezoneSetting,
    first: NaiveDate,
    last: NaiveDate,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = tz.instant_at(first.and_hms_milli_opt(0, 0, 0, 0)?)?;
    let end = tz.instant_at(last.and_hms_milli_opt(23, 59, 59, 999)?)?;
    Some((start, end))
}

/// Bounds of the calendar day in `tz` that contains `instant`.
pub fn day_bounds(
    tz: &TimezoneSetting,
    instant: DateTime<Utc>,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let day = tz.wall_clock(instant).date();
    day_span(tz, day, day)
}

/// ISO 8601 text with millisecond precision and a `Z` suffix.
pub fn iso_millis(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
