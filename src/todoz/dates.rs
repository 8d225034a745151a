//! Calendar cutoffs used by the due-date listings, and due-date parsing for
//! front ends. Cutoffs are computed in the caller's time zone and returned in
//! UTC, which is how todos store their timestamps.

use crate::error::{Result, TodosError};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Last representable instant of `now`'s calendar day, in `now`'s zone.
pub fn end_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    last_instant_of(now.timezone(), now.date_naive())
}

/// Last instant of the day `7 - weekday` days after today, counting Sunday
/// as 0. On a Sunday that is the following Sunday.
pub fn end_of_week<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let today = now.date_naive();
    let days_ahead = 7 - i64::from(today.weekday().num_days_from_sunday());
    last_instant_of(now.timezone(), today + Duration::days(days_ahead))
}

fn last_instant_of<Tz: TimeZone>(tz: Tz, day: NaiveDate) -> DateTime<Utc> {
    let naive: NaiveDateTime = day
        .and_hms_nano_opt(23, 59, 59, 999_999_999)
        .unwrap_or_else(|| day.and_time(chrono::NaiveTime::MIN));
    // A DST transition can make the local time ambiguous or skip it entirely.
    match tz.from_local_datetime(&naive).latest() {
        Some(local) => local.with_timezone(&Utc),
        None => naive.and_utc(),
    }
}

/// Parses a due date given on the command line or through the API.
///
/// Accepts RFC 3339 (`2024-12-31T17:00:00+02:00`) or a bare calendar date
/// (`2024-12-31`), which means midnight UTC of that date.
pub fn parse_due(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    Err(TodosError::Api(format!(
        "Invalid date: {} (expected YYYY-MM-DD or an RFC 3339 timestamp)",
        text
    )))
}
