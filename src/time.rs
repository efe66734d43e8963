//! Local-time parsing and calendar arithmetic.

use chrono::{
    DateTime, Datelike, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Weekday,
};

use crate::errors::{Result, StrandError};

/// Default layout for second-resolution timestamps.
pub const DEFAULT_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";
/// Date-only layout.
pub const DAY_LAYOUT: &str = "%Y-%m-%d";

/// Parse `value` in the local timezone. An empty `layout` selects
/// [`DEFAULT_LAYOUT`]. Date-only layouts resolve to midnight.
pub fn parse(value: &str, layout: &str) -> Result<DateTime<Local>> {
    let layout = if layout.is_empty() {
        DEFAULT_LAYOUT
    } else {
        layout
    };
    let naive = NaiveDateTime::parse_from_str(value, layout)
        .or_else(|_| NaiveDate::parse_from_str(value, layout).map(|d| d.and_time(NaiveTime::MIN)))?;
    match naive.and_local_timezone(Local) {
        LocalResult::Single(parsed) => Ok(parsed),
        // DST edge: the wall-clock time is ambiguous or skipped.
        _ => Err(StrandError::parse(format!(
            "local time {value:?} is ambiguous or does not exist"
        ))),
    }
}

/// Midnight of the given instant's local calendar day.
pub fn day_start(t: DateTime<Local>) -> DateTime<Local> {
    at_midnight(t.date_naive())
}

/// Whole calendar days between two instants in local time. Zero for the same
/// day, positive when `t1` is later.
pub fn diff_days(t1: DateTime<Local>, t2: DateTime<Local>) -> i64 {
    (t1.date_naive() - t2.date_naive()).num_days()
}

/// [`diff_days`] over unix timestamps.
pub fn diff_days_ts(t1: i64, t2: i64) -> Result<i64> {
    Ok(diff_days(from_timestamp(t1)?, from_timestamp(t2)?))
}

/// Midnight of the first day of the instant's month.
pub fn month_first_day(t: DateTime<Local>) -> DateTime<Local> {
    let date = t.date_naive();
    // Day 1 always exists.
    at_midnight(date.with_day(1).unwrap_or(date))
}

/// Midnight of the Monday that starts the instant's week.
pub fn monday_of_week(t: DateTime<Local>) -> DateTime<Local> {
    let back = i64::from(t.date_naive().weekday().num_days_from_monday());
    at_midnight(t.date_naive() - Duration::days(back))
}

pub fn is_weekend(t: DateTime<Local>) -> bool {
    matches!(t.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn is_same_week(t1: DateTime<Local>, t2: DateTime<Local>) -> bool {
    monday_of_week(t1).date_naive() == monday_of_week(t2).date_naive()
}

pub fn is_same_day(t1: DateTime<Local>, t2: DateTime<Local>) -> bool {
    t1.date_naive() == t2.date_naive()
}

fn from_timestamp(ts: i64) -> Result<DateTime<Local>> {
    DateTime::from_timestamp(ts, 0)
        .map(|utc| utc.with_timezone(&Local))
        .ok_or_else(|| StrandError::parse(format!("timestamp {ts} out of range")))
}

fn at_midnight(date: NaiveDate) -> DateTime<Local> {
    let naive = date.and_time(NaiveTime::MIN);
    match naive.and_local_timezone(Local) {
        LocalResult::Single(t) => t,
        LocalResult::Ambiguous(earliest, _) => earliest,
        // Some timezones skip midnight on DST transitions.
        LocalResult::None => Local.from_utc_datetime(&naive),
    }
}
