//! Date and time utility functions
//!
//! Date keys partition the daily lists and the history map, reminder times are
//! local wall-clock `HH:MM` values. Everything here works on the device's local
//! calendar, never UTC.

use chrono::{DateTime, Datelike, Local, LocalResult, NaiveDate, NaiveTime, TimeZone};

/// Date key format used by the daily and history namespaces
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Reminder time format (24-hour local time)
pub const REMINDER_TIME_FORMAT: &str = "%H:%M";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parse a date key in YYYY-MM-DD format to NaiveDate
///
/// # Arguments
/// * `date_str` - Date string in YYYY-MM-DD format
///
/// # Returns
/// * `Result<NaiveDate, chrono::ParseError>` - Parsed date or parse error
pub fn parse_date_key(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, DATE_KEY_FORMAT)
}

/// Format a NaiveDate to a YYYY-MM-DD date key
pub fn date_key(d: NaiveDate) -> String {
    d.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a strict `HH:MM` reminder time.
///
/// Only two-digit hours and minutes are accepted, so "7:00" or "07:00:00" are
/// rejected rather than silently reinterpreted.
pub fn parse_reminder_time(time_str: &str) -> Option<NaiveTime> {
    let trimmed = time_str.trim();
    let bytes = trimmed.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    NaiveTime::parse_from_str(trimmed, REMINDER_TIME_FORMAT).ok()
}

/// Format a reminder time as `HH:MM`
pub fn format_reminder_time(time: NaiveTime) -> String {
    time.format(REMINDER_TIME_FORMAT).to_string()
}

/// Resolve a local wall-clock time on a given date to an instant.
///
/// Ambiguous times (clocks falling back) resolve to the earliest instant.
/// Times that do not exist on that date (clocks springing forward) yield `None`.
pub fn local_instant(date: NaiveDate, time: NaiveTime) -> Option<DateTime<Local>> {
    match Local.from_local_datetime(&date.and_time(time)) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => None,
    }
}

/// Format a date for history display, e.g. "Feb 19, 2026"
pub fn format_history_date(date: NaiveDate) -> String {
    format!("{} {}, {}", MONTHS[date.month0() as usize], date.day(), date.year())
}

/// Format a date as the dashboard heading, e.g. "Thursday, February 19"
pub fn format_day_heading(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}
