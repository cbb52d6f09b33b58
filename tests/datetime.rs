use chrono::{NaiveDate, NaiveTime, Timelike};
use routinely::utils::datetime::*;

#[test]
fn test_date_key_round_trip() {
    let date = NaiveDate::from_ymd_opt(2026, 2, 9).unwrap();
    assert_eq!(date_key(date), "2026-02-09");
    assert_eq!(parse_date_key("2026-02-09").unwrap(), date);
    assert!(parse_date_key("2026-13-01").is_err());
    assert!(parse_date_key("yesterday").is_err());
}

#[test]
fn test_parse_reminder_time_is_strict() {
    assert_eq!(parse_reminder_time("07:05"), NaiveTime::from_hms_opt(7, 5, 0));
    assert_eq!(parse_reminder_time(" 23:59 "), NaiveTime::from_hms_opt(23, 59, 0));
    assert_eq!(parse_reminder_time("7:05"), None);
    assert_eq!(parse_reminder_time("07:05:00"), None);
    assert_eq!(parse_reminder_time("24:00"), None);
    assert_eq!(parse_reminder_time("12:60"), None);
    assert_eq!(parse_reminder_time("ab:cd"), None);
}

#[test]
fn test_format_reminder_time_pads() {
    let time = NaiveTime::from_hms_opt(6, 3, 0).unwrap();
    assert_eq!(format_reminder_time(time), "06:03");
}

#[test]
fn test_local_instant_keeps_wall_clock() {
    let date = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
    let time = NaiveTime::from_hms_opt(7, 30, 0).unwrap();
    let instant = local_instant(date, time).unwrap();
    assert_eq!(instant.date_naive(), date);
    assert_eq!((instant.hour(), instant.minute()), (7, 30));
}

#[test]
fn test_history_and_heading_formats() {
    let date = NaiveDate::from_ymd_opt(2026, 2, 19).unwrap();
    assert_eq!(format_history_date(date), "Feb 19, 2026");
    assert_eq!(format_day_heading(date), "Thursday, February 19");
}
