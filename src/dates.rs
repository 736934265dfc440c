//! Date Utilities
//!
//! Parsing of backend timestamps and human-readable task dates.

use std::fmt::Display;

use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone, Timelike, Utc};

/// Naive layouts the backend has been seen to emit; interpreted as UTC
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a server timestamp into local time.
///
/// Offset-carrying RFC 3339 strings are converted directly; strings without an
/// offset are read as UTC, which is what the backend stores.
pub fn parse_task_date(raw: &str) -> Result<DateTime<Local>, chrono::ParseError> {
    let raw = raw.trim();
    match DateTime::parse_from_rfc3339(raw) {
        Ok(date) => Ok(date.with_timezone(&Local)),
        Err(rfc_err) => NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(&Local))
            .ok_or(rfc_err),
    }
}

/// Format `date` relative to `now`:
/// - same calendar day: "today at 14:05"
/// - previous calendar day: "yesterday at 14:05"
/// - otherwise: "Monday 21st July at 18:00"
pub fn format_task_date<Tz>(date: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let day = date.date_naive();
    let today = now.date_naive();
    let time = date.format("%H:%M");

    if day == today {
        format!("today at {}", time)
    } else if today.pred_opt() == Some(day) {
        format!("yesterday at {}", time)
    } else {
        format!(
            "{} {}{} {} at {}",
            date.format("%A"),
            date.day(),
            ordinal_suffix(date.day()),
            date.format("%B"),
            time
        )
    }
}

/// Milliseconds from `now` to the start of the next wall-clock minute, so
/// relative labels tick over exactly on HH:mm boundaries
pub fn millis_until_next_minute<Tz: TimeZone>(now: &DateTime<Tz>) -> u32 {
    // Leap seconds report nanos >= 1e9
    let into_minute = now.second() * 1_000 + (now.nanosecond() / 1_000_000).min(999);
    60_000 - into_minute
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
