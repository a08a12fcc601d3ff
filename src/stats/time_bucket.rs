//! Timestamp parsing and day bucketing for quiz results
//!
//! Results carry their finish time as a string written by whichever build of
//! the quiz flow recorded them:
//! - RFC 3339: "2024-03-01T10:15:00.000Z", "2024-03-01T10:15:00+02:00"
//! - Naive datetime: "2024-03-01T10:15:00", "2024-03-01 10:15:00.250"
//! - Bare day: "2024-03-01"
//!
//! Naive forms are read as UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a stored timestamp string, keeping the offset it was written with.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Calendar day of a stored timestamp; time of day is discarded.
pub fn calendar_day(raw: &str) -> Option<NaiveDate> {
    parse_timestamp(raw).map(|dt| dt.date_naive())
}

/// Compute the day bucket string ("YYYY-MM-DD") for a stored timestamp.
pub fn day_bucket(raw: &str) -> Option<String> {
    calendar_day(raw).map(|day| day.format("%Y-%m-%d").to_string())
}
