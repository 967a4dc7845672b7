//! Lenient parsing of provider-reported timestamps.
//!
//! Providers report time as RFC 3339, as a naive `YYYY-MM-DD HH:MM:SS`
//! string (assumed UTC), or as Unix seconds. Anything else is treated as
//! absent so the caller can fall back to capture time.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a timestamp string in any of the supported shapes.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    raw.parse::<i64>().ok().and_then(from_unix_seconds)
}

/// Convert Unix seconds to a UTC timestamp.
pub fn from_unix_seconds(secs: i64) -> Option<DateTime<Utc>> {
    if secs <= 0 {
        return None;
    }
    Utc.timestamp_opt(secs, 0).single()
}
