//! Timestamp coercion
//!
//! Text is read as one of the date/time notations commonly found in
//! spreadsheet and JSON exports; values without an offset are taken as
//! UTC. JSON numbers are milliseconds since the Unix epoch. The canonical
//! form is RFC 3339 in UTC with millisecond precision, e.g.
//! `2020-01-01T00:00:00.000Z`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde_json::Value;

use super::errors::{CoercionError, CoercionResult};
use crate::guard::json_type_name;

/// Epoch offsets beyond this many milliseconds are not valid instants
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

/// Date-time notations carrying an explicit offset
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%:z",
];

/// Date-time notations read as UTC
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only notations, read as UTC midnight
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Converts a row value to its canonical ISO-8601 string.
pub fn to_timestamp(value: &Value) -> CoercionResult<Value> {
    parse_instant(value).map(|dt| Value::String(canonical(&dt)))
}

/// Interprets a row value as an instant.
pub fn parse_instant(value: &Value) -> CoercionResult<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            parse_date_str(s).ok_or_else(|| CoercionError::InvalidDate(s.clone()))
        }
        Value::Number(n) => {
            let raw = n.to_string();
            let millis = n
                .as_f64()
                .filter(|ms| ms.abs() <= MAX_EPOCH_MILLIS)
                .ok_or_else(|| CoercionError::OutOfRange(raw.clone()))?;
            // fractional milliseconds are truncated
            Utc.timestamp_millis_opt(millis.trunc() as i64)
                .single()
                .ok_or(CoercionError::OutOfRange(raw))
        }
        other => Err(CoercionError::UnsupportedValue {
            expected: "datetime",
            actual: json_type_name(other),
        }),
    }
}

/// Formats an instant in canonical form.
pub fn canonical(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_date_str(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // "Z" designator on a form rfc3339 rejects, e.g. missing seconds
    if let Some(stripped) = s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        if let Some(naive) = parse_naive_datetime(stripped) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    if let Some(naive) = parse_naive_datetime(s) {
        return Some(Utc.from_utc_datetime(&naive));
    }

    if let Some(date) = parse_naive_date(s) {
        return date.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    None
}

fn parse_naive_datetime(s: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

fn parse_naive_date(s: &str) -> Option<NaiveDate> {
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(date);
    }

    // YYYY-MM and YYYY
    let bytes = s.as_bytes();
    let all_digits = |b: &[u8]| b.iter().all(u8::is_ascii_digit);
    match bytes.len() {
        7 if bytes[4] == b'-' && all_digits(&bytes[..4]) && all_digits(&bytes[5..]) => {
            let year = s[..4].parse().ok()?;
            let month = s[5..].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, 1)
        }
        4 if all_digits(bytes) => NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1),
        _ => None,
    }
}
