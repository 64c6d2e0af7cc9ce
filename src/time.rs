//! Entry-date parsing.
//!
//! Recency decisions compare the `entryDate` field of two records, so every
//! record's timestamp must parse before reconciliation can use it. The
//! accepted shapes mirror common ISO-8601 exports: a full RFC 3339
//! timestamp with offset, a naive date-time, or a bare date. Naive
//! timestamps are interpreted as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Naive date-time shapes accepted in addition to full RFC 3339.
///
/// `%.f` also matches the empty string, so each entry covers both second
/// and sub-second precision.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses an ISO-8601 timestamp into a UTC instant.
///
/// Returns `None` when the input matches none of the accepted shapes.
///
/// # Examples
///
/// ```
/// use leadrec::time::parse_iso8601;
///
/// assert!(parse_iso8601("2014-05-07T17:30:20+00:00").is_some());
/// assert!(parse_iso8601("2020-01-01").is_some());
/// assert!(parse_iso8601("last tuesday").is_none());
/// ```
#[must_use]
pub fn parse_iso8601(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    // Bare dates resolve to midnight UTC.
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}
