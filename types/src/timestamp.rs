//! Build timestamp parsing.
//!
//! Build dates arrive in whatever shape the build pipeline produced them, so
//! several textual forms are accepted and normalised to UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

use crate::UNKNOWN;

/// Timestamp returned when a build date is absent or cannot be parsed.
pub const ZERO_TIMESTAMP: DateTime<Utc> = DateTime::<Utc>::MIN_UTC;

/// Why a build date could not be turned into a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("build date is not set")]
    Absent,
    #[error("unrecognised build date format: {0}")]
    Unparseable(String),
}

/// Parse a build date, trying each accepted format in order.
///
/// Accepted forms:
/// - RFC 3339 (`2025-01-01T00:00:00Z`, `2025-01-01T02:00:00+02:00`)
/// - `2025-01-01 00:00:00` (interpreted as UTC)
/// - `2025-01-01` (midnight UTC)
/// - RFC 1123 with a zone name (`Wed, 01 Jan 2025 00:00:00 GMT`); names
///   other than the RFC 2822 set are read as UTC and the weekday is not checked
/// - RFC 1123 with a numeric offset (`Wed, 01 Jan 2025 00:00:00 +0000`)
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, TimestampError> {
    if input.is_empty() || input == UNKNOWN {
        return Err(TimestampError::Absent);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }

    if let Some(naive) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(naive.and_utc());
    }

    if let Ok(ts) = DateTime::parse_from_rfc2822(input) {
        return Ok(ts.with_timezone(&Utc));
    }

    // RFC 2822 only knows a handful of zone names and rejects a weekday that
    // does not match the date. Retry without the weekday; unknown zone names
    // are read as UTC.
    let rest = input.split_once(", ").map_or(input, |(_, rest)| rest);
    if let Ok(ts) = DateTime::parse_from_str(rest, "%d %b %Y %H:%M:%S %z") {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(rest, "%d %b %Y %H:%M:%S %Z") {
        return Ok(naive.and_utc());
    }

    Err(TimestampError::Unparseable(input.to_string()))
}

/// Whether `ts` is the placeholder returned for missing or invalid dates.
pub fn is_zero_timestamp(ts: &DateTime<Utc>) -> bool {
    *ts == ZERO_TIMESTAMP
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse_timestamp("2025-01-01T00:00:00Z").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2025, 1, 1));

        // Offsets are normalised to UTC
        let ts = parse_timestamp("2025-01-01T02:30:00+02:00").unwrap();
        assert_eq!((ts.hour(), ts.minute()), (0, 30));
    }

    #[test]
    fn test_parse_space_separated() {
        let ts = parse_timestamp("2024-06-15 13:45:10").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 6, 15));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (13, 45, 10));
    }

    #[test]
    fn test_parse_bare_date() {
        let ts = parse_timestamp("2025-01-01").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2025, 1, 1));
        assert_eq!(ts.hour(), 0);
        assert!(!is_zero_timestamp(&ts));
    }

    #[test]
    fn test_parse_rfc1123() {
        let named = parse_timestamp("Wed, 01 Jan 2025 12:00:00 GMT").unwrap();
        let numeric = parse_timestamp("Wed, 01 Jan 2025 14:00:00 +0200").unwrap();
        assert_eq!(named, numeric);
    }

    #[test]
    fn test_parse_rfc1123_any_zone_name() {
        let expected = parse_timestamp("2025-01-01T12:00:00Z").unwrap();
        assert_eq!(parse_timestamp("Wed, 01 Jan 2025 12:00:00 UTC"), Ok(expected));
        assert_eq!(parse_timestamp("Wed, 01 Jan 2025 12:00:00 CET"), Ok(expected));
    }

    #[test]
    fn test_parse_rfc1123_ignores_weekday() {
        let expected = parse_timestamp("2025-01-01T12:00:00Z").unwrap();
        assert_eq!(parse_timestamp("Thu, 01 Jan 2025 12:00:00 GMT"), Ok(expected));
        assert_eq!(parse_timestamp("Thu, 01 Jan 2025 14:00:00 +0200"), Ok(expected));
    }

    #[test]
    fn test_absent_and_invalid() {
        assert_eq!(parse_timestamp(""), Err(TimestampError::Absent));
        assert_eq!(parse_timestamp("unknown"), Err(TimestampError::Absent));
        assert_eq!(
            parse_timestamp("not-a-date"),
            Err(TimestampError::Unparseable("not-a-date".to_string()))
        );
    }

    #[test]
    fn test_zero_timestamp() {
        assert!(is_zero_timestamp(&ZERO_TIMESTAMP));
        assert!(!is_zero_timestamp(&DateTime::<Utc>::default()));
    }
}
