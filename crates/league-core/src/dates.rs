//! Calendar-date normalisation for fixture dates and selection bounds.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::error::LeagueError;

/// Date-time patterns seen in exported fixture lists, most common first.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Slash dates are read month-first, so `01/02/2024` is 2 January.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Normalise a fixture date string to a calendar date.
///
/// Handles:
/// * plain dates (`2024-01-01`, `08/17/2024`, `2024/01/01`)
/// * date-times with or without fractional seconds; time-of-day is dropped
/// * RFC 3339 with an offset or `Z` suffix; the date is taken as written,
///   not shifted to UTC
///
/// Returns `None` for empty or unrecognised input.
pub fn parse_match_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    for fmt in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.date());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    warn!("could not parse fixture date \"{}\"", s);
    None
}

/// Parse a user-supplied range bound such as `--from 2024-01-01`.
pub fn parse_date_bound(s: &str) -> Result<NaiveDate, LeagueError> {
    parse_match_date(s).ok_or_else(|| LeagueError::InvalidDate(s.to_string()))
}

/// `deserialize_with` adapter for fixture `Date` columns.
pub fn deserialize_match_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_match_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised date \"{raw}\"")))
}
