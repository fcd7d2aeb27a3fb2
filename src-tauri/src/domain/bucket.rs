//! Date-bucket keys
//!
//! Buckets are identified by a `YYYY-MM-DD` date string, plus one
//! sentinel for the backlog. Keys sort lexicographically in date order,
//! which the range queries rely on.

use chrono::{Duration, NaiveDate};

use super::entity::{DomainError, DomainResult};

/// Sentinel bucket for tasks not assigned to any day.
pub const BACKLOG: &str = "backlog";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a day key. The backlog sentinel is valid but has no date.
pub fn parse_day(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_FORMAT).ok()
}

pub fn format_day(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Validate a key before it is written anywhere.
pub fn validate(key: &str) -> DomainResult<()> {
    if key == BACKLOG || parse_day(key).is_some() {
        Ok(())
    } else {
        Err(DomainError::InvalidInput(format!(
            "not a bucket key: {}",
            key
        )))
    }
}

/// The day after `key`. The backlog has no neighbors.
pub fn next_day(key: &str) -> Option<String> {
    parse_day(key).map(|d| format_day(d + Duration::days(1)))
}

/// The day before `key`.
pub fn prev_day(key: &str) -> Option<String> {
    parse_day(key).map(|d| format_day(d - Duration::days(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_keys() {
        assert!(validate("2026-08-24").is_ok());
        assert!(validate(BACKLOG).is_ok());
        assert!(validate("today").is_err());
        assert!(validate("2026-13-01").is_err());
    }

    #[test]
    fn test_day_arithmetic() {
        assert_eq!(next_day("2026-08-31").as_deref(), Some("2026-09-01"));
        assert_eq!(prev_day("2026-01-01").as_deref(), Some("2025-12-31"));
        assert_eq!(next_day(BACKLOG), None);
    }
}
