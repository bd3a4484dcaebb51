//! Timestamp helpers.
//!
//! All dates are stored as RFC 3339 UTC strings with millisecond precision so
//! that SQLite can compare them lexicographically.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::types::{DatabaseError, DatabaseResult};

pub fn format(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn now() -> String {
    format(Utc::now())
}

pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Parse `value` as RFC 3339 and re-render it in the canonical stored form.
pub fn normalize(field: &str, value: &str) -> DatabaseResult<String> {
    parse(value)
        .map(format)
        .ok_or_else(|| DatabaseError::validation(format!("{field} must be an RFC 3339 timestamp")))
}
