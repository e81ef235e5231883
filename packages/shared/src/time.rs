//! Time helpers. All timestamps are Unix milliseconds in UTC.

use chrono::{DateTime, SecondsFormat, Utc};

/// Current Unix timestamp in milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix millisecond timestamp as RFC 3339 (`2024-01-01T00:00:00.000Z`).
///
/// Out-of-range values format as an empty string.
pub fn millis_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}
