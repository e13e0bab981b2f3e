//! Display formatting for timestamps.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::{OffsetDateTime, UtcOffset};

/// `HH:MM` in UTC, for message bubbles.
#[must_use]
pub fn format_time(timestamp: OffsetDateTime) -> String {
    let utc = timestamp.to_offset(UtcOffset::UTC);
    format!("{:02}:{:02}", utc.hour(), utc.minute())
}

/// `YYYY-MM-DD` in UTC, for the session list.
#[must_use]
pub fn format_date(timestamp: OffsetDateTime) -> String {
    let utc = timestamp.to_offset(UtcOffset::UTC);
    format!("{:04}-{:02}-{:02}", utc.year(), u8::from(utc.month()), utc.day())
}
