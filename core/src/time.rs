//! Time related utils.

use chrono::SecondsFormat;
use chrono::TimeZone;
use chrono::Utc;

/// DateTime in UTC, the only flavor used across this crate.
pub type DateTime = chrono::DateTime<Utc>;

/// Return the current UTC time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format a time into an ISO-8601 string with millisecond precision.
///
/// The verifying server reconstructs the canonical string from the
/// `oauth-timestamp` header, so this exact rendering (`Z` suffix, three
/// fractional digits) is part of the signing contract:
/// `2023-01-01T00:00:00.000Z`.
pub fn format_iso8601_millis(t: DateTime) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build a DateTime from unix milliseconds. Mostly useful in tests where a
/// fixed signing time is required.
pub fn from_unix_millis(ms: i64) -> DateTime {
    Utc.timestamp_millis_opt(ms)
        .single()
        .expect("timestamp must be in range")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_iso8601_millis() {
        let t = from_unix_millis(1672531200000);
        assert_eq!(format_iso8601_millis(t), "2023-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_format_keeps_millis() {
        let t = from_unix_millis(1672531200123);
        assert_eq!(format_iso8601_millis(t), "2023-01-01T00:00:00.123Z");
    }
}
