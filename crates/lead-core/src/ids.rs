//! Timestamp-derived submission IDs and the timestamp wire format.
//!
//! Forms generate `sub-<unix-millis>`. The server appends a short random hex
//! suffix when it has to generate an ID itself, so two bodies arriving in the
//! same millisecond still get distinct IDs.

use chrono::{DateTime, SecondsFormat, Utc};

/// Prefix for every submission ID.
pub const PREFIX_SUBMISSION: &str = "sub";

/// Client-style ID: `sub-<unix-millis>`.
#[must_use]
pub fn timestamp_id(now: DateTime<Utc>) -> String {
    format!("{PREFIX_SUBMISSION}-{}", now.timestamp_millis())
}

/// Server-generated ID: `sub-<unix-millis>-<4 hex>`.
#[must_use]
pub fn suffixed_id(now: DateTime<Utc>, entropy: [u8; 2]) -> String {
    format!(
        "{}-{:02x}{:02x}",
        timestamp_id(now),
        entropy[0],
        entropy[1]
    )
}

/// Format a timestamp the way `submittedAt` is stored (`2026-01-05T09:30:00.000Z`).
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a `submittedAt` value. Accepts any RFC 3339 timestamp.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn fixed() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 10, 15, 30).unwrap()
    }

    #[test]
    fn timestamp_id_uses_millis() {
        assert_eq!(timestamp_id(fixed()), "sub-1772360130000");
    }

    #[test]
    fn suffixed_id_appends_hex() {
        assert_eq!(suffixed_id(fixed(), [0x0a, 0xff]), "sub-1772360130000-0aff");
    }

    #[test]
    fn format_timestamp_matches_browser_iso_strings() {
        assert_eq!(format_timestamp(fixed()), "2026-03-01T10:15:30.000Z");
    }

    #[test]
    fn parse_timestamp_roundtrips_and_rejects_garbage() {
        let formatted = format_timestamp(fixed());
        assert_eq!(parse_timestamp(&formatted), Some(fixed()));
        assert_eq!(
            parse_timestamp("2026-03-01T10:15:30+02:00").map(|t| t.timestamp()),
            Some(fixed().timestamp() - 7200)
        );
        assert!(parse_timestamp("yesterday").is_none());
    }
}
