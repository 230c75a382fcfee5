//! Date normalization for feed output.
//!
//! Source pages carry human-readable dates ("June 24, 2025"); RSS wants
//! RFC-822 (`Tue, 24 Jun 2025 00:00:00 +0000`). Parsing tries a fixed list
//! of formats; a date with no time-of-day becomes midnight UTC. Unparseable
//! input falls back to the current run time, so a bad date never aborts the
//! pipeline.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

/// Render pattern for RFC-822 dates with weekday, as feed validators expect.
const RFC822: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// Accepted input formats, most common first.
const INPUT_FORMATS: &[&str] = &[
    "%B %d, %Y", // June 24, 2025
    "%b %d, %Y", // Jun 24, 2025
    "%m/%d/%Y",  // 06/24/2025
    "%Y-%m-%d",  // 2025-06-24
    "%d %B %Y",  // 24 June 2025
    "%d %b %Y",  // 24 Jun 2025
    "%Y/%m/%d",  // 2025/06/24
];

/// Parse a page date string into a UTC timestamp.
///
/// Embedded JSON-LD carries full ISO 8601 datetimes
/// (`2025-06-24T16:00:00.000Z`), so RFC 3339 is tried first; the date-only
/// formats follow and resolve to midnight UTC. Returns `None` when no known
/// format matches.
pub fn parse_page_date(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in INPUT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            let midnight = date.and_hms_opt(0, 0, 0)?;
            return Some(midnight.and_utc());
        }
    }
    None
}

/// Normalize a page date into the feed's wire format.
///
/// Falls back to the current run time when the input is unparseable.
pub fn normalize_page_date(text: &str) -> String {
    match parse_page_date(text) {
        Some(dt) => dt.format(RFC822).to_string(),
        None => {
            warn!(date = %text.trim(), "Unparseable page date; using run time");
            now_rfc822()
        }
    }
}

/// The current time in the feed's wire format. Used for `lastBuildDate` and
/// as the per-article default when a source exposes no date.
pub fn now_rfc822() -> String {
    Utc::now().format(RFC822).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_month_name() {
        assert_eq!(
            normalize_page_date("June 24, 2025"),
            "Tue, 24 Jun 2025 00:00:00 +0000"
        );
    }

    #[test]
    fn test_short_month_name() {
        assert_eq!(
            normalize_page_date("Jun 24, 2025"),
            "Tue, 24 Jun 2025 00:00:00 +0000"
        );
    }

    #[test]
    fn test_slash_and_iso_forms() {
        assert_eq!(
            normalize_page_date("06/24/2025"),
            "Tue, 24 Jun 2025 00:00:00 +0000"
        );
        assert_eq!(
            normalize_page_date("2025-06-24"),
            "Tue, 24 Jun 2025 00:00:00 +0000"
        );
    }

    #[test]
    fn test_iso_8601_datetime() {
        // the form JSON-LD datePublished values take
        assert_eq!(
            normalize_page_date("2025-06-24T16:00:00.000Z"),
            "Tue, 24 Jun 2025 16:00:00 +0000"
        );
    }

    #[test]
    fn test_iso_8601_offset_converted_to_utc() {
        assert_eq!(
            normalize_page_date("2025-06-24T09:00:00+09:00"),
            "Tue, 24 Jun 2025 00:00:00 +0000"
        );
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(
            normalize_page_date("  May 15, 2025  "),
            "Thu, 15 May 2025 00:00:00 +0000"
        );
    }

    #[test]
    fn test_midnight_default() {
        let dt = parse_page_date("June 24, 2025").unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "00:00:00");
    }

    #[test]
    fn test_unparseable_falls_back_to_now() {
        let before = Utc::now();
        let rendered = normalize_page_date("not a date at all");
        let parsed = DateTime::parse_from_rfc2822(&rendered).unwrap();
        // run-time fallback, so the value is "now" give or take the test
        let delta = parsed.with_timezone(&Utc) - before;
        assert!(delta.num_seconds().abs() < 60);
    }

    #[test]
    fn test_parse_page_date_none_on_garbage() {
        assert!(parse_page_date("").is_none());
        assert!(parse_page_date("tomorrow").is_none());
    }
}
