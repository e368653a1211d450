//! Loose publish-date parsing with a wall-clock fallback.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M"];
const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%Y/%m/%d"];

/// Parses a feed or page date, substituting the current time on failure.
#[must_use]
pub fn resolve_date(raw: &str) -> DateTime<Utc> {
    resolve_date_at(raw, Utc::now())
}

/// Same as [`resolve_date`] with an explicit fallback instant.
///
/// Tries RFC 2822 (RSS `pubDate`), RFC 3339 (HTML `time[datetime]`), then a
/// handful of naive layouts interpreted as UTC.
#[must_use]
pub fn resolve_date_at(raw: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    parse_date(raw).unwrap_or_else(|| {
        if !raw.trim().is_empty() {
            tracing::debug!(raw, "unparseable date; using current time");
        }
        now
    })
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    for format in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}
