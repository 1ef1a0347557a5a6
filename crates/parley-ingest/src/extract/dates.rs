//! Header date parsing.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Client-rendered formats without a zone; read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%A, %B %d, %Y %I:%M %p",
    "%A, %B %d, %Y at %I:%M %p",
    "%B %d, %Y %I:%M %p",
    "%B %d, %Y at %I:%M %p",
    "%a, %b %d, %Y at %I:%M %p",
    "%d %B %Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M",
];

/// Parse a `Date:`/`Sent:` header value to UTC. `None` when no format fits.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let value = strip_zone_comment(raw.trim());
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(value, format)
            .ok()
            .map(|naive| naive.and_utc())
    })
}

/// Drop a trailing `(UTC)`-style comment.
fn strip_zone_comment(value: &str) -> &str {
    match value.rfind('(') {
        Some(open) if value.ends_with(')') => value[..open].trim_end(),
        _ => value,
    }
}
