//! Email thread extraction.

use std::sync::LazyLock;

use parley_config::IngestConfig;
use regex::Regex;

use super::cleanup::clean_email_body;
use super::dates::parse_timestamp;
use super::{ExtractedMessage, RawMessage};
use crate::patterns::{FROM_LINE, HEADER_FIELD, parse_address};

/// Signs that the page is a reply chain pasted newest-first.
static REPLY_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?mi)^[ \t]*(?:on\b.{0,200}(?:\r?\n.{0,120})?\bwrote:|-{2,}[ \t]*(?:original|forwarded)[ \t]+message|sent:[ \t]+\S|subject:[ \t]*(?:re|fwd?|aw)[ \t]*:|>)",
    )
    .expect("reply marker pattern is valid")
});

/// Split at each `From:` line and extract one message per block.
///
/// Returns `None` when the text holds no `From:` line at all.
pub(super) fn extract(text: &str, config: &IngestConfig) -> Option<Vec<ExtractedMessage>> {
    let lines: Vec<&str> = text.lines().collect();
    let starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| FROM_LINE.is_match(line))
        .map(|(i, _)| i)
        .collect();
    if starts.is_empty() {
        return None;
    }

    let mut messages = Vec::with_capacity(starts.len());
    for (n, &start) in starts.iter().enumerate() {
        let end = starts.get(n + 1).copied().unwrap_or(lines.len());
        if let Some(message) = extract_block(&lines[start..end], config) {
            messages.push(message);
        }
    }

    if page_is_newest_first(text, &messages) {
        tracing::debug!(blocks = messages.len(), "reversing newest-first email thread");
        messages.reverse();
    }
    Some(messages)
}

fn extract_block(block: &[&str], config: &IngestConfig) -> Option<ExtractedMessage> {
    let (first, rest) = block.split_first()?;
    let from_value = FROM_LINE
        .captures(first)
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str());
    let (sender, sender_email) = parse_address(from_value);

    let mut timestamp = None;
    let mut body_start = 0;
    for line in rest {
        let Some(caps) = HEADER_FIELD.captures(line) else {
            break;
        };
        let field = caps.get(1).map_or("", |m| m.as_str());
        if field.eq_ignore_ascii_case("date") || field.eq_ignore_ascii_case("sent") {
            timestamp = timestamp.or_else(|| parse_timestamp(caps.get(2).map_or("", |m| m.as_str())));
        }
        body_start += 1;
    }

    RawMessage {
        sender,
        sender_email,
        body: clean_email_body(&rest[body_start..]),
        timestamp,
        time_label: None,
    }
    .finish(config)
}

/// Dated threads are newest-first when the first date is later than the last.
/// Undated threads are newest-first when they carry reply-chain markers.
fn page_is_newest_first(text: &str, messages: &[ExtractedMessage]) -> bool {
    let dates: Vec<_> = messages.iter().filter_map(|m| m.timestamp).collect();
    match (dates.first(), dates.last()) {
        (Some(first), Some(last)) if dates.len() >= 2 => first > last,
        _ => REPLY_MARKER.is_match(text),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn senders(messages: &[ExtractedMessage]) -> Vec<&str> {
        messages.iter().map(|m| m.sender.as_str()).collect()
    }

    #[test]
    fn plain_blocks_keep_page_order() {
        let text = "From: Alice\nHi Bob, can you review?\n\nFrom: Bob <bob@x.com>\nSure, will do by Friday.\n--\nBob Smith\n555-1234";
        let messages = extract(text, &IngestConfig::default()).expect("has From lines");
        assert_eq!(senders(&messages), vec!["Alice", "Bob"]);
        assert_eq!(messages[0].content, "Hi Bob, can you review?");
        assert_eq!(messages[1].content, "Sure, will do by Friday.");
        assert_eq!(messages[1].sender_email.as_deref(), Some("bob@x.com"));
    }

    #[test]
    fn reply_chain_is_reversed() {
        let text = "From: Bob <bob@x.com>\nSubject: RE: review\n\nDone, merged.\n\nFrom: Alice <alice@x.com>\nSubject: review\n\nCan you review?";
        let messages = extract(text, &IngestConfig::default()).expect("has From lines");
        assert_eq!(senders(&messages), vec!["Alice", "Bob"]);
    }

    #[test]
    fn descending_dates_are_reversed_and_parsed() {
        let text = "From: Bob\nDate: 2025-03-04 10:00\n\nLater reply\n\nFrom: Alice\nDate: 2025-03-03 09:00\n\nFirst note";
        let messages = extract(text, &IngestConfig::default()).expect("has From lines");
        assert_eq!(senders(&messages), vec!["Alice", "Bob"]);
        assert_eq!(
            messages[0].timestamp,
            Some(Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn ascending_dates_win_over_reply_markers() {
        let text = "From: Alice\nDate: 2025-03-03 09:00\nSubject: Re: plan\n\nFirst\n\nFrom: Bob\nDate: 2025-03-04 10:00\n\nSecond";
        let messages = extract(text, &IngestConfig::default()).expect("has From lines");
        assert_eq!(senders(&messages), vec!["Alice", "Bob"]);
    }

    #[test]
    fn empty_bodies_are_dropped() {
        let text = "From: Alice\n\nRegards,\n\nFrom: Bob\nActual content";
        let messages = extract(text, &IngestConfig::default()).expect("has From lines");
        assert_eq!(senders(&messages), vec!["Alice", "Bob"]);

        let text = "From: Alice\n\n> quoted only\n\nFrom: Bob\nActual content";
        let messages = extract(text, &IngestConfig::default()).expect("has From lines");
        assert_eq!(senders(&messages), vec!["Bob"]);
    }

    #[test]
    fn dates_inside_a_body_do_not_cut_it() {
        let text = "From: Alice\nCan we move the launch to\n2025-03-04\nand tell the client?";
        let messages = extract(text, &IngestConfig::default()).expect("has From lines");
        assert_eq!(
            messages[0].content,
            "Can we move the launch to\n2025-03-04\nand tell the client?"
        );
    }

    #[test]
    fn wrapped_attribution_marks_a_reply_chain() {
        let text = "From: Bob\nDone, merged.\nOn Mon, Mar 3, 2025 at 9:00 AM Alice <alice@x.com>\nwrote:\n> can you review?\n\nFrom: Alice\nCan you review?";
        let messages = extract(text, &IngestConfig::default()).expect("has From lines");
        assert_eq!(senders(&messages), vec!["Alice", "Bob"]);
        assert_eq!(messages[1].content, "Done, merged.");
    }

    #[test]
    fn missing_from_lines_defer_to_fallback() {
        assert!(extract("Subject: hello\n\nbody", &IngestConfig::default()).is_none());
    }
}
