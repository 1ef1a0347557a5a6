//! `Name: message` extraction for chat transcripts and unstructured text.

use std::cmp::Reverse;
use std::sync::LazyLock;

use parley_config::IngestConfig;
use parley_core::entities::{Participant, fold_case};
use regex::Regex;

use super::{ExtractedMessage, Extraction, RawMessage};
use crate::patterns::{TIME_TOKEN, is_stop_word};

/// Longest label the per-line fallback accepts, in words.
const MAX_LABEL_WORDS: usize = 4;

static LEADING_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^[ \t]*\[({TIME_TOKEN})\][ \t]*(.*)$"))
        .expect("leading time pattern is valid")
});

static TRAILING_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^[ \t]*([^\[\]:]+?)[ \t]*\[({TIME_TOKEN})\][ \t]*:?[ \t]*(.*)$"
    ))
    .expect("trailing time pattern is valid")
});

/// Split spans at every occurrence of a known participant label.
///
/// Returns `None` when there are no names to look for or none of them
/// occur, so the caller can fall back to [`extract_by_line`].
pub(crate) fn extract_known(
    text: &str,
    participants: &[Participant],
    config: &IngestConfig,
) -> Option<Vec<ExtractedMessage>> {
    let pattern = known_names_pattern(participants)?;

    let matches: Vec<_> = pattern.captures_iter(text).collect();
    if matches.is_empty() {
        return None;
    }

    let mut messages = Vec::with_capacity(matches.len());
    for (i, caps) in matches.iter().enumerate() {
        let Some(whole) = caps.get(0) else { continue };
        let end = matches
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |next| next.start());

        let raw = RawMessage {
            sender: caps.name("name").map_or("", |m| m.as_str()).to_string(),
            sender_email: None,
            body: text[whole.end()..end].to_string(),
            timestamp: None,
            time_label: caps
                .name("lead")
                .or_else(|| caps.name("trail"))
                .map(|m| m.as_str().to_string()),
        };
        if let Some(message) = raw.finish(config) {
            messages.push(message);
        }
    }
    Some(messages)
}

/// `(?mi)^[ \t]*(?:\[time\][ \t]*)?(?P<name>longest|...|shortest)(?:[ \t]*\[time\][ \t]*:?|[ \t]*:)`
fn known_names_pattern(participants: &[Participant]) -> Option<Regex> {
    let mut names: Vec<&str> = participants
        .iter()
        .map(|p| p.display_name.trim())
        .filter(|name| !name.is_empty())
        .collect();
    if names.is_empty() {
        return None;
    }
    names.sort_by_cached_key(|name| (Reverse(name.chars().count()), fold_case(name)));
    names.dedup_by(|a, b| fold_case(a) == fold_case(b));

    let alternation = names
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(
        r"(?mi)^[ \t]*(?:\[(?P<lead>{TIME_TOKEN})\][ \t]*)?(?P<name>{alternation})(?:[ \t]*\[(?P<trail>{TIME_TOKEN})\][ \t]*:?|[ \t]*:)"
    );

    match Regex::new(&pattern) {
        Ok(regex) => Some(regex),
        Err(error) => {
            tracing::warn!(%error, "known-name pattern rejected; using line fallback");
            None
        }
    }
}

/// A line that opens a new message.
#[derive(Debug, PartialEq, Eq)]
struct LabeledLine<'a> {
    sender: &'a str,
    time_label: Option<&'a str>,
    content: &'a str,
}

/// Per-line `Name: message` fallback over the first `fallback_line_limit`
/// lines. Unlabeled lines continue the previous message. Lines past the
/// limit are counted, not read.
pub(crate) fn extract_by_line(text: &str, config: &IngestConfig) -> Extraction {
    let dropped_line_count = text.lines().count().saturating_sub(config.fallback_line_limit);
    if dropped_line_count > 0 {
        tracing::warn!(
            limit = config.fallback_line_limit,
            dropped = dropped_line_count,
            "line fallback limit reached; remaining lines skipped"
        );
    }

    let mut pending: Vec<RawMessage> = Vec::new();

    for line in text.lines().take(config.fallback_line_limit) {
        if let Some(labeled) = split_labeled_line(line, config.max_label_chars) {
            pending.push(RawMessage {
                sender: labeled.sender.to_string(),
                sender_email: None,
                body: labeled.content.to_string(),
                timestamp: None,
                time_label: labeled.time_label.map(str::to_string),
            });
        } else if let Some(current) = pending.last_mut() {
            current.body.push('\n');
            current.body.push_str(line);
        }
    }

    Extraction {
        messages: pending
            .into_iter()
            .filter_map(|raw| raw.finish(config))
            .collect(),
        dropped_line_count,
    }
}

fn split_labeled_line(line: &str, max_label_chars: usize) -> Option<LabeledLine<'_>> {
    let (lead_time, rest) = match LEADING_TIME.captures(line) {
        Some(caps) => (
            caps.get(1).map(|m| m.as_str()),
            caps.get(2).map_or("", |m| m.as_str()),
        ),
        None => (None, line),
    };

    let candidate = if let Some(caps) = TRAILING_TIME.captures(rest) {
        LabeledLine {
            sender: caps.get(1).map_or("", |m| m.as_str()).trim(),
            time_label: caps.get(2).map(|m| m.as_str()).or(lead_time),
            content: caps.get(3).map_or("", |m| m.as_str()).trim(),
        }
    } else {
        let (label, content) = rest.split_once(':')?;
        if content.trim_start().starts_with("//") {
            return None;
        }
        LabeledLine {
            sender: label.trim(),
            time_label: lead_time,
            content: content.trim(),
        }
    };

    is_acceptable_label(candidate.sender, max_label_chars).then_some(candidate)
}

fn is_acceptable_label(label: &str, max_label_chars: usize) -> bool {
    !label.is_empty()
        && label.chars().count() <= max_label_chars
        && label.split_whitespace().count() <= MAX_LABEL_WORDS
        && label.chars().next().is_some_and(char::is_alphabetic)
        && !is_stop_word(label)
}
