//! Message extraction.
//!
//! Turns raw text of a known format into an ordered list of
//! `(sender, content, timestamp?)` tuples. Never fails: text that yields
//! nothing usable produces an empty list.

mod cleanup;
mod dates;
mod email;
mod labeled;

use chrono::{DateTime, Utc};
use parley_config::IngestConfig;
use parley_core::entities::Participant;
use parley_core::enums::SourceFormat;

/// One message before participant resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMessage {
    /// Sender label as it appeared in the text.
    pub sender: String,
    pub sender_email: Option<String>,
    /// Never empty. Ends with the configured marker when `truncated`.
    pub content: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub time_label: Option<String>,
    pub truncated: bool,
}

/// Everything one extraction pass produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub messages: Vec<ExtractedMessage>,
    /// Lines past `fallback_line_limit` that the per-line fallback never read.
    pub dropped_line_count: usize,
}

impl From<Vec<ExtractedMessage>> for Extraction {
    fn from(messages: Vec<ExtractedMessage>) -> Self {
        Self {
            messages,
            dropped_line_count: 0,
        }
    }
}

/// A message while its body is still being collected.
#[derive(Debug)]
struct RawMessage {
    sender: String,
    sender_email: Option<String>,
    body: String,
    timestamp: Option<DateTime<Utc>>,
    time_label: Option<String>,
}

impl RawMessage {
    /// Tidy and bound the body. `None` when nothing is left.
    fn finish(self, config: &IngestConfig) -> Option<ExtractedMessage> {
        let body = cleanup::tidy(&self.body);
        if body.is_empty() {
            tracing::debug!(sender = %self.sender, "dropped message with empty body");
            return None;
        }

        let (content, truncated) =
            cleanup::bound_length(body, config.body_max_chars, &config.truncation_marker);
        Some(ExtractedMessage {
            sender: self.sender.trim().to_string(),
            sender_email: self.sender_email,
            content,
            timestamp: self.timestamp,
            time_label: self.time_label,
            truncated,
        })
    }
}

/// Extract messages from `text` according to `format`.
///
/// `participants` seeds the known-name split for both chat formats; it is
/// ignored by the other formats. Only the per-line fallback is bounded by
/// `fallback_line_limit`, and the lines it skips are counted in
/// [`Extraction::dropped_line_count`].
#[must_use]
pub fn extract(
    text: &str,
    format: SourceFormat,
    participants: &[Participant],
    config: &IngestConfig,
) -> Extraction {
    let extraction = match format {
        SourceFormat::Email => email::extract(text, config)
            .map_or_else(|| labeled::extract_by_line(text, config), Extraction::from),
        SourceFormat::ChatLabeled | SourceFormat::ChatWithTimestamps => {
            labeled::extract_known(text, participants, config)
                .map_or_else(|| labeled::extract_by_line(text, config), Extraction::from)
        }
        SourceFormat::Plain => labeled::extract_by_line(text, config),
    };

    tracing::debug!(
        %format,
        messages = extraction.messages.len(),
        truncated = extraction.messages.iter().filter(|m| m.truncated).count(),
        dropped_lines = extraction.dropped_line_count,
        "extracted messages"
    );
    extraction
}
