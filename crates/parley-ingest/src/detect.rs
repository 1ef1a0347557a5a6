//! Source-format detection.
//!
//! Ordered structural checks, first match wins:
//!
//! 1. Any RFC822-style header line (`From:`/`To:`/`Subject:`/`Date:`) → email
//! 2. Two or more `name [h:mm]` / `[h:mm] name` lines → chat with timestamps
//! 3. Any `Capitalized Name: ` line that is not a header word → labeled chat
//! 4. Otherwise → plain

use parley_core::enums::{FormatHint, SourceFormat};

use crate::patterns::{CHAT_TIME_LINE, LABEL_LINE, MAIL_HEADER_LINE, is_stop_word};

/// Minimum number of timestamped chat lines before the text counts as a timestamped chat.
const MIN_CHAT_TIME_LINES: usize = 2;

/// Classify raw text into a source format. Pure; never fails.
#[must_use]
pub fn detect(text: &str) -> SourceFormat {
    if MAIL_HEADER_LINE.is_match(text) {
        return SourceFormat::Email;
    }

    if CHAT_TIME_LINE.find_iter(text).take(MIN_CHAT_TIME_LINES).count() >= MIN_CHAT_TIME_LINES {
        return SourceFormat::ChatWithTimestamps;
    }

    let has_label = LABEL_LINE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .any(|label| !is_stop_word(label.as_str()));
    if has_label {
        return SourceFormat::ChatLabeled;
    }

    SourceFormat::Plain
}

/// Combine detection with a caller-declared hint.
///
/// Detection always runs. An unset or `simple` hint defers to it; `email`
/// forces email; `slack`/`teams` keep a detected chat variant and otherwise
/// force labeled chat.
#[must_use]
pub fn resolve_format(text: &str, hint: Option<FormatHint>) -> SourceFormat {
    let detected = detect(text);
    let resolved = match hint {
        None | Some(FormatHint::Simple) => detected,
        Some(FormatHint::Email) => SourceFormat::Email,
        Some(FormatHint::Slack | FormatHint::Teams) => {
            if detected.is_chat() {
                detected
            } else {
                SourceFormat::ChatLabeled
            }
        }
    };

    tracing::debug!(
        hint = hint.map(FormatHint::as_str),
        %detected,
        %resolved,
        "resolved source format"
    );
    resolved
}
