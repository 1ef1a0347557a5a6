//! Email body noise removal.
//!
//! Rules are grouped into ordered families that run in sequence:
//!
//! 1. **Quote**: the first matching line and everything after it is a quoted
//!    earlier message.
//! 2. **Signature**: the first matching line and everything after it is a
//!    signature or footer.
//! 3. **Noise**: every matching line is dropped on its own.
//!
//! Within a family the first line that matches any rule wins. Later
//! families only see what earlier families kept.

use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// Cut the body at this line.
    TruncateHere,
    /// Remove this line only.
    DropLine,
}

/// Where in the body a rule may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Anywhere,
    /// Only once a non-blank line has been kept above it.
    AfterContent,
    /// After content, and only when no prose line follows it.
    Trailing,
}

#[derive(Debug)]
struct LineRule {
    name: &'static str,
    pattern: Regex,
    /// Lines matching this are never hit by the rule.
    unless: Option<Regex>,
    /// The following line must match this for the rule to fire.
    continued_by: Option<Regex>,
    action: Action,
    scope: Scope,
}

impl LineRule {
    fn new(name: &'static str, pattern: &str, action: Action, scope: Scope) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("cleanup rule pattern is valid"),
            unless: None,
            continued_by: None,
            action,
            scope,
        }
    }

    fn unless(mut self, pattern: &str) -> Self {
        self.unless = Some(Regex::new(pattern).expect("cleanup exclusion pattern is valid"));
        self
    }

    fn continued_by(mut self, pattern: &str) -> Self {
        self.continued_by = Some(Regex::new(pattern).expect("cleanup continuation pattern is valid"));
        self
    }

    /// Whether the rule hits `lines[index]`.
    fn fires(&self, lines: &[&str], index: usize, has_content: bool) -> bool {
        let line = lines[index];
        let in_scope = match self.scope {
            Scope::Anywhere => true,
            Scope::AfterContent => has_content,
            Scope::Trailing => has_content && !lines[index + 1..].iter().any(|l| is_prose(l)),
        };
        in_scope
            && self.pattern.is_match(line)
            && !self.unless.as_ref().is_some_and(|re| re.is_match(line))
            && self.continued_by.as_ref().is_none_or(|re| {
                lines.get(index + 1).is_some_and(|next| re.is_match(next))
            })
    }
}

/// Four or more words, mostly starting lowercase: a sentence, not a
/// signature line like a name, title, or company.
fn is_prose(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    let lowercase = words
        .iter()
        .filter(|w| w.chars().next().is_some_and(char::is_lowercase))
        .count();
    words.len() >= 4 && lowercase * 2 >= words.len()
}

static QUOTE_RULES: LazyLock<Vec<LineRule>> = LazyLock::new(|| {
    vec![
        LineRule::new(
            "on_wrote",
            r"(?i)^[ \t]*on\b.{0,200}\bwrote:[ \t]*$",
            Action::TruncateHere,
            Scope::Anywhere,
        ),
        LineRule::new(
            "on_wrote_wrapped",
            r"(?i)^[ \t]*on[ \t]+\S.{0,200}$",
            Action::TruncateHere,
            Scope::Anywhere,
        )
        .continued_by(r"(?i)^[ \t]*(?:\S.{0,120}[ \t])?wrote:[ \t]*$"),
        LineRule::new(
            "original_message",
            r"(?i)^[ \t]*-{2,}[ \t]*(?:original|forwarded)[ \t]+message[ \t]*-{2,}[ \t]*$",
            Action::TruncateHere,
            Scope::Anywhere,
        ),
        LineRule::new(
            "previous_header",
            r"(?i)^[ \t]*(?:from|sent|to):[ \t]+\S",
            Action::TruncateHere,
            Scope::Anywhere,
        ),
        LineRule::new(
            "separator_run",
            r"^[ \t]*(?:_{5,}|-{5,})[ \t]*$",
            Action::TruncateHere,
            Scope::Anywhere,
        ),
    ]
});

static SIGNATURE_RULES: LazyLock<Vec<LineRule>> = LazyLock::new(|| {
    vec![
        LineRule::new("dash_dash", r"^--[ \t]*$", Action::TruncateHere, Scope::Anywhere),
        LineRule::new(
            "sent_from",
            r"(?i)^[ \t]*sent from[ \t]",
            Action::TruncateHere,
            Scope::Anywhere,
        ),
        LineRule::new(
            "get_outlook",
            r"(?i)^[ \t]*get outlook for",
            Action::TruncateHere,
            Scope::Anywhere,
        ),
        LineRule::new(
            "confidentiality",
            r"(?i)^[ \t]*(?:confidential(?:ity)?[ \t]+notice|disclaimer:|this (?:e-?mail|message)(?:[ \t]+and any attachments)?[ \t]+(?:is|are|may be|contains?)[ \t]+(?:confidential|privileged|intended))",
            Action::TruncateHere,
            Scope::Anywhere,
        ),
        LineRule::new(
            "valediction",
            r"(?i)^[ \t]*(?:regards|best regards|kind regards|warm regards|best wishes|best|thanks|thank you|thanks again|many thanks|cheers|sincerely|yours truly|all the best|talk soon)[ \t]*[,.!]?[ \t]*$",
            Action::TruncateHere,
            Scope::AfterContent,
        ),
        LineRule::new(
            "phone",
            r"(?i)^[ \t]*(?:(?:tel|phone|mobile|cell|direct|office|[mtpo])[ \t]*[:.]?[ \t]*)?\+?[\d(][\d \t().\-]{5,}\d[ \t]*$",
            Action::TruncateHere,
            Scope::Trailing,
        )
        .unless(r"^[ \t]*(?:\d{4}[\-.]\d{1,2}[\-.]\d{1,2}|\d{1,2}[\-.]\d{1,2}[\-.]\d{2,4}|\d+[ \t]*-[ \t]*\d+)[ \t]*$"),
        LineRule::new(
            "company_caps",
            r"^[ \t]*[A-Z][A-Z&.,'\-]*(?:[ \t]+[A-Z][A-Z&.,'\-]*){1,4}[ \t]*$",
            Action::TruncateHere,
            Scope::Trailing,
        ),
    ]
});

static NOISE_RULES: LazyLock<Vec<LineRule>> = LazyLock::new(|| {
    vec![
        LineRule::new(
            "bare_url",
            r"(?i)^[ \t]*<?(?:https?://|www\.)\S+>?[ \t]*$",
            Action::DropLine,
            Scope::Anywhere,
        ),
        LineRule::new(
            "bare_email",
            r"^[ \t]*<?[\w.+\-]+@[\w\-]+(?:\.[\w\-]+)+>?[ \t]*$",
            Action::DropLine,
            Scope::Anywhere,
        ),
        LineRule::new("quoted_line", r"^[ \t]*>", Action::DropLine, Scope::Anywhere),
    ]
});

/// Remove quoted replies, signatures, and noise lines from an email body,
/// then collapse blank runs and trim.
pub(crate) fn clean_email_body(lines: &[&str]) -> String {
    let mut kept: Vec<&str> = lines.to_vec();
    for family in [&*QUOTE_RULES, &*SIGNATURE_RULES, &*NOISE_RULES] {
        kept = apply_family(family, &kept);
    }
    tidy(&kept.join("\n"))
}

fn apply_family<'a>(rules: &[LineRule], lines: &[&'a str]) -> Vec<&'a str> {
    let mut kept = Vec::with_capacity(lines.len());
    let mut has_content = false;

    for (index, &line) in lines.iter().enumerate() {
        let hit = rules
            .iter()
            .find(|rule| rule.fires(lines, index, has_content));

        match hit.map(|rule| (rule.name, rule.action)) {
            Some((name, Action::TruncateHere)) => {
                tracing::trace!(rule = name, "body truncated");
                break;
            }
            Some((_, Action::DropLine)) => {}
            None => {
                has_content |= !line.trim().is_empty();
                kept.push(line);
            }
        }
    }
    kept
}

/// Collapse runs of three or more blank lines into one, then trim.
pub(crate) fn tidy(body: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut blank_run = 0usize;

    for line in body.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            continue;
        }
        if blank_run > 0 {
            let keep = if blank_run >= 3 { 1 } else { blank_run };
            out.extend(std::iter::repeat_n("", keep));
        }
        blank_run = 0;
        out.push(line);
    }

    out.join("\n").trim().to_string()
}

/// Cut `content` to `max_chars` characters and append `marker` when it was longer.
/// Returns the bounded text and whether it was cut.
pub(crate) fn bound_length(content: String, max_chars: usize, marker: &str) -> (String, bool) {
    match content.char_indices().nth(max_chars) {
        None => (content, false),
        Some((cut, _)) => {
            let mut bounded = content[..cut].trim_end().to_string();
            bounded.push_str(marker);
            (bounded, true)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn clean(body: &str) -> String {
        let lines: Vec<&str> = body.lines().collect();
        clean_email_body(&lines)
    }

    #[test]
    fn dash_dash_signature_is_cut() {
        assert_eq!(
            clean("Sure, will do by Friday.\n--\nBob Smith\n555-1234"),
            "Sure, will do by Friday."
        );
    }

    #[rstest]
    #[case("Sounds good.\n\nOn Mon, Mar 3, 2025 at 9:00 AM Alice wrote:\n> can you review?")]
    #[case("Sounds good.\n-----Original Message-----\nFrom: Alice\nSent: Monday")]
    #[case("Sounds good.\n________________________________\nFrom: Alice")]
    #[case("Sounds good.\nFrom: Alice <alice@x.com>\nSent: Monday")]
    #[case("Sounds good.\n\nOn Mon, Mar 3, 2025 at 9:00 AM Alice Smith <alice@x.com>\nwrote:\n> can you review?")]
    #[case("Sounds good.\nOn Mon, Mar 3, 2025 at 9:00 AM Alice Smith\n<alice@x.com> wrote:\n> can you review?")]
    fn quoted_reply_markers_cut_the_body(#[case] body: &str) {
        assert_eq!(clean(body), "Sounds good.");
    }

    #[rstest]
    #[case("Approved.\n\nRegards,\nDana")]
    #[case("Approved.\nThanks!\nDana")]
    #[case("Approved.\nSent from my iPhone")]
    #[case("Approved.\n+1 (555) 123-4567")]
    #[case("Approved.\nACME HOLDINGS LLC")]
    #[case("Approved.\nGet Outlook for iOS")]
    #[case("Approved.\nCONFIDENTIALITY NOTICE: this message is private")]
    #[case("Approved.\n\n+1 (555) 123-4567\nacme.example\nSuite 400, Main St")]
    fn signature_markers_cut_the_body(#[case] body: &str) {
        assert_eq!(clean(body), "Approved.");
    }

    #[rstest]
    #[case("Can we move the launch to\n2025-03-04\nand tell the client?")]
    #[case("Budget is\n100 - 200\nthousand, please confirm.")]
    #[case("Call me at\n+1 (555) 123-4567\nwhen you have a minute to talk.")]
    #[case("The codes are\nACME HOLDINGS LLC\nand we should file them today.")]
    #[case("Launch date:\n03.04.2025")]
    fn numbers_and_caps_inside_prose_are_kept(#[case] body: &str) {
        assert_eq!(clean(body), body);
    }

    #[test]
    fn on_line_without_wrote_is_kept() {
        let body = "On Monday we ship.\nPlease confirm.";
        assert_eq!(clean(body), body);
    }

    #[test]
    fn valediction_without_prior_content_is_kept() {
        assert_eq!(clean("Thanks,\nfor the update"), "Thanks,\nfor the update");
    }

    #[test]
    fn bare_urls_and_addresses_are_dropped() {
        let body = "See the doc\nhttps://example.com/doc\nbob@x.com\nand reply";
        assert_eq!(clean(body), "See the doc\nand reply");
    }

    #[test]
    fn blank_runs_collapse() {
        assert_eq!(tidy("a\n\n\n\n\nb\n\nc"), "a\n\nb\n\nc");
    }

    #[test]
    fn long_bodies_are_bounded_with_marker() {
        let (text, cut) = bound_length("abcdefghij".to_string(), 4, " [truncated]");
        assert_eq!(text, "abcd [truncated]");
        assert!(cut);

        let (text, cut) = bound_length("abc".to_string(), 4, " [truncated]");
        assert_eq!(text, "abc");
        assert!(!cut);
    }

    #[test]
    fn bounding_respects_char_boundaries() {
        let (text, cut) = bound_length("héllo wörld".to_string(), 2, "…");
        assert_eq!(text, "hé…");
        assert!(cut);
    }
}
