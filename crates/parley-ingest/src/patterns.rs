//! Line patterns shared by detection, name discovery, and extraction.

use std::sync::LazyLock;

use regex::Regex;

/// Bracket-free clock token: `9:05`, `10:30:12`, `10:30 AM`.
pub(crate) const TIME_TOKEN: &str = r"\d{1,2}:\d{2}(?::\d{2})?(?:[ \t]*[AaPp]\.?[Mm]\.?)?";

/// Labels that look like `Name:` but are mail headers or boilerplate.
const HEADER_STOP_WORDS: &[&str] = &[
    "from",
    "to",
    "cc",
    "bcc",
    "subject",
    "date",
    "sent",
    "reply",
    "forward",
    "re",
    "fw",
    "fwd",
    "note",
    "attachment",
    "priority",
    "importance",
];

/// Whether `label` (already trimmed) is one of the fixed header/stop words.
pub(crate) fn is_stop_word(label: &str) -> bool {
    let lower = label.trim().to_ascii_lowercase();
    HEADER_STOP_WORDS.contains(&lower.as_str())
}

/// RFC822-style header line at line start.
pub(crate) static MAIL_HEADER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^[ \t]*(?:from|to|subject|date):").expect("mail header pattern is valid")
});

/// `From:` line that opens an email block. Quoted (`> From:`) lines do not match.
pub(crate) static FROM_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[ \t]*from:[ \t]*(.*?)[ \t]*$").expect("from line pattern is valid")
});

/// Any header field that may appear inside an email header section.
pub(crate) static HEADER_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[ \t]*(from|to|cc|bcc|subject|date|sent|reply-to|importance|priority)[ \t]*:[ \t]*(.*?)[ \t]*$",
    )
    .expect("header field pattern is valid")
});

/// `alice [10:30]` or `[10:30] alice` at line start.
pub(crate) static CHAT_TIME_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m)^[ \t]*(?:[\w.\-]+(?:[ \t][\w.\-]+)?[ \t]+\[{TIME_TOKEN}\]|\[{TIME_TOKEN}\][ \t]*[\w.\-]+)"
    ))
    .expect("chat time pattern is valid")
});

/// Chat username beside a bracketed time token.
///
/// Group 1: `alice [10:30]`. Group 2: `[10:30] Bob Smith:`. Group 3: `[10:30] bob`.
pub(crate) static CHAT_USER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^[ \t]*(?:([\w.\-]+(?:[ \t][\w.\-]+)?)[ \t]+\[{TIME_TOKEN}\]|\[{TIME_TOKEN}\][ \t]*(?:([\w.\-]+(?:[ \t][\w.\-]+)?)[ \t]*:|([\w.\-]+)))"
    ))
    .expect("chat user pattern is valid")
});

/// `Capitalized Name:` at line start (up to four words).
pub(crate) static LABEL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*([A-Z][\w'.\-]*(?:[ \t]+[A-Z][\w'.\-]*){0,3})[ \t]*:(?:[ \t]|$)")
        .expect("label line pattern is valid")
});

/// Split a `From:` value into display name and address.
///
/// Handles `Name <addr>`, `"Name" <addr>`, `<addr>`, bare `addr`, and bare `Name`.
pub(crate) fn parse_address(value: &str) -> (String, Option<String>) {
    let value = value.trim();
    if let Some(open) = value.find('<')
        && let Some(close_rel) = value[open..].find('>')
    {
        let address = value[open + 1..open + close_rel].trim();
        let name = clean_display_name(&value[..open]);
        let email = (!address.is_empty()).then(|| address.to_string());
        return match (name.is_empty(), email) {
            (false, email) => (name, email),
            (true, Some(email)) => (email.clone(), Some(email)),
            (true, None) => (String::new(), None),
        };
    }

    if looks_like_email(value) {
        return (value.to_string(), Some(value.to_string()));
    }

    (clean_display_name(value), None)
}

fn clean_display_name(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

/// Loose `local@domain.tld` check.
pub(crate) fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !local.contains(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains(char::is_whitespace)
}
