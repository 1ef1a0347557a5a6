//! Participant discovery and the case-insensitive roster shared with assembly.

use parley_core::entities::{DeclaredParticipant, Participant};
use parley_core::ids::{PREFIX_PARTICIPANT, sequential_id};

use crate::patterns::{CHAT_USER_LINE, FROM_LINE, LABEL_LINE, is_stop_word, parse_address};

/// Ordered, deduplicated participant list.
///
/// A name matches an existing entry when the display names are equal
/// ignoring case and the emails do not conflict. A name that does not match
/// still resolves to an entry carrying the same email.
#[derive(Debug, Default, Clone)]
pub(crate) struct Roster {
    entries: Vec<Participant>,
}

impl Roster {
    pub(crate) fn from_participants(participants: &[Participant]) -> Self {
        Self {
            entries: participants.to_vec(),
        }
    }

    /// Index of the entry `name`/`email` refers to, if any.
    pub(crate) fn find(&self, name: &str, email: Option<&str>) -> Option<usize> {
        let by_name = self.entries.iter().position(|entry| {
            entry.name_matches(name)
                && match (entry.email.as_deref(), email) {
                    (Some(_), Some(email)) => entry.email_matches(email),
                    _ => true,
                }
        });
        by_name.or_else(|| {
            let email = email?;
            self.entries
                .iter()
                .position(|entry| entry.email_matches(email))
        })
    }

    /// Resolve to an existing entry or append a new one. Returns the entry index
    /// and whether it was newly created.
    pub(crate) fn resolve(&mut self, name: &str, email: Option<&str>) -> (usize, bool) {
        if let Some(index) = self.find(name, email) {
            let entry = &mut self.entries[index];
            if entry.email.is_none() {
                entry.email = email.map(str::to_string);
            }
            return (index, false);
        }

        let index = self.entries.len();
        self.entries.push(Participant {
            id: sequential_id(PREFIX_PARTICIPANT, index),
            display_name: name.trim().to_string(),
            email: email.map(str::to_string),
        });
        (index, true)
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Participant> {
        self.entries.get(index)
    }

    pub(crate) fn into_participants(self) -> Vec<Participant> {
        self.entries
    }
}

/// Discover conversation participants from raw text.
///
/// Declared participants come first. The text is then scanned line by line
/// for `From:` headers, chat usernames next to a bracketed time, and
/// `Capitalized Name:` labels that are not header words. Names are
/// deduplicated ignoring case in first-seen order and numbered `p1..`.
#[must_use]
pub fn discover_participants(text: &str, declared: &[DeclaredParticipant]) -> Vec<Participant> {
    let mut roster = Roster::default();
    for participant in declared {
        let name = participant.display_name.trim();
        if name.is_empty() {
            continue;
        }
        roster.resolve(name, participant.email.as_deref());
    }

    for line in text.lines() {
        if let Some((name, email)) = name_on_line(line) {
            roster.resolve(&name, email.as_deref());
        }
    }

    let participants = roster.into_participants();
    tracing::debug!(
        declared = declared.len(),
        discovered = participants.len(),
        "participant discovery complete"
    );
    participants
}

fn name_on_line(line: &str) -> Option<(String, Option<String>)> {
    if let Some(caps) = FROM_LINE.captures(line) {
        let (name, email) = parse_address(caps.get(1).map_or("", |m| m.as_str()));
        return (!name.is_empty()).then_some((name, email));
    }

    if let Some(caps) = CHAT_USER_LINE.captures(line) {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().trim())?;
        return (!is_stop_word(name)).then(|| (name.to_string(), None));
    }

    let caps = LABEL_LINE.captures(line)?;
    let label = caps.get(1)?.as_str().trim();
    (!is_stop_word(label)).then(|| (label.to_string(), None))
}
