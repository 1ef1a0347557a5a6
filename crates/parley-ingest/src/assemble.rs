//! Capsule assembly: participant resolution, ordering, identifiers, metadata.

use parley_core::entities::{CapsuleMetadata, ConversationCapsule, Message, Participant};
use parley_core::enums::SourceFormat;
use parley_core::ids::{PREFIX_CAPSULE, PREFIX_MESSAGE, PREFIX_PARTICIPANT, format_id, sequential_id};
use sha2::{Digest, Sha256};

use crate::extract::{ExtractedMessage, Extraction};
use crate::names::Roster;

/// Display name given to a message whose sender label is blank.
const UNKNOWN_SENDER: &str = "Unknown";

/// Hex digits of the content hash kept in a capsule id.
const CAPSULE_HASH_LEN: usize = 12;

/// Build a capsule from discovered participants and extracted messages.
///
/// Each sender resolves to a participant by display name, then by email;
/// senders that resolve to nobody become new participants, so every message
/// always references a participant in the capsule. Participants no message
/// references are left out; the rest are numbered in order of first
/// appearance. Messages are sorted by timestamp only when all
/// of them carry one; otherwise extraction order is kept.
#[must_use]
pub fn assemble(
    participants: &[Participant],
    messages: impl Into<Extraction>,
    format: SourceFormat,
) -> ConversationCapsule {
    let Extraction {
        messages,
        dropped_line_count,
    } = messages.into();
    let mut roster = Roster::from_participants(participants);

    let mut resolved: Vec<(usize, ExtractedMessage)> = messages
        .into_iter()
        .filter(|m| !m.content.trim().is_empty())
        .map(|m| {
            let name = if m.sender.trim().is_empty() {
                UNKNOWN_SENDER
            } else {
                m.sender.as_str()
            };
            let (index, created) = roster.resolve(name, m.sender_email.as_deref());
            if created {
                tracing::debug!(sender = name, "created ad-hoc participant");
            }
            (index, m)
        })
        .collect();

    if !resolved.is_empty() && resolved.iter().all(|(_, m)| m.timestamp.is_some()) {
        resolved.sort_by_key(|(_, m)| m.timestamp);
    }

    // Renumber referenced participants in order of first appearance.
    let mut referenced: Vec<usize> = Vec::new();
    for (index, _) in &resolved {
        if !referenced.contains(index) {
            referenced.push(*index);
        }
    }

    let final_participants: Vec<Participant> = referenced
        .iter()
        .enumerate()
        .filter_map(|(n, &index)| {
            roster.get(index).map(|p| Participant {
                id: sequential_id(PREFIX_PARTICIPANT, n),
                display_name: p.display_name.clone(),
                email: p.email.clone(),
            })
        })
        .collect();
    let new_id = |index: usize| -> String {
        let position = referenced
            .iter()
            .position(|&r| r == index)
            .unwrap_or_default();
        sequential_id(PREFIX_PARTICIPANT, position)
    };

    let truncated_message_count = count_u32(resolved.iter().filter(|(_, m)| m.truncated).count());
    let final_messages: Vec<Message> = resolved
        .into_iter()
        .enumerate()
        .map(|(n, (index, m))| Message {
            id: sequential_id(PREFIX_MESSAGE, n),
            participant_id: new_id(index),
            content: m.content,
            timestamp: m.timestamp,
            time_label: m.time_label,
        })
        .collect();

    let metadata = CapsuleMetadata {
        message_count: count_u32(final_messages.len()),
        participant_count: count_u32(final_participants.len()),
        first_timestamp: final_messages.iter().filter_map(|m| m.timestamp).min(),
        last_timestamp: final_messages.iter().filter_map(|m| m.timestamp).max(),
        initiator_id: final_messages.first().map(|m| m.participant_id.clone()),
        truncated_message_count,
        dropped_line_count: count_u32(dropped_line_count),
    };

    let capsule_id = capsule_id(format, &final_participants, &final_messages);
    tracing::debug!(
        %capsule_id,
        %format,
        messages = metadata.message_count,
        participants = metadata.participant_count,
        "assembled capsule"
    );

    ConversationCapsule {
        capsule_id,
        source_format: format,
        participants: final_participants,
        messages: final_messages,
        metadata,
    }
}

/// `cap-` + first 12 hex digits of SHA-256 over format, senders, and content.
fn capsule_id(format: SourceFormat, participants: &[Participant], messages: &[Message]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format.as_str().as_bytes());
    for message in messages {
        let sender = participants
            .iter()
            .find(|p| p.id == message.participant_id)
            .map_or("", |p| p.display_name.as_str());
        hasher.update([0x1e]);
        hasher.update(sender.as_bytes());
        hasher.update([0x1f]);
        hasher.update(message.content.as_bytes());
        if let Some(ts) = message.timestamp {
            hasher.update([0x1f]);
            hasher.update(ts.to_rfc3339().as_bytes());
        }
    }
    let digest = format!("{:x}", hasher.finalize());
    format_id(PREFIX_CAPSULE, &digest[..CAPSULE_HASH_LEN])
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn extracted(sender: &str, content: &str) -> ExtractedMessage {
        ExtractedMessage {
            sender: sender.into(),
            sender_email: None,
            content: content.into(),
            timestamp: None,
            time_label: None,
            truncated: false,
        }
    }

    fn participant(id: &str, name: &str, email: Option<&str>) -> Participant {
        Participant {
            id: id.into(),
            display_name: name.into(),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn senders_resolve_case_insensitively() {
        let people = vec![participant("p1", "Alice", None), participant("p2", "Bob", None)];
        let capsule = assemble(
            &people,
            vec![extracted("alice", "hi"), extracted("BOB", "hey")],
            SourceFormat::ChatLabeled,
        );
        assert_eq!(capsule.participants.len(), 2);
        assert_eq!(capsule.messages[0].participant_id, "p1");
        assert_eq!(capsule.messages[1].participant_id, "p2");
        assert!(capsule.references_resolve());
    }

    #[test]
    fn sender_resolves_by_email_when_name_differs() {
        let people = vec![participant("p1", "Robert Jones", Some("bob@x.com"))];
        let mut message = extracted("Bob", "ok");
        message.sender_email = Some("bob@x.com".into());
        let capsule = assemble(&people, vec![message], SourceFormat::Email);
        assert_eq!(capsule.participants.len(), 1);
        assert_eq!(capsule.participants[0].display_name, "Robert Jones");
    }

    #[test]
    fn unknown_senders_become_participants() {
        let capsule = assemble(
            &[],
            vec![extracted("Carol", "hello"), extracted("", "anonymous")],
            SourceFormat::Plain,
        );
        let names: Vec<_> = capsule
            .participants
            .iter()
            .map(|p| p.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["Carol", UNKNOWN_SENDER]);
        assert!(capsule.references_resolve());
    }

    #[test]
    fn silent_participants_are_left_out_and_ids_renumbered() {
        let people = vec![
            participant("p1", "Action Items", None),
            participant("p2", "Alice", None),
        ];
        let capsule = assemble(&people, vec![extracted("Alice", "hi")], SourceFormat::ChatLabeled);
        assert_eq!(capsule.participants, vec![participant("p1", "Alice", None)]);
        assert_eq!(capsule.messages[0].participant_id, "p1");
    }

    #[test]
    fn fully_dated_messages_sort_chronologically() {
        let mut late = extracted("Bob", "second");
        late.timestamp = Some(Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap());
        let mut early = extracted("Alice", "first");
        early.timestamp = Some(Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap());

        let capsule = assemble(&[], vec![late, early], SourceFormat::Email);
        assert_eq!(capsule.messages[0].content, "first");
        assert_eq!(capsule.messages[0].id, "m1");
        assert_eq!(capsule.metadata.initiator_id.as_deref(), Some("p1"));
        assert_eq!(capsule.participants[0].display_name, "Alice");
        assert_eq!(
            capsule.metadata.first_timestamp,
            Some(Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap())
        );
        assert_eq!(
            capsule.metadata.last_timestamp,
            Some(Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn partially_dated_messages_keep_extraction_order() {
        let mut dated = extracted("Bob", "dated");
        dated.timestamp = Some(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap());
        let capsule = assemble(
            &[],
            vec![extracted("Alice", "undated"), dated],
            SourceFormat::Email,
        );
        assert_eq!(capsule.messages[0].content, "undated");
        assert_eq!(capsule.metadata.initiator_id.as_deref(), Some("p1"));
    }

    #[test]
    fn metadata_counts_truncation() {
        let mut long = extracted("Alice", "abc [truncated]");
        long.truncated = true;
        let capsule = assemble(&[], vec![long, extracted("Bob", "ok")], SourceFormat::ChatLabeled);
        assert_eq!(capsule.metadata.message_count, 2);
        assert_eq!(capsule.metadata.participant_count, 2);
        assert_eq!(capsule.metadata.truncated_message_count, 1);
    }

    #[test]
    fn capsule_id_is_deterministic() {
        let build = || assemble(&[], vec![extracted("Alice", "hi")], SourceFormat::ChatLabeled);
        let a = build();
        let b = build();
        assert_eq!(a.capsule_id, b.capsule_id);
        assert!(a.capsule_id.starts_with("cap-"));
        assert_eq!(a.capsule_id.len(), "cap-".len() + CAPSULE_HASH_LEN);

        let other = assemble(&[], vec![extracted("Alice", "bye")], SourceFormat::ChatLabeled);
        assert_ne!(a.capsule_id, other.capsule_id);
    }
}
