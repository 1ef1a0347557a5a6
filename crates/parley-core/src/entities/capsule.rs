use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Message, Participant};
use crate::enums::SourceFormat;

/// The canonical structured record of one conversation.
///
/// Owns its participants and messages. `metadata` is always derived from
/// them by the assembler and never set by hand.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ConversationCapsule {
    pub capsule_id: String,
    pub source_format: SourceFormat,
    pub participants: Vec<Participant>,
    pub messages: Vec<Message>,
    pub metadata: CapsuleMetadata,
}

/// Values derived from a capsule's messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CapsuleMetadata {
    pub message_count: u32,
    pub participant_count: u32,
    pub first_timestamp: Option<DateTime<Utc>>,
    pub last_timestamp: Option<DateTime<Utc>>,
    /// Participant who sent the first message in chronological order.
    pub initiator_id: Option<String>,
    pub truncated_message_count: u32,
    /// Lines the per-line fallback skipped past its line limit.
    #[serde(default)]
    pub dropped_line_count: u32,
}

impl ConversationCapsule {
    /// Look up a participant by id.
    #[must_use]
    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Every message references a participant present in this capsule.
    #[must_use]
    pub fn references_resolve(&self) -> bool {
        self.messages
            .iter()
            .all(|m| self.participant(&m.participant_id).is_some())
    }

    /// Display name of the sender of `message`, if it resolves.
    #[must_use]
    pub fn sender_name(&self, message: &Message) -> Option<&str> {
        self.participant(&message.participant_id)
            .map(|p| p.display_name.as_str())
    }
}
