use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One message of a conversation, linked to a participant of the same capsule.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub participant_id: String,
    /// Never empty. Bounded in length; truncated bodies end with the configured marker.
    pub content: String,
    /// Full timestamp parsed from the source text, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Clock token without a date (e.g. chat `10:30 AM`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_label: Option<String>,
}
