use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A conversation participant. `id` is only stable within one capsule.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Participant {
    /// Case-insensitive display-name comparison, Unicode-aware.
    #[must_use]
    pub fn name_matches(&self, name: &str) -> bool {
        fold_case(&self.display_name) == fold_case(name)
    }

    /// Case-insensitive email comparison. `false` when this participant has no email.
    #[must_use]
    pub fn email_matches(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .is_some_and(|own| fold_case(own) == fold_case(email))
    }
}

/// Trimmed, lowercased form used for every case-insensitive name or email
/// comparison. `Zoë` and `ZOË` fold to the same key.
#[must_use]
pub fn fold_case(value: &str) -> String {
    value.trim().to_lowercase()
}

/// A participant the caller already knows about before extraction runs.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeclaredParticipant {
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl DeclaredParticipant {
    #[must_use]
    pub fn new(display_name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            display_name: display_name.into(),
            email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(name: &str, email: Option<&str>) -> Participant {
        Participant {
            id: "p1".into(),
            display_name: name.into(),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn names_match_across_non_ascii_case() {
        let zoe = participant("Zoë", None);
        assert!(zoe.name_matches("ZOË"));
        assert!(zoe.name_matches("  zoë "));
        assert!(!zoe.name_matches("Zoe"));
    }

    #[test]
    fn emails_match_across_non_ascii_case() {
        let renee = participant("Renée", Some("renée@exämple.fr"));
        assert!(renee.email_matches("RENÉE@EXÄMPLE.FR"));
        assert!(!participant("Renée", None).email_matches("renée@exämple.fr"));
    }
}
