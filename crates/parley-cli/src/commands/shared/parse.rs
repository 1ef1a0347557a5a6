use parley_core::entities::DeclaredParticipant;
use parley_core::enums::FormatHint;
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse an optional `--hint` value.
pub fn parse_hint(raw: Option<&str>) -> anyhow::Result<Option<FormatHint>> {
    raw.map(|value| {
        FormatHint::parse(value).ok_or_else(|| {
            anyhow::anyhow!("invalid hint '{value}': expected email, slack, teams, or simple")
        })
    })
    .transpose()
}

/// Parse `Name` or `Name <email>` into a declared participant.
pub fn parse_participant(raw: &str) -> anyhow::Result<DeclaredParticipant> {
    let raw = raw.trim();
    let (name, email) = match raw.split_once('<') {
        Some((name, rest)) => {
            let email = rest
                .strip_suffix('>')
                .ok_or_else(|| anyhow::anyhow!("invalid participant '{raw}': missing '>'"))?
                .trim();
            (name.trim(), Some(email.to_string()).filter(|e| !e.is_empty()))
        }
        None => (raw, None),
    };
    if name.is_empty() {
        anyhow::bail!("invalid participant '{raw}': name is empty");
    }
    Ok(DeclaredParticipant::new(name, email))
}

#[cfg(test)]
mod tests {
    use parley_core::enums::{FindingCategory, GroupBy, Severity};

    use super::*;

    #[test]
    fn parses_snake_case_enum() {
        let category: FindingCategory =
            parse_enum("question_status", "category").expect("category should parse");
        assert_eq!(category, FindingCategory::QuestionStatus);
    }

    #[test]
    fn parses_hyphenated_and_capitalized_aliases() {
        let category: FindingCategory =
            parse_enum("Action-Item", "category").expect("category should parse");
        assert_eq!(category, FindingCategory::ActionItem);
        let group: GroupBy = parse_enum("WEEK", "group_by").expect("group_by should parse");
        assert_eq!(group, GroupBy::Week);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<Severity>("urgent", "severity").expect_err("should fail");
        assert!(err.to_string().contains("invalid severity 'urgent'"));
    }

    #[test]
    fn hint_is_optional_but_checked() {
        assert_eq!(parse_hint(None).unwrap(), None);
        assert_eq!(parse_hint(Some("Slack")).unwrap(), Some(FormatHint::Slack));
        assert!(parse_hint(Some("fax")).is_err());
    }

    #[test]
    fn participant_with_and_without_email() {
        let alice = parse_participant("Alice Smith <alice@x.com>").unwrap();
        assert_eq!(alice.display_name, "Alice Smith");
        assert_eq!(alice.email.as_deref(), Some("alice@x.com"));

        let bob = parse_participant(" Bob ").unwrap();
        assert_eq!(bob.display_name, "Bob");
        assert_eq!(bob.email, None);
    }

    #[test]
    fn participant_errors() {
        assert!(parse_participant("<alice@x.com>").is_err());
        assert!(parse_participant("Alice <alice@x.com").is_err());
    }
}
