//! Classification enums for Parley.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for the same representation in storage and CLI output.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// SourceFormat
// ---------------------------------------------------------------------------

/// Channel format of a raw conversation, as decided by format detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// RFC822-style header blocks (`From:`, `To:`, `Subject:`, `Date:`).
    Email,
    /// Chat lines carrying bracketed clock tokens (`alice [10:30]`).
    ChatWithTimestamps,
    /// Speaker-labeled lines (`Alice: message`).
    ChatLabeled,
    /// No recognizable structure.
    Plain,
}

impl SourceFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::ChatWithTimestamps => "chat_with_timestamps",
            Self::ChatLabeled => "chat_labeled",
            Self::Plain => "plain",
        }
    }

    /// Whether this is one of the chat variants.
    #[must_use]
    pub const fn is_chat(self) -> bool {
        matches!(self, Self::ChatWithTimestamps | Self::ChatLabeled)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FormatHint
// ---------------------------------------------------------------------------

/// Caller-declared source channel.
///
/// `Simple` is the generic default: detection overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FormatHint {
    Email,
    Slack,
    Teams,
    Simple,
}

impl FormatHint {
    /// Parse a hint string leniently. Unknown or blank hints yield `None`,
    /// which callers treat the same as an unset hint.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "email" => Some(Self::Email),
            "slack" => Some(Self::Slack),
            "teams" => Some(Self::Teams),
            "simple" => Some(Self::Simple),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Slack => "slack",
            Self::Teams => "teams",
            Self::Simple => "simple",
        }
    }
}

impl fmt::Display for FormatHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity assigned to a finding by the taxonomy rules.
///
/// ```text
/// low (baseline) < medium < high < critical
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    #[default]
    Low,
}

impl Severity {
    /// Severity used when no rule matches a finding.
    pub const BASELINE: Self = Self::Low;

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Numeric rank, higher is more severe.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 3,
            Self::High => 2,
            Self::Medium => 1,
            Self::Low => 0,
        }
    }

    /// `high` or `critical`.
    #[must_use]
    pub const fn is_high(self) -> bool {
        self.rank() >= Self::High.rank()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

/// Overall risk of one analyzed conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FindingCategory
// ---------------------------------------------------------------------------

/// The fixed set of finding categories every taxonomy carries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    QuestionStatus,
    TensionSignal,
    Commitment,
    ResponsePattern,
    RiskIndicator,
    Decision,
    ActionItem,
    Misalignment,
}

impl FindingCategory {
    /// Every category, in canonical definition order.
    pub const ALL: [Self; 8] = [
        Self::QuestionStatus,
        Self::TensionSignal,
        Self::Commitment,
        Self::ResponsePattern,
        Self::RiskIndicator,
        Self::Decision,
        Self::ActionItem,
        Self::Misalignment,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::QuestionStatus => "question_status",
            Self::TensionSignal => "tension_signal",
            Self::Commitment => "commitment",
            Self::ResponsePattern => "response_pattern",
            Self::RiskIndicator => "risk_indicator",
            Self::Decision => "decision",
            Self::ActionItem => "action_item",
            Self::Misalignment => "misalignment",
        }
    }
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// GroupBy
// ---------------------------------------------------------------------------

/// Bucket granularity for insight trends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    #[default]
    Day,
    Week,
    Month,
}

impl GroupBy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_hint_parse_is_lenient() {
        assert_eq!(FormatHint::parse(" Slack "), Some(FormatHint::Slack));
        assert_eq!(FormatHint::parse("EMAIL"), Some(FormatHint::Email));
        assert_eq!(FormatHint::parse(""), None);
        assert_eq!(FormatHint::parse("fax"), None);
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Critical.is_high());
        assert!(Severity::High.is_high());
        assert!(!Severity::Medium.is_high());
        assert_eq!(Severity::default(), Severity::BASELINE);
        assert!(Severity::Critical.rank() > Severity::Low.rank());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&SourceFormat::ChatWithTimestamps).unwrap();
        assert_eq!(json, "\"chat_with_timestamps\"");
        let cat: FindingCategory = serde_json::from_str("\"action_item\"").unwrap();
        assert_eq!(cat, FindingCategory::ActionItem);
        assert_eq!(cat.to_string(), "action_item");
    }

    #[test]
    fn category_list_is_complete() {
        assert_eq!(FindingCategory::ALL.len(), 8);
        assert_eq!(FindingCategory::ALL[0], FindingCategory::QuestionStatus);
        assert!(SourceFormat::ChatLabeled.is_chat());
        assert!(!SourceFormat::Email.is_chat());
    }
}
