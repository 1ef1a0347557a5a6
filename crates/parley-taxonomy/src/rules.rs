//! Severity rules and first-match evaluation.
//!
//! Rules are scanned in definition order (template rules, then org-custom
//! rules) and the first rule whose category, value, and condition all match
//! decides the severity. A more specific rule placed later never beats an
//! earlier wildcard.

use std::fmt;
use std::str::FromStr;

use parley_core::entities::ReportedFinding;
use parley_core::enums::{FindingCategory, Severity};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::TaxonomyError;

/// Value pattern that matches every value of a category.
pub const WILDCARD: &str = "*";

/// Predicate over the finding's topic.
///
/// Serialized as a short expression string: `*`/`always`, or `topic == <key>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RuleCondition {
    Always,
    TopicEquals(String),
}

impl RuleCondition {
    /// Whether the condition holds for `topic`. Topic comparison is exact.
    #[must_use]
    pub fn matches(&self, topic: Option<&str>) -> bool {
        match self {
            Self::Always => true,
            Self::TopicEquals(expected) => topic.is_some_and(|t| t.trim() == expected),
        }
    }
}

impl FromStr for RuleCondition {
    type Err = TaxonomyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let expr = raw.trim();
        if expr.is_empty() || expr == WILDCARD || expr.eq_ignore_ascii_case("always") {
            return Ok(Self::Always);
        }

        let (lhs, rhs) = expr
            .split_once("==")
            .ok_or_else(|| TaxonomyError::InvalidCondition(raw.to_string()))?;
        let topic = rhs.trim().trim_matches(|c| c == '"' || c == '\'').trim();
        if !lhs.trim().eq_ignore_ascii_case("topic") || topic.is_empty() || topic.contains("==") {
            return Err(TaxonomyError::InvalidCondition(raw.to_string()));
        }
        Ok(Self::TopicEquals(topic.to_string()))
    }
}

impl TryFrom<String> for RuleCondition {
    type Error = TaxonomyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RuleCondition> for String {
    fn from(condition: RuleCondition) -> Self {
        condition.to_string()
    }
}

impl fmt::Display for RuleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str(WILDCARD),
            Self::TopicEquals(topic) => write!(f, "topic == {topic}"),
        }
    }
}

/// Maps a `(category, value, topic)` triple to a severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SeverityRule {
    pub category: FindingCategory,
    /// A category value key, or `*` for any value.
    pub value: String,
    #[serde(default = "always")]
    #[schemars(with = "String")]
    pub condition: RuleCondition,
    pub severity: Severity,
}

const fn always() -> RuleCondition {
    RuleCondition::Always
}

impl SeverityRule {
    #[must_use]
    pub fn new(
        category: FindingCategory,
        value: &str,
        condition: RuleCondition,
        severity: Severity,
    ) -> Self {
        Self {
            category,
            value: value.to_string(),
            condition,
            severity,
        }
    }

    #[must_use]
    pub fn matches(&self, category: FindingCategory, value: &str, topic: Option<&str>) -> bool {
        self.category == category
            && (self.value == WILDCARD || self.value == value)
            && self.condition.matches(topic)
    }
}

/// Severity of the first rule matching `(category, value, topic)`, or
/// [`Severity::BASELINE`] when none does.
#[must_use]
pub fn evaluate(
    rules: &[SeverityRule],
    category: FindingCategory,
    value: &str,
    topic: Option<&str>,
) -> Severity {
    rules
        .iter()
        .find(|rule| rule.matches(category, value, topic))
        .map_or(Severity::BASELINE, |rule| rule.severity)
}

/// [`evaluate`] for a finding reported by the analysis collaborator.
#[must_use]
pub fn evaluate_finding(rules: &[SeverityRule], finding: &ReportedFinding) -> Severity {
    evaluate(
        rules,
        finding.category,
        &finding.value,
        finding.topic.as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn topic_is(topic: &str) -> RuleCondition {
        RuleCondition::TopicEquals(topic.to_string())
    }

    #[test]
    fn first_match_wins_over_more_specific_later_rule() {
        let rules = vec![
            SeverityRule::new(
                FindingCategory::TensionSignal,
                "x",
                topic_is("foo"),
                Severity::High,
            ),
            SeverityRule::new(
                FindingCategory::TensionSignal,
                WILDCARD,
                topic_is("foo"),
                Severity::Critical,
            ),
        ];
        assert_eq!(
            evaluate(&rules, FindingCategory::TensionSignal, "x", Some("foo")),
            Severity::High
        );
        assert_eq!(
            evaluate(&rules, FindingCategory::TensionSignal, "y", Some("foo")),
            Severity::Critical
        );
    }

    #[test]
    fn earlier_wildcard_shadows_later_exact_rule() {
        let rules = vec![
            SeverityRule::new(
                FindingCategory::RiskIndicator,
                WILDCARD,
                RuleCondition::Always,
                Severity::Medium,
            ),
            SeverityRule::new(
                FindingCategory::RiskIndicator,
                "churn",
                RuleCondition::Always,
                Severity::Critical,
            ),
        ];
        assert_eq!(
            evaluate(&rules, FindingCategory::RiskIndicator, "churn", None),
            Severity::Medium
        );
    }

    #[test]
    fn no_match_falls_back_to_baseline() {
        let rules = vec![SeverityRule::new(
            FindingCategory::Commitment,
            "missed",
            topic_is("billing"),
            Severity::High,
        )];
        assert_eq!(
            evaluate(&rules, FindingCategory::Commitment, "missed", Some("scope")),
            Severity::BASELINE
        );
        assert_eq!(
            evaluate(&rules, FindingCategory::Commitment, "missed", None),
            Severity::BASELINE
        );
        assert_eq!(
            evaluate(&[], FindingCategory::Decision, "made", None),
            Severity::Low
        );
    }

    #[rstest]
    #[case("*", RuleCondition::Always)]
    #[case("always", RuleCondition::Always)]
    #[case("", RuleCondition::Always)]
    #[case("topic == billing", topic_is("billing"))]
    #[case("topic==billing", topic_is("billing"))]
    #[case("Topic == \"hipaa\"", topic_is("hipaa"))]
    fn parses_conditions(#[case] raw: &str, #[case] expected: RuleCondition) {
        assert_eq!(raw.parse::<RuleCondition>().unwrap(), expected);
    }

    #[rstest]
    #[case("topic != billing")]
    #[case("value == x")]
    #[case("topic == ")]
    #[case("topic == a == b")]
    fn rejects_other_expressions(#[case] raw: &str) {
        assert!(matches!(
            raw.parse::<RuleCondition>(),
            Err(TaxonomyError::InvalidCondition(_))
        ));
    }

    #[test]
    fn condition_roundtrips_as_string() {
        let rule = SeverityRule::new(
            FindingCategory::Decision,
            "reversed",
            topic_is("scope"),
            Severity::Medium,
        );
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["condition"], "topic == scope");
        let back: SeverityRule = serde_json::from_value(json).unwrap();
        assert_eq!(back, rule);
    }
}
