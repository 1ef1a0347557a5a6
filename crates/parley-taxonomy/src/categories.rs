//! The fixed finding categories shared by every industry template.

use parley_core::enums::FindingCategory;

use crate::model::{CategoryDefinition, CategoryValue};

type ValueRow = (&'static str, &'static str);

const QUESTION_STATUS: &[ValueRow] = &[
    ("unanswered", "A question about {topic} was never answered"),
    (
        "partially_answered",
        "A question about {topic} was only partly answered",
    ),
    ("deflected", "A question about {topic} was deflected"),
    ("answered", "Questions about {topic} were answered"),
];

const TENSION_SIGNAL: &[ValueRow] = &[
    ("escalation", "Tension around {topic} escalated"),
    ("frustration", "Participants showed frustration about {topic}"),
    (
        "passive_aggression",
        "Passive-aggressive remarks surfaced around {topic}",
    ),
    ("dismissiveness", "Concerns about {topic} were dismissed"),
];

const COMMITMENT: &[ValueRow] = &[
    ("made", "A commitment was made regarding {topic}"),
    ("missed", "A commitment regarding {topic} was missed"),
    ("vague", "A commitment regarding {topic} has no clear owner or date"),
    ("at_risk", "A commitment regarding {topic} is at risk"),
];

const RESPONSE_PATTERN: &[ValueRow] = &[
    ("delayed", "Replies about {topic} were slow"),
    ("one_sided", "The discussion of {topic} was one-sided"),
    ("disengaged", "A participant disengaged from {topic}"),
    ("responsive", "Participants responded promptly on {topic}"),
];

const RISK_INDICATOR: &[ValueRow] = &[
    ("churn", "Signals of possible churn around {topic}"),
    ("legal_exposure", "Possible legal exposure related to {topic}"),
    ("compliance", "A compliance concern was raised about {topic}"),
    ("budget", "Budget pressure was mentioned in relation to {topic}"),
];

const DECISION: &[ValueRow] = &[
    ("made", "A decision was made on {topic}"),
    ("deferred", "A decision on {topic} was deferred"),
    ("reversed", "An earlier decision on {topic} was reversed"),
    ("unclear", "It is unclear whether {topic} was decided"),
];

const ACTION_ITEM: &[ValueRow] = &[
    ("assigned", "An action item on {topic} was assigned"),
    ("unassigned", "An action item on {topic} has no owner"),
    ("overdue", "An action item on {topic} is overdue"),
    ("completed", "An action item on {topic} was completed"),
];

const MISALIGNMENT: &[ValueRow] = &[
    ("expectations", "Participants hold different expectations about {topic}"),
    ("priorities", "Participants disagree on priorities for {topic}"),
    ("scope", "Participants disagree on the scope of {topic}"),
    ("timeline", "Participants disagree on the timeline for {topic}"),
];

const fn rows(category: FindingCategory) -> (&'static str, &'static [ValueRow]) {
    match category {
        FindingCategory::QuestionStatus => ("Question status", QUESTION_STATUS),
        FindingCategory::TensionSignal => ("Tension signal", TENSION_SIGNAL),
        FindingCategory::Commitment => ("Commitment", COMMITMENT),
        FindingCategory::ResponsePattern => ("Response pattern", RESPONSE_PATTERN),
        FindingCategory::RiskIndicator => ("Risk indicator", RISK_INDICATOR),
        FindingCategory::Decision => ("Decision", DECISION),
        FindingCategory::ActionItem => ("Action item", ACTION_ITEM),
        FindingCategory::Misalignment => ("Misalignment", MISALIGNMENT),
    }
}

/// All eight categories in canonical order.
#[must_use]
pub fn base_categories() -> Vec<CategoryDefinition> {
    FindingCategory::ALL
        .iter()
        .map(|&category| {
            let (display_name, values) = rows(category);
            CategoryDefinition {
                category,
                display_name: display_name.to_string(),
                values: values
                    .iter()
                    .map(|(key, template)| CategoryValue {
                        key: (*key).to_string(),
                        message_template: (*template).to_string(),
                    })
                    .collect(),
            }
        })
        .collect()
}
