//! Built-in industry templates.
//!
//! Every template is the default layer plus an industry layer. The industry
//! layer only adds topics, roles, and rules. Its rules are placed ahead of
//! the default rules so they can refine the broad defaults under first-match
//! evaluation.

use parley_core::enums::{FindingCategory, Severity};

use crate::categories::base_categories;
use crate::error::TaxonomyError;
use crate::model::{KeywordEntry, TaxonomyDefinition};
use crate::rules::{RuleCondition, SeverityRule, WILDCARD};

pub const DEFAULT_INDUSTRY: &str = "default";

type EntryRow = (&'static str, &'static str, &'static [&'static str]);

/// `(category, value, topic condition, severity)`; `None` topic means always.
type RuleRow = (FindingCategory, &'static str, Option<&'static str>, Severity);

struct Layer {
    key: &'static str,
    topics: &'static [EntryRow],
    roles: &'static [EntryRow],
    rules: &'static [RuleRow],
}

const DEFAULT_LAYER: Layer = Layer {
    key: DEFAULT_INDUSTRY,
    topics: &[
        ("billing", "Billing", &["invoice", "billing", "payment", "refund", "charge"]),
        ("timeline", "Timeline", &["deadline", "due date", "schedule", "delay", "eta"]),
        ("scope", "Scope", &["scope", "requirement", "feature request", "change request"]),
        ("quality", "Quality", &["bug", "defect", "broken", "quality", "error"]),
        ("staffing", "Staffing", &["hire", "hiring", "resign", "headcount", "staffing"]),
    ],
    roles: &[
        ("manager", "Manager", &["manager", "lead", "director", "head of"]),
        ("client", "Client", &["client", "customer", "account"]),
        ("vendor", "Vendor", &["vendor", "supplier", "contractor"]),
        ("team_member", "Team member", &["team", "colleague", "engineer", "analyst"]),
    ],
    rules: &[
        (FindingCategory::TensionSignal, "escalation", None, Severity::High),
        (FindingCategory::Commitment, "missed", None, Severity::High),
        (FindingCategory::RiskIndicator, "legal_exposure", None, Severity::High),
        (FindingCategory::RiskIndicator, WILDCARD, None, Severity::Medium),
        (FindingCategory::QuestionStatus, "unanswered", None, Severity::Medium),
        (FindingCategory::ActionItem, "overdue", None, Severity::Medium),
        (FindingCategory::Misalignment, WILDCARD, None, Severity::Medium),
        (FindingCategory::TensionSignal, WILDCARD, None, Severity::Medium),
    ],
};

const INDUSTRY_LAYERS: &[Layer] = &[
    Layer {
        key: "legal",
        topics: &[
            ("contract", "Contract", &["contract", "agreement", "clause", "amendment"]),
            ("litigation", "Litigation", &["lawsuit", "litigation", "court", "subpoena"]),
            ("filing_deadline", "Filing deadline", &["filing", "statute of limitations", "court date"]),
        ],
        roles: &[
            ("attorney", "Attorney", &["attorney", "counsel", "lawyer", "partner"]),
            ("paralegal", "Paralegal", &["paralegal"]),
            ("opposing_counsel", "Opposing counsel", &["opposing counsel", "other side"]),
        ],
        rules: &[
            (FindingCategory::Commitment, "missed", Some("filing_deadline"), Severity::Critical),
            (FindingCategory::RiskIndicator, WILDCARD, Some("litigation"), Severity::Critical),
        ],
    },
    Layer {
        key: "healthcare",
        topics: &[
            ("patient_care", "Patient care", &["patient", "treatment", "care plan", "diagnosis"]),
            ("hipaa", "HIPAA", &["hipaa", "phi", "medical record", "privacy"]),
            ("scheduling", "Scheduling", &["appointment", "shift", "on call", "rota"]),
        ],
        roles: &[
            ("clinician", "Clinician", &["doctor", "nurse", "physician", "clinician"]),
            ("patient", "Patient", &["patient"]),
            ("administrator", "Administrator", &["administrator", "admin", "office manager"]),
        ],
        rules: &[
            (FindingCategory::RiskIndicator, "compliance", Some("hipaa"), Severity::Critical),
            (FindingCategory::QuestionStatus, "unanswered", Some("patient_care"), Severity::High),
        ],
    },
    Layer {
        key: "finance",
        topics: &[
            ("audit", "Audit", &["audit", "auditor", "reconciliation"]),
            ("regulatory", "Regulatory", &["sec", "finra", "regulator", "regulatory", "kyc"]),
            ("transactions", "Transactions", &["wire", "transfer", "trade", "settlement"]),
        ],
        roles: &[
            ("advisor", "Advisor", &["advisor", "adviser", "planner"]),
            ("auditor", "Auditor", &["auditor"]),
            ("compliance_officer", "Compliance officer", &["compliance officer", "compliance team"]),
        ],
        rules: &[
            (FindingCategory::RiskIndicator, "compliance", Some("regulatory"), Severity::Critical),
            (FindingCategory::Commitment, "missed", Some("audit"), Severity::Critical),
        ],
    },
    Layer {
        key: "retail",
        topics: &[
            ("inventory", "Inventory", &["stock", "inventory", "out of stock", "backorder"]),
            ("returns", "Returns", &["return", "exchange", "rma"]),
            ("fulfillment", "Fulfillment", &["shipping", "delivery", "fulfillment", "order"]),
        ],
        roles: &[
            ("store_manager", "Store manager", &["store manager", "shift lead"]),
            ("supplier", "Supplier", &["supplier", "distributor", "wholesaler"]),
            ("shopper", "Shopper", &["shopper", "buyer"]),
        ],
        rules: &[
            (FindingCategory::Commitment, "missed", Some("fulfillment"), Severity::Critical),
            (FindingCategory::RiskIndicator, "churn", Some("returns"), Severity::High),
        ],
    },
    Layer {
        key: "technology",
        topics: &[
            ("outage", "Outage", &["outage", "downtime", "incident", "sev1", "pager"]),
            ("security", "Security", &["security", "vulnerability", "breach", "cve"]),
            ("release", "Release", &["release", "deploy", "rollout", "launch"]),
        ],
        roles: &[
            ("engineer", "Engineer", &["engineer", "developer", "sre"]),
            ("product_manager", "Product manager", &["product manager", "pm"]),
            ("customer_success", "Customer success", &["customer success", "csm", "support"]),
        ],
        rules: &[
            (FindingCategory::RiskIndicator, WILDCARD, Some("security"), Severity::Critical),
            (FindingCategory::TensionSignal, "escalation", Some("outage"), Severity::Critical),
            (FindingCategory::Commitment, "missed", Some("release"), Severity::High),
        ],
    },
];

/// Industry keys with a built-in template, `default` first.
#[must_use]
pub fn available_industries() -> Vec<&'static str> {
    std::iter::once(DEFAULT_LAYER.key)
        .chain(INDUSTRY_LAYERS.iter().map(|layer| layer.key))
        .collect()
}

/// Build the template for `industry` (case-insensitive).
///
/// # Errors
///
/// Returns [`TaxonomyError::UnknownIndustry`] if no template carries that key.
pub fn resolve(industry: &str) -> Result<TaxonomyDefinition, TaxonomyError> {
    let key = industry.trim().to_ascii_lowercase();
    if key == DEFAULT_INDUSTRY {
        return Ok(build(DEFAULT_INDUSTRY, None));
    }

    INDUSTRY_LAYERS
        .iter()
        .find(|layer| layer.key == key)
        .map(|layer| build(layer.key, Some(layer)))
        .ok_or_else(|| TaxonomyError::UnknownIndustry(industry.to_string()))
}

fn build(key: &str, industry: Option<&Layer>) -> TaxonomyDefinition {
    let layers: Vec<&Layer> = std::iter::once(&DEFAULT_LAYER).chain(industry).collect();

    let topics = layers
        .iter()
        .flat_map(|layer| layer.topics.iter().map(entry))
        .collect();
    let roles = layers
        .iter()
        .flat_map(|layer| layer.roles.iter().map(entry))
        .collect();
    let severity_rules = industry
        .into_iter()
        .chain(std::iter::once(&DEFAULT_LAYER))
        .flat_map(|layer| layer.rules.iter().map(rule))
        .collect();

    TaxonomyDefinition {
        industry: key.to_string(),
        categories: base_categories(),
        topics,
        roles,
        severity_rules,
    }
}

fn entry(&(key, display_name, keywords): &EntryRow) -> KeywordEntry {
    KeywordEntry::new(key, display_name, keywords)
}

fn rule(&(category, value, topic, severity): &RuleRow) -> SeverityRule {
    let condition = topic.map_or(RuleCondition::Always, |t| {
        RuleCondition::TopicEquals(t.to_string())
    });
    SeverityRule::new(category, value, condition, severity)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::rules::evaluate;

    #[test]
    fn lists_all_industries() {
        assert_eq!(
            available_industries(),
            vec!["default", "legal", "healthcare", "finance", "retail", "technology"]
        );
    }

    #[rstest]
    #[case("legal")]
    #[case("healthcare")]
    #[case("finance")]
    #[case("retail")]
    #[case("technology")]
    fn industry_templates_extend_default(#[case] industry: &str) {
        let base = resolve(DEFAULT_INDUSTRY).unwrap();
        let template = resolve(industry).unwrap();

        assert_eq!(template.industry, industry);
        assert_eq!(template.categories, base.categories);
        for topic in &base.topics {
            assert!(template.topic(&topic.key).is_some(), "{industry} lost {}", topic.key);
        }
        for role in &base.roles {
            assert!(template.role(&role.key).is_some(), "{industry} lost {}", role.key);
        }
        for rule in &base.severity_rules {
            assert!(template.severity_rules.contains(rule));
        }
        assert!(template.topics.len() > base.topics.len());
    }

    #[test]
    fn keys_are_unique_within_each_template() {
        for industry in available_industries() {
            let template = resolve(industry).unwrap();
            let mut keys: Vec<_> = template.topics.iter().map(|t| &t.key).collect();
            keys.extend(template.roles.iter().map(|r| &r.key));
            let total = keys.len();
            keys.sort();
            keys.dedup();
            assert_eq!(total, keys.len(), "duplicate key in {industry}");
        }
    }

    #[test]
    fn industry_rules_refine_defaults() {
        let tech = resolve("technology").unwrap();
        assert_eq!(
            evaluate(&tech.severity_rules, FindingCategory::RiskIndicator, "budget", Some("security")),
            Severity::Critical
        );
        assert_eq!(
            evaluate(&tech.severity_rules, FindingCategory::RiskIndicator, "budget", Some("billing")),
            Severity::Medium
        );
    }

    #[test]
    fn lookup_is_case_insensitive_and_rejects_unknown() {
        assert_eq!(resolve(" Legal ").unwrap().industry, "legal");
        assert!(matches!(
            resolve("aerospace"),
            Err(TaxonomyError::UnknownIndustry(_))
        ));
    }
}
