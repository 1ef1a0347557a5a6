//! Turns a collaborator's `AnalysisReport` into a gradable, storable record.

use chrono::{DateTime, Utc};
use parley_core::entities::{AnalysisReport, ConversationCapsule, GradedFinding, StoredInsight};
use parley_core::errors::CoreError;
use parley_core::ids::{PREFIX_INSIGHT, format_id};
use parley_taxonomy::{SeverityRule, evaluate_finding};
use sha2::{Digest, Sha256};

use crate::error::InsightError;

const INSIGHT_HASH_LEN: usize = 12;

/// Grade every reported finding against `rules`, keeping report order.
/// Evidence snippets are dropped.
#[must_use]
pub fn grade_report(report: &AnalysisReport, rules: &[SeverityRule]) -> Vec<GradedFinding> {
    report
        .findings
        .iter()
        .map(|finding| GradedFinding {
            category: finding.category,
            value: finding.value.clone(),
            topic: finding.topic.clone(),
            severity: evaluate_finding(rules, finding),
        })
        .collect()
}

/// Build the append-only record for one analyzed capsule.
///
/// # Errors
///
/// Returns `InsightError::Core` if the report names a different capsule, the
/// organization id is blank, or the health score is out of range.
pub fn build_insight(
    organization_id: &str,
    user_id: Option<String>,
    capsule: &ConversationCapsule,
    report: &AnalysisReport,
    rules: &[SeverityRule],
    now: DateTime<Utc>,
) -> Result<StoredInsight, InsightError> {
    if let Some(reported) = report
        .capsule_id
        .as_ref()
        .filter(|reported| **reported != capsule.capsule_id)
    {
        return Err(CoreError::Validation(format!(
            "report is for capsule {reported}, not {}",
            capsule.capsule_id
        ))
        .into());
    }

    let findings = grade_report(report, rules);
    let insight = StoredInsight::for_capsule(
        insight_id(organization_id, &capsule.capsule_id, now),
        organization_id,
        user_id,
        now,
        capsule,
        report.overall_risk,
        report.health_score,
        findings,
    )?;
    tracing::debug!(
        id = %insight.id,
        capsule = %capsule.capsule_id,
        findings = insight.findings.len(),
        "built insight"
    );
    Ok(insight)
}

fn insight_id(organization_id: &str, capsule_id: &str, now: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(organization_id.as_bytes());
    hasher.update([0x1f]);
    hasher.update(capsule_id.as_bytes());
    hasher.update([0x1f]);
    hasher.update(now.to_rfc3339().as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format_id(PREFIX_INSIGHT, &digest[..INSIGHT_HASH_LEN])
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use parley_core::entities::{CapsuleMetadata, ReportedFinding};
    use parley_core::enums::{FindingCategory, RiskLevel, Severity, SourceFormat};
    use parley_taxonomy::RuleCondition;
    use pretty_assertions::assert_eq;

    use super::*;

    fn capsule() -> ConversationCapsule {
        ConversationCapsule {
            capsule_id: "cap-0123456789ab".into(),
            source_format: SourceFormat::ChatLabeled,
            participants: Vec::new(),
            messages: Vec::new(),
            metadata: CapsuleMetadata {
                message_count: 6,
                participant_count: 3,
                ..CapsuleMetadata::default()
            },
        }
    }

    fn report(capsule_id: Option<&str>, health_score: u8) -> AnalysisReport {
        AnalysisReport {
            capsule_id: capsule_id.map(str::to_string),
            overall_risk: RiskLevel::Medium,
            health_score,
            findings: vec![
                ReportedFinding {
                    category: FindingCategory::QuestionStatus,
                    value: "unanswered".into(),
                    topic: Some("billing".into()),
                    evidence: vec!["can you send the invoice?".into()],
                },
                ReportedFinding {
                    category: FindingCategory::Decision,
                    value: "made".into(),
                    topic: None,
                    evidence: Vec::new(),
                },
            ],
        }
    }

    fn rules() -> Vec<SeverityRule> {
        vec![SeverityRule::new(
            FindingCategory::QuestionStatus,
            "unanswered",
            RuleCondition::Always,
            Severity::Medium,
        )]
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap()
    }

    #[test]
    fn grades_in_report_order_with_baseline_fallback() {
        let graded = grade_report(&report(None, 70), &rules());
        assert_eq!(
            graded.iter().map(|f| f.severity).collect::<Vec<_>>(),
            vec![Severity::Medium, Severity::BASELINE]
        );
        assert_eq!(graded[0].topic.as_deref(), Some("billing"));
    }

    #[test]
    fn build_insight_copies_capsule_counts() {
        let insight = build_insight(
            "acme",
            Some("u-7".into()),
            &capsule(),
            &report(Some("cap-0123456789ab"), 70),
            &rules(),
            now(),
        )
        .unwrap();
        assert!(insight.id.starts_with("ins-"));
        assert_eq!(insight.id.len(), 4 + INSIGHT_HASH_LEN);
        assert_eq!(insight.participant_count, 3);
        assert_eq!(insight.message_count, 6);
        assert_eq!(insight.source_type, SourceFormat::ChatLabeled);
        assert_eq!(insight.timestamp, now());
        assert_eq!(insight.findings.len(), 2);
    }

    #[test]
    fn insight_id_is_deterministic() {
        let a = build_insight("acme", None, &capsule(), &report(None, 70), &rules(), now()).unwrap();
        let b = build_insight("acme", None, &capsule(), &report(None, 70), &rules(), now()).unwrap();
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn mismatched_capsule_is_rejected() {
        let err = build_insight(
            "acme",
            None,
            &capsule(),
            &report(Some("cap-ffffffffffff"), 70),
            &rules(),
            now(),
        )
        .unwrap_err();
        assert!(matches!(err, InsightError::Core(CoreError::Validation(_))));
    }

    #[test]
    fn out_of_range_health_is_rejected() {
        let err =
            build_insight("acme", None, &capsule(), &report(None, 150), &rules(), now()).unwrap_err();
        assert!(matches!(err, InsightError::Core(CoreError::Validation(_))));
    }
}
