//! Record insights through the JSONL store and aggregate them back.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use parley_core::entities::{
    AnalysisReport, CapsuleMetadata, ConversationCapsule, ReportedFinding,
};
use parley_core::enums::{FindingCategory, GroupBy, RiskLevel, Severity, SourceFormat};
use parley_insights::{InsightAggregator, JsonlInsightStore, build_insight};
use parley_schema::SchemaRegistry;
use pretty_assertions::assert_eq;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 31, 18, 0, 0).unwrap()
}

fn capsule(id: &str, format: SourceFormat) -> ConversationCapsule {
    ConversationCapsule {
        capsule_id: id.into(),
        source_format: format,
        participants: Vec::new(),
        messages: Vec::new(),
        metadata: CapsuleMetadata {
            message_count: 4,
            participant_count: 2,
            ..CapsuleMetadata::default()
        },
    }
}

fn report(
    risk: RiskLevel,
    health: u8,
    findings: &[(FindingCategory, &str, Option<&str>)],
) -> AnalysisReport {
    AnalysisReport {
        capsule_id: None,
        overall_risk: risk,
        health_score: health,
        findings: findings
            .iter()
            .map(|(category, value, topic)| ReportedFinding {
                category: *category,
                value: (*value).to_string(),
                topic: topic.map(str::to_string),
                evidence: Vec::new(),
            })
            .collect(),
    }
}

fn seeded_store(dir: &std::path::Path) -> JsonlInsightStore {
    let store = JsonlInsightStore::new(dir.join("insights"));
    let schema = SchemaRegistry::new();
    let rules = parley_taxonomy::resolve("default").unwrap().severity_rules;

    let records = [
        (
            capsule("cap-aaaaaaaaaaaa", SourceFormat::Email),
            report(
                RiskLevel::High,
                35,
                &[
                    (FindingCategory::Commitment, "missed", Some("timeline")),
                    (FindingCategory::TensionSignal, "frustration", Some("timeline")),
                ],
            ),
            2,
        ),
        (
            capsule("cap-bbbbbbbbbbbb", SourceFormat::ChatLabeled),
            report(
                RiskLevel::Low,
                85,
                &[(FindingCategory::QuestionStatus, "answered", Some("billing"))],
            ),
            2,
        ),
        (
            capsule("cap-cccccccccccc", SourceFormat::Email),
            report(RiskLevel::Medium, 60, &[]),
            20,
        ),
        (
            capsule("cap-dddddddddddd", SourceFormat::Plain),
            report(RiskLevel::High, 20, &[]),
            90,
        ),
    ];
    for (capsule, report, days_ago) in records {
        let at = now() - TimeDelta::days(days_ago);
        let insight = build_insight("acme", None, &capsule, &report, &rules, at).unwrap();
        store.append_validated(&insight, &schema).unwrap();
    }
    store
}

#[test]
fn summary_over_recorded_insights() {
    let dir = tempfile::tempdir().unwrap();
    let aggregator = InsightAggregator::new(seeded_store(dir.path()));

    let summary = aggregator.get_dashboard_summary_at(now(), "acme", 30).unwrap();
    assert_eq!(summary.total_conversations, 3);
    assert_eq!((summary.risk.high, summary.risk.medium, summary.risk.low), (1, 1, 1));
    assert!((summary.average_health_score - 60.0).abs() < f64::EPSILON);
    assert_eq!(summary.conversations_by_source.get("email"), Some(&2));
    assert_eq!(summary.conversations_by_source.get("chat_labeled"), Some(&1));
    assert_eq!(summary.findings_by_category.get("commitment"), Some(&1));
}

#[test]
fn trends_are_sparse() {
    let dir = tempfile::tempdir().unwrap();
    let aggregator = InsightAggregator::new(seeded_store(dir.path()));

    let series = aggregator
        .get_trends_at(now(), "acme", 30, GroupBy::Day)
        .unwrap();
    let keys: Vec<_> = series.buckets.iter().map(|b| b.bucket.clone()).collect();
    assert_eq!(keys, vec!["2026-03-11".to_string(), "2026-03-29".to_string()]);
    assert_eq!(series.buckets[1].conversations, 2);
    assert_eq!(series.buckets[1].high_risk, 1);

    let monthly = aggregator
        .get_trends_at(now(), "acme", 120, GroupBy::Month)
        .unwrap();
    let keys: Vec<_> = monthly.buckets.iter().map(|b| b.bucket.as_str()).collect();
    assert_eq!(keys, vec!["2025-12", "2026-03"]);
}

#[test]
fn empty_window_yields_empty_trends() {
    let dir = tempfile::tempdir().unwrap();
    let aggregator = InsightAggregator::new(seeded_store(dir.path()));
    let later = now() + TimeDelta::days(365);
    let series = aggregator.get_trends_at(later, "acme", 7, GroupBy::Week).unwrap();
    assert!(series.buckets.is_empty());
}

#[test]
fn topic_breakdown_uses_graded_severity() {
    let dir = tempfile::tempdir().unwrap();
    let aggregator = InsightAggregator::new(seeded_store(dir.path()));

    let breakdown = aggregator.get_topic_breakdown_at(now(), "acme", 30).unwrap();
    let timeline = &breakdown.topics[0];
    assert_eq!(timeline.topic, "timeline");
    assert_eq!(timeline.occurrences, 2);
    // commitment/missed grades high, tension_signal/* grades medium
    assert_eq!(timeline.high_severity, 1);
    assert_eq!(breakdown.topics[1].topic, "billing");
    assert_eq!(breakdown.topics[1].high_severity, 0);
}

#[test]
fn stored_findings_carry_rule_severity() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(dir.path());
    let first = &store.load("acme").unwrap()[0];
    assert_eq!(first.findings[0].severity, Severity::High);
    assert_eq!(first.findings[1].severity, Severity::Medium);
}
