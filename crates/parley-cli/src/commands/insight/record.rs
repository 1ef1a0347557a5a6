use anyhow::Context;
use chrono::Utc;
use parley_core::entities::{AnalysisReport, ConversationCapsule, StoredInsight};
use parley_insights::build_insight;
use parley_schema::SchemaRegistry;
use parley_taxonomy::SeverityRule;

use crate::cli::GlobalFlags;
use crate::commands::shared::input::read_json;
use crate::context::AppContext;
use crate::output::output;

/// Grade a collaborator report and append the resulting insight.
pub fn run(
    capsule_path: &str,
    report_path: &str,
    user: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let organization = ctx.organization(flags)?;
    let capsule: ConversationCapsule = ctx
        .schema
        .parse("conversation_capsule", read_json(capsule_path)?)
        .with_context(|| format!("{capsule_path} is not a conversation capsule"))?;
    let report = parse_report(&ctx.schema, read_json(report_path)?)
        .with_context(|| format!("{report_path} is not a valid analysis report"))?;

    let rules = ctx.taxonomy()?.definition()?.severity_rules;
    let insight = grade(&organization, user, &capsule, &report, &rules)?;

    ctx.insight_store()
        .append_validated(&insight, &ctx.schema)
        .context("failed to record insight")?;
    output(&insight, flags.format)
}

fn parse_report(
    schema: &SchemaRegistry,
    value: serde_json::Value,
) -> anyhow::Result<AnalysisReport> {
    Ok(schema.parse("analysis_report", value)?)
}

fn grade(
    organization: &str,
    user: Option<&str>,
    capsule: &ConversationCapsule,
    report: &AnalysisReport,
    rules: &[SeverityRule],
) -> anyhow::Result<StoredInsight> {
    Ok(build_insight(
        organization,
        user.map(str::to_string),
        capsule,
        report,
        rules,
        Utc::now(),
    )?)
}

#[cfg(test)]
mod tests {
    use parley_core::enums::{RiskLevel, Severity};

    use super::*;

    #[test]
    fn report_with_unknown_category_is_rejected() {
        let value = serde_json::json!({
            "overall_risk": "high",
            "health_score": 20,
            "findings": [{ "category": "vibes", "value": "bad" }]
        });
        assert!(parse_report(&SchemaRegistry::new(), value).is_err());
    }

    #[test]
    fn valid_report_is_graded_with_rules() {
        let schema = SchemaRegistry::new();
        let report = parse_report(
            &schema,
            serde_json::json!({
                "overall_risk": "high",
                "health_score": 20,
                "findings": [
                    { "category": "tension_signal", "value": "escalation", "topic": "billing" }
                ]
            }),
        )
        .unwrap();
        assert_eq!(report.overall_risk, RiskLevel::High);

        let capsule = parley_ingest::ingest(
            "Alice: the invoice is wrong again\nBob: escalating to finance\n",
            None,
            &[],
            &parley_config::IngestConfig::default(),
        );
        let rules = parley_taxonomy::resolve("default").unwrap().severity_rules;
        let insight = grade("acme", Some("u-1"), &capsule, &report, &rules).unwrap();
        assert_eq!(insight.findings[0].severity, Severity::High);
        assert_eq!(insight.participant_count, 2);
        assert_eq!(insight.user_id.as_deref(), Some("u-1"));
    }
}
