use parley_core::entities::ReportedFinding;
use parley_core::enums::{FindingCategory, Severity};
use parley_taxonomy::{TaxonomyEngine, render_message};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct Evaluation {
    category: FindingCategory,
    value: String,
    topic: Option<String>,
    severity: Severity,
    message: Option<String>,
}

pub fn run(
    category: &str,
    value: &str,
    topic: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let category = parse_enum::<FindingCategory>(category, "category")?;
    let evaluation = evaluate(&ctx.taxonomy()?, category, value, topic)?;
    output(&evaluation, flags.format)
}

fn evaluate(
    engine: &TaxonomyEngine,
    category: FindingCategory,
    value: &str,
    topic: Option<&str>,
) -> anyhow::Result<Evaluation> {
    let finding = ReportedFinding {
        category,
        value: value.trim().to_string(),
        topic: topic.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
        evidence: Vec::new(),
    };
    let definition = engine.definition()?;
    let severity = parley_taxonomy::evaluate_finding(&definition.severity_rules, &finding);
    let message = render_message(&definition, category, &finding.value, finding.topic.as_deref());
    Ok(Evaluation {
        category,
        value: finding.value,
        topic: finding.topic,
        severity,
        message,
    })
}
