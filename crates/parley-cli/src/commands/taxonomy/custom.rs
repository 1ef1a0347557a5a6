use anyhow::Context;
use parley_core::enums::{FindingCategory, Severity};
use parley_taxonomy::{KeywordEntry, RemoveOutcome, RuleCondition, SeverityRule, TaxonomyEngine};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Topic,
    Role,
}

#[derive(Debug, Serialize)]
struct Added {
    kind: EntryKind,
    key: String,
    overrides_path: String,
}

#[derive(Debug, Serialize)]
struct Removed {
    kind: EntryKind,
    key: String,
    #[serde(flatten)]
    outcome: RemoveOutcome,
}

#[derive(Debug, Serialize)]
struct RuleAdded {
    rule: SeverityRule,
    overrides_path: String,
}

pub fn add_entry(
    kind: EntryKind,
    key: &str,
    name: &str,
    keywords: &[String],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut engine = writable_engine(ctx)?;
    let entry = KeywordEntry {
        key: key.trim().to_string(),
        display_name: name.trim().to_string(),
        keywords: keywords.to_vec(),
        custom: true,
    };
    match kind {
        EntryKind::Topic => engine.add_custom_topic(entry)?,
        EntryKind::Role => engine.add_custom_role(entry)?,
    }
    engine.persist()?;

    output(
        &Added {
            kind,
            key: key.trim().to_string(),
            overrides_path: overrides_path(&engine),
        },
        flags.format,
    )
}

pub fn remove_entry(
    kind: EntryKind,
    key: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut engine = writable_engine(ctx)?;
    let outcome = match kind {
        EntryKind::Topic => engine.remove_custom_topic(key)?,
        EntryKind::Role => engine.remove_custom_role(key)?,
    };
    if outcome == RemoveOutcome::Removed {
        engine.persist()?;
    } else {
        tracing::info!(?kind, key, ?outcome, "nothing removed");
    }

    output(
        &Removed {
            kind,
            key: key.to_string(),
            outcome,
        },
        flags.format,
    )
}

pub fn add_rule(
    category: &str,
    value: &str,
    when: &str,
    severity: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let rule = SeverityRule::new(
        parse_enum::<FindingCategory>(category, "category")?,
        value.trim(),
        when.parse::<RuleCondition>()?,
        parse_enum::<Severity>(severity, "severity")?,
    );
    let mut engine = writable_engine(ctx)?;
    engine.add_custom_rule(rule.clone())?;
    engine.persist()?;

    output(
        &RuleAdded {
            rule,
            overrides_path: overrides_path(&engine),
        },
        flags.format,
    )
}

fn writable_engine(ctx: &AppContext) -> anyhow::Result<TaxonomyEngine> {
    let engine = ctx.taxonomy()?;
    engine.overrides_path().context(
        "taxonomy.overrides_path is not set. Set PARLEY_TAXONOMY__OVERRIDES_PATH \
         or add it to .parley/config.toml",
    )?;
    Ok(engine)
}

fn overrides_path(engine: &TaxonomyEngine) -> String {
    engine
        .overrides_path()
        .map(|path| path.display().to_string())
        .unwrap_or_default()
}
