use parley_core::enums::GroupBy;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub fn summary(days: Option<u32>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let organization = ctx.organization(flags)?;
    let days = days.unwrap_or(ctx.config.insights.default_days);
    let summary = ctx.aggregator().get_dashboard_summary(&organization, days)?;
    output(&summary, flags.format)
}

pub fn trends(
    days: Option<u32>,
    group_by: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let organization = ctx.organization(flags)?;
    let days = days.unwrap_or(ctx.config.insights.default_days);
    let group_by = match group_by {
        Some(raw) => parse_enum::<GroupBy>(raw, "group_by")?,
        None => ctx.config.insights.default_group_by,
    };
    let series = ctx.aggregator().get_trends(&organization, days, group_by)?;
    output(&series, flags.format)
}

pub fn topics(
    days: Option<u32>,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let organization = ctx.organization(flags)?;
    let days = days.unwrap_or(ctx.config.insights.default_days);
    let limit = effective_limit(limit, flags.limit, ctx.config.general.default_limit);

    let mut breakdown = ctx.aggregator().get_topic_breakdown(&organization, days)?;
    breakdown.topics.truncate(usize::try_from(limit)?);
    output(&breakdown, flags.format)
}
