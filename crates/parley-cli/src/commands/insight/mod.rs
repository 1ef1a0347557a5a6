mod record;
mod report;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::InsightCommands;
use crate::context::AppContext;

/// Handle `parley insight`.
pub fn handle(
    action: &InsightCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        InsightCommands::Record {
            capsule,
            report,
            user,
        } => record::run(capsule, report, user.as_deref(), ctx, flags),
        InsightCommands::Summary { days } => report::summary(*days, ctx, flags),
        InsightCommands::Trends { days, group_by } => {
            report::trends(*days, group_by.as_deref(), ctx, flags)
        }
        InsightCommands::Topics { days, limit } => report::topics(*days, *limit, ctx, flags),
    }
}
