mod custom;
mod evaluate;
mod matching;
mod show;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaxonomyCommands;
use crate::context::AppContext;

/// Handle `parley taxonomy`.
pub fn handle(
    action: &TaxonomyCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TaxonomyCommands::Industries => show::industries(flags),
        TaxonomyCommands::Show { industry } => show::run(industry.as_deref(), ctx, flags),
        TaxonomyCommands::Evaluate {
            category,
            value,
            topic,
        } => evaluate::run(category, value, topic.as_deref(), ctx, flags),
        TaxonomyCommands::AddTopic {
            key,
            name,
            keywords,
        } => custom::add_entry(custom::EntryKind::Topic, key, name, keywords, ctx, flags),
        TaxonomyCommands::RemoveTopic { key } => {
            custom::remove_entry(custom::EntryKind::Topic, key, ctx, flags)
        }
        TaxonomyCommands::AddRole {
            key,
            name,
            keywords,
        } => custom::add_entry(custom::EntryKind::Role, key, name, keywords, ctx, flags),
        TaxonomyCommands::RemoveRole { key } => {
            custom::remove_entry(custom::EntryKind::Role, key, ctx, flags)
        }
        TaxonomyCommands::AddRule {
            category,
            value,
            when,
            severity,
        } => custom::add_rule(category, value, when, severity, ctx, flags),
        TaxonomyCommands::Match { file } => matching::run(file, ctx, flags),
    }
}
