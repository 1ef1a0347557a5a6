use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Detect(args) => commands::detect::handle(&args, flags),
        Commands::Ingest(args) => commands::ingest::handle(&args, ctx, flags).await,
        Commands::Taxonomy { action } => commands::taxonomy::handle(&action, ctx, flags),
        Commands::Insight { action } => commands::insight::handle(&action, ctx, flags),
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
