use clap::Subcommand;

/// Insight commands.
#[derive(Clone, Debug, Subcommand)]
pub enum InsightCommands {
    /// Grade a collaborator report and append it to the insight store.
    Record {
        /// Capsule JSON produced by `parley ingest`.
        #[arg(long)]
        capsule: String,
        /// Analysis report JSON returned by the collaborator.
        #[arg(long)]
        report: String,
        #[arg(long)]
        user: Option<String>,
    },
    /// Dashboard summary over the last N days.
    Summary {
        #[arg(long)]
        days: Option<u32>,
    },
    /// Sparse trend buckets over the last N days.
    Trends {
        #[arg(long)]
        days: Option<u32>,
        /// day, week, or month
        #[arg(long)]
        group_by: Option<String>,
    },
    /// Topic breakdown over the last N days.
    Topics {
        #[arg(long)]
        days: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
}
