use clap::{Args, Subcommand};

use crate::cli::subcommands::{InsightCommands, TaxonomyCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Detect the source format of a conversation.
    Detect(DetectArgs),
    /// Build conversation capsules from raw text.
    Ingest(IngestArgs),
    /// Taxonomy templates, org overrides, and severity grading.
    Taxonomy {
        #[command(subcommand)]
        action: TaxonomyCommands,
    },
    /// Record analyzed conversations and aggregate them.
    Insight {
        #[command(subcommand)]
        action: InsightCommands,
    },
    /// Dump JSON schema for a registered type.
    Schema(SchemaArgs),
}

/// Arguments for `parley detect`.
#[derive(Clone, Debug, Args)]
pub struct DetectArgs {
    /// Input file, or `-` for stdin.
    #[arg(default_value = "-")]
    pub file: String,
    /// Source hint: email, slack, teams, simple.
    #[arg(long)]
    pub hint: Option<String>,
}

/// Arguments for `parley ingest`.
#[derive(Clone, Debug, Args)]
pub struct IngestArgs {
    /// Input files, or `-` for stdin.
    #[arg(required = true)]
    pub files: Vec<String>,
    /// Source hint: email, slack, teams, simple.
    #[arg(long)]
    pub hint: Option<String>,
    /// Known participant, as `Name` or `Name <email>`. Repeatable.
    #[arg(long = "participant")]
    pub participants: Vec<String>,
}

/// Arguments for `parley schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Registered schema name, e.g. `analysis_report`.
    #[arg(required_unless_present = "list")]
    pub type_name: Option<String>,
    /// List registered schema names.
    #[arg(long)]
    pub list: bool,
}
