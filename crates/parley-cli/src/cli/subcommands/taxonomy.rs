use clap::Subcommand;

/// Taxonomy commands. Mutations apply to the configured overrides file.
#[derive(Clone, Debug, Subcommand)]
pub enum TaxonomyCommands {
    /// List industries with a built-in template.
    Industries,
    /// Show the merged taxonomy for the configured industry.
    Show {
        /// Show a bare industry template instead of the merged definition.
        #[arg(long)]
        industry: Option<String>,
    },
    /// Grade one finding against the merged severity rules.
    Evaluate {
        #[arg(long)]
        category: String,
        #[arg(long)]
        value: String,
        #[arg(long)]
        topic: Option<String>,
    },
    /// Add an org-custom topic.
    AddTopic {
        key: String,
        #[arg(long)]
        name: String,
        /// Keyword that signals the topic. Repeatable.
        #[arg(long = "keyword")]
        keywords: Vec<String>,
    },
    /// Remove an org-custom topic. Built-in topics are left untouched.
    RemoveTopic { key: String },
    /// Add an org-custom role.
    AddRole {
        key: String,
        #[arg(long)]
        name: String,
        /// Keyword that signals the role. Repeatable.
        #[arg(long = "keyword")]
        keywords: Vec<String>,
    },
    /// Remove an org-custom role. Built-in roles are left untouched.
    RemoveRole { key: String },
    /// Append an org-custom severity rule after the template rules.
    AddRule {
        #[arg(long)]
        category: String,
        /// Category value, or `*` for any.
        #[arg(long)]
        value: String,
        /// `always` or `topic == <key>`.
        #[arg(long, default_value = "always")]
        when: String,
        #[arg(long)]
        severity: String,
    },
    /// Find topics and roles mentioned in a text.
    Match {
        /// Input file, or `-` for stdin.
        #[arg(default_value = "-")]
        file: String,
    },
}
