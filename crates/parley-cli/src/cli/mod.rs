use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `parley` binary.
#[derive(Debug, Parser)]
#[command(
    name = "parley",
    version,
    about = "Parley - conversation ingestion and insight dashboards"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max rows to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Organization id (defaults to general.organization_id)
    #[arg(long, global = true)]
    pub org: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            org: self.org.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};
    use crate::cli::subcommands::{InsightCommands, TaxonomyCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "parley",
            "--format",
            "table",
            "--limit",
            "10",
            "--verbose",
            "taxonomy",
            "industries",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Taxonomy {
                action: TaxonomyCommands::Industries
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "parley", "insight", "summary", "--format", "raw", "--quiet", "--org", "acme",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Insight {
                action: InsightCommands::Summary { .. }
            }
        ));
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.org.as_deref(), Some("acme"));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["parley", "--format", "xml", "schema", "--list"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn ingest_accepts_many_files_and_participants() {
        let cli = Cli::try_parse_from([
            "parley",
            "ingest",
            "a.txt",
            "b.eml",
            "--hint",
            "email",
            "--participant",
            "Alice <alice@x.com>",
            "--participant",
            "Bob",
        ])
        .expect("cli should parse");

        let Commands::Ingest(args) = cli.command else {
            panic!("expected ingest");
        };
        assert_eq!(args.files, vec!["a.txt", "b.eml"]);
        assert_eq!(args.hint.as_deref(), Some("email"));
        assert_eq!(args.participants.len(), 2);
    }

    #[test]
    fn trends_group_by_is_optional() {
        let cli = Cli::try_parse_from(["parley", "insight", "trends", "--days", "90"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Insight {
                action: InsightCommands::Trends {
                    days: Some(90),
                    group_by: None
                }
            }
        ));
    }
}
