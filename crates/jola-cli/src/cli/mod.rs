use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `jola` binary.
#[derive(Debug, Parser)]
#[command(name = "jola", version, about = "Jola - customer feedback analytics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::{ChatCommands, FeatureCommands, FeedbackCommands, InsightCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["jola", "--format", "table", "--limit", "10", "--verbose", "dashboard"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Dashboard));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["jola", "action-items", "list", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::ActionItems { .. }));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["jola", "--format", "xml", "dashboard"]).is_err());
    }

    #[test]
    fn feedback_filters_parse() {
        let cli = Cli::try_parse_from([
            "jola",
            "feedback",
            "list",
            "--source",
            "Interview",
            "--sentiment",
            "negative",
        ])
        .expect("cli should parse");

        let Commands::Feedback {
            action: FeedbackCommands::List {
                source,
                segment,
                sentiment,
            },
        } = cli.command
        else {
            panic!("expected feedback list");
        };
        assert_eq!(source.as_deref(), Some("Interview"));
        assert_eq!(segment, None);
        assert_eq!(sentiment.as_deref(), Some("negative"));
    }

    #[test]
    fn insights_label_is_optional() {
        let cli = Cli::try_parse_from(["jola", "insights", "list", "--label", "12"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Insights {
                action: InsightCommands::List { label: Some(ref key) }
            } if key == "12"
        ));
    }

    #[test]
    fn insight_labels_subcommand_parses() {
        let cli = Cli::try_parse_from(["jola", "insights", "labels"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Insights {
                action: InsightCommands::Labels
            }
        ));
    }

    #[test]
    fn feature_evidence_requires_id() {
        assert!(Cli::try_parse_from(["jola", "features", "evidence"]).is_err());
        let cli = Cli::try_parse_from(["jola", "features", "evidence", "fr-3"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Features {
                action: FeatureCommands::Evidence { ref id }
            } if id == "fr-3"
        ));
    }

    #[test]
    fn chat_send_takes_message_text() {
        let cli = Cli::try_parse_from(["jola", "chat", "send", "what do admins say?"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Chat {
                action: ChatCommands::Send { ref text }
            } if text == "what do admins say?"
        ));
    }
}
