use clap::Subcommand;

/// Action item commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ActionItemCommands {
    /// List action items with their related insights.
    List,
}
