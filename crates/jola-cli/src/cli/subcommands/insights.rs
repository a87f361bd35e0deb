use clap::Subcommand;

/// Insight commands.
#[derive(Clone, Debug, Subcommand)]
pub enum InsightCommands {
    /// List insights with their labels.
    List {
        /// Only insights carrying this label key (see `insights labels`).
        #[arg(long)]
        label: Option<String>,
    },
    /// List the label keys insights can be filtered by.
    Labels,
}
