use clap::Subcommand;

/// Feedback commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FeedbackCommands {
    /// List feedback, newest first.
    List {
        /// Only feedback from this source (exact match).
        #[arg(long)]
        source: Option<String>,
        /// Only feedback from this customer segment (exact match).
        #[arg(long)]
        segment: Option<String>,
        /// positive, negative, mixed, or neutral.
        #[arg(long)]
        sentiment: Option<String>,
    },
    /// Distinct sources, segments, and sentiments to filter by.
    Filters,
}
