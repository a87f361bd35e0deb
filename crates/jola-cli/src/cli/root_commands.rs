use clap::Subcommand;

use crate::cli::subcommands::{
    ActionItemCommands, ChatCommands, FeatureCommands, FeedbackCommands, InsightCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Raw customer feedback.
    Feedback {
        #[command(subcommand)]
        action: FeedbackCommands,
    },
    /// Insights with their labels.
    Insights {
        #[command(subcommand)]
        action: InsightCommands,
    },
    /// Action items with their related insights.
    ActionItems {
        #[command(subcommand)]
        action: ActionItemCommands,
    },
    /// Feature requests and supporting evidence.
    Features {
        #[command(subcommand)]
        action: FeatureCommands,
    },
    /// Counts, distributions, and examples over all feedback.
    Dashboard,
    /// Conversation with the analysis assistant.
    Chat {
        #[command(subcommand)]
        action: ChatCommands,
    },
}
