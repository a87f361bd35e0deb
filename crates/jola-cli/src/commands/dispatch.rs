use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Feedback { action } => commands::feedback::handle(&action, ctx, flags).await,
        Commands::Insights { action } => commands::insights::handle(&action, ctx, flags).await,
        Commands::ActionItems { action } => {
            commands::action_items::handle(&action, ctx, flags).await
        }
        Commands::Features { action } => commands::features::handle(&action, ctx, flags).await,
        Commands::Dashboard => commands::dashboard::handle(ctx, flags).await,
        Commands::Chat { action } => commands::chat::handle(&action, ctx, flags).await,
    }
}
