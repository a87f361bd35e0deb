use clap::Subcommand;

/// Chat session commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ChatCommands {
    /// Send a message, resuming the stored session or starting one.
    Send { text: String },
    /// Show the stored session's history.
    History,
    /// End the stored session and forget it locally.
    End,
    /// Show the stored session id without contacting the service.
    Session,
}
