use anyhow::Context;
use jola_chat::{ChatSession, FileSessionStore, HttpChatBackend};
use jola_config::JolaConfig;
use jola_data::FeedbackService;

use crate::cli::GlobalFlags;

pub type CliChatSession = ChatSession<HttpChatBackend, FileSessionStore>;

/// Shared application resources for one command run.
///
/// Clients are built on demand so `chat` works without a feedback backend
/// and the other way around.
pub struct AppContext {
    pub config: JolaConfig,
}

impl AppContext {
    #[must_use]
    pub const fn new(config: JolaConfig) -> Self {
        Self { config }
    }

    /// Read client for the feedback backend.
    pub fn service(&self) -> anyhow::Result<FeedbackService> {
        FeedbackService::from_config(&self.config)
            .context("failed to initialize the feedback backend client")
    }

    /// Chat session backed by the configured service and session file.
    pub fn chat_session(&self) -> anyhow::Result<CliChatSession> {
        self.config
            .chat
            .require()
            .context("chat service is not usable")?;
        let backend = HttpChatBackend::from_config(&self.config.chat)
            .context("failed to initialize the chat client")?;
        let store = FileSessionStore::from_config(&self.config.chat)
            .context("failed to locate the chat session file")?;
        Ok(ChatSession::new(backend, store))
    }

    /// Row limit for list commands: `--limit`, then `general.default_limit`.
    pub fn limit(&self, flags: &GlobalFlags) -> anyhow::Result<usize> {
        let limit = flags.limit.unwrap_or(self.config.general.default_limit);
        usize::try_from(limit).context("limit does not fit in memory")
    }
}
