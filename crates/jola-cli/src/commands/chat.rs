use anyhow::Context;
use chrono::{DateTime, Utc};
use jola_chat::{EndOutcome, SessionStore};
use jola_core::entities::ChatMessage;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ChatCommands;
use crate::context::AppContext;
use crate::output::{TableRow, output, output_rows};
use crate::progress::with_spinner;

/// The locally stored session.
#[derive(Debug, Serialize)]
struct SessionView {
    session_id: Option<String>,
    store: String,
}

#[derive(Debug, Serialize)]
struct EndView {
    session_id: String,
    outcome: &'static str,
}

const fn outcome_label(outcome: EndOutcome) -> &'static str {
    match outcome {
        EndOutcome::Ended => "ended",
        EndOutcome::NotFound => "not_found",
    }
}

/// Handle `jola chat`.
pub async fn handle(action: &ChatCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut session = ctx.chat_session()?;
    match action {
        ChatCommands::Send { text } => {
            with_spinner("Connecting", session.initialize())
                .await
                .context("failed to start chat session")?;
            let before = session.messages().len();
            let messages = with_spinner("Waiting for reply", session.send_message(text)).await?;
            let reply = new_turns(messages, before);
            output_rows(reply, flags.format)
        }
        ChatCommands::History => {
            if session.store().get()?.is_none() {
                return output_rows::<ChatMessage>(&[], flags.format);
            }
            with_spinner("Loading history", session.initialize())
                .await
                .context("failed to resume chat session")?;
            output_rows(session.messages(), flags.format)
        }
        ChatCommands::End => {
            let Some(session_id) = session.store().get()? else {
                anyhow::bail!("no chat session to end");
            };
            session
                .initialize()
                .await
                .context("failed to resume chat session")?;
            let outcome = with_spinner("Ending session", session.end_session()).await?;
            output(
                &EndView {
                    session_id,
                    outcome: outcome_label(outcome),
                },
                flags.format,
            )
        }
        ChatCommands::Session => output(
            &SessionView {
                session_id: session.store().get()?,
                store: session.store().path().display().to_string(),
            },
            flags.format,
        ),
    }
}

/// Messages added by the last send. When the service replaced history the
/// count may not line up, so fall back to the final exchange.
fn new_turns(messages: &[ChatMessage], before: usize) -> &[ChatMessage] {
    if messages.len() > before {
        &messages[before..]
    } else {
        &messages[messages.len().saturating_sub(2)..]
    }
}

impl TableRow for ChatMessage {
    fn headers() -> &'static [&'static str] {
        &["role", "content"]
    }

    fn cells(&self, _now: DateTime<Utc>) -> Vec<String> {
        vec![self.role.to_string(), self.content.clone()]
    }
}
