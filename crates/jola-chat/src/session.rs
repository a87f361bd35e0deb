//! The chat session client.
//!
//! ```text
//! uninitialized ──initialize──▶ active ──send_message──▶ sending
//!       ▲                         │  ◀──── reply / failure ───┘
//!       └──────end_session────────┘
//! ```
//!
//! The session id lives in a [`SessionStore`] so it survives restarts. A
//! session the service does not know (404) is treated as empty on history
//! fetch and as already ended on `end_session`, never as an error.

use jola_core::entities::ChatMessage;
use jola_core::enums::SessionStatus;
use jola_core::errors::CoreError;

use crate::backend::{ChatBackend, ChatRequest, EndOutcome, HistoryOutcome};
use crate::error::ChatError;
use crate::id::new_session_id;
use crate::store::SessionStore;

/// Puts the status back to `Active` when a send completes or its future is
/// dropped mid-request.
struct SendingGuard<'a> {
    status: &'a mut SessionStatus,
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        *self.status = SessionStatus::Active;
    }
}

pub struct ChatSession<B, S> {
    backend: B,
    store: S,
    session_id: Option<String>,
    messages: Vec<ChatMessage>,
    status: SessionStatus,
    last_error: Option<String>,
}

impl<B: ChatBackend, S: SessionStore> ChatSession<B, S> {
    pub const fn new(backend: B, store: S) -> Self {
        Self {
            backend,
            store,
            session_id: None,
            messages: Vec::new(),
            status: SessionStatus::Uninitialized,
            last_error: None,
        }
    }

    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Message from the last failed send or end, cleared by the next attempt.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    fn transition(&mut self, next: SessionStatus) -> Result<(), ChatError> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                entity_type: "chat_session".into(),
                from: self.status.to_string(),
                to: next.to_string(),
            }
            .into());
        }
        self.status = next;
        Ok(())
    }

    /// Resume the persisted session (fetching its history) or start a new
    /// one. Calling this on an active session does nothing.
    ///
    /// # Errors
    ///
    /// Store failures. History failures are logged, not returned.
    pub async fn initialize(&mut self) -> Result<(), ChatError> {
        if self.status != SessionStatus::Uninitialized {
            return Ok(());
        }
        match self.store.get()? {
            Some(session_id) => {
                tracing::debug!(%session_id, "resuming chat session");
                self.session_id = Some(session_id);
                self.transition(SessionStatus::Active)?;
                self.fetch_history().await?;
            }
            None => {
                let session_id = new_session_id()?;
                self.store.set(&session_id)?;
                tracing::debug!(%session_id, "started chat session");
                self.session_id = Some(session_id);
                self.messages.clear();
                self.transition(SessionStatus::Active)?;
            }
        }
        Ok(())
    }

    /// Replace local history with the service's copy.
    ///
    /// An unknown session yields empty history. Any other failure also
    /// leaves history empty and is only logged.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` when there is no active session.
    pub async fn fetch_history(&mut self) -> Result<&[ChatMessage], ChatError> {
        let session_id = self.active_id("fetch history")?;
        match self.backend.history(&session_id).await {
            Ok(HistoryOutcome::Found(history)) => self.messages = history,
            Ok(HistoryOutcome::NotFound) => {
                tracing::debug!(%session_id, "no history on the service yet");
                self.messages.clear();
            }
            Err(error) => {
                tracing::warn!(%session_id, %error, "failed to fetch chat history");
                self.messages.clear();
            }
        }
        Ok(self.messages.as_slice())
    }

    /// Send `text` and merge the reply into history.
    ///
    /// When the service returns the full history it replaces the local copy;
    /// otherwise the human message and the reply are appended. On failure the
    /// history is left as it was and the message is kept in
    /// [`Self::last_error`].
    ///
    /// # Errors
    ///
    /// `Validation` for blank text (no request is made), `InvalidTransition`
    /// when not active or already sending, or the transport/service error.
    pub async fn send_message(&mut self, text: &str) -> Result<&[ChatMessage], ChatError> {
        if text.trim().is_empty() {
            return Err(CoreError::Validation("message is empty".into()).into());
        }
        let session_id = self.active_id("send")?;
        self.transition(SessionStatus::Sending)?;
        self.last_error = None;

        let request = ChatRequest {
            message: text.to_string(),
            session_id,
        };
        let outcome = {
            let _sending = SendingGuard {
                status: &mut self.status,
            };
            self.backend.send(&request).await
        };

        match outcome {
            Ok(response) => {
                if response.session_id != request.session_id {
                    tracing::warn!(
                        ours = %request.session_id,
                        theirs = %response.session_id,
                        "chat service answered for a different session"
                    );
                }
                match response.history {
                    Some(history) => self.messages = history,
                    None => {
                        self.messages.push(ChatMessage::human(request.message));
                        self.messages.push(ChatMessage::ai(response.response));
                    }
                }
                Ok(self.messages.as_slice())
            }
            Err(error) => {
                tracing::warn!(%error, "chat message failed");
                self.last_error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// End the session on the service, then forget it locally.
    ///
    /// Success and "not found" both clear the persisted id and history and
    /// return the session to `Uninitialized`; the returned outcome says which
    /// one happened. Any other service failure leaves everything as it was.
    /// Once the service has ended the session the client forgets it even if
    /// the store cannot be cleared; that failure is still returned.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` while sending or when no session is active, the
    /// transport/service error, or a store failure.
    pub async fn end_session(&mut self) -> Result<EndOutcome, ChatError> {
        let session_id = self.active_id("end")?;
        if !self.status.can_transition_to(SessionStatus::Uninitialized) {
            return Err(CoreError::InvalidTransition {
                entity_type: "chat_session".into(),
                from: self.status.to_string(),
                to: SessionStatus::Uninitialized.to_string(),
            }
            .into());
        }
        self.last_error = None;

        let outcome = match self.backend.end(&session_id).await {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::warn!(%session_id, %error, "failed to end chat session");
                self.last_error = Some(error.to_string());
                return Err(error);
            }
        };
        if outcome == EndOutcome::NotFound {
            tracing::debug!(%session_id, "session already gone on the service");
        }

        self.session_id = None;
        self.messages.clear();
        self.transition(SessionStatus::Uninitialized)?;
        if let Err(error) = self.store.clear() {
            tracing::warn!(%session_id, %error, "session ended but its id could not be cleared");
            self.last_error = Some(error.to_string());
            return Err(error);
        }
        Ok(outcome)
    }

    fn active_id(&self, operation: &str) -> Result<String, ChatError> {
        match (&self.session_id, self.status) {
            (Some(id), SessionStatus::Active | SessionStatus::Sending) => Ok(id.clone()),
            _ => Err(CoreError::InvalidTransition {
                entity_type: "chat_session".into(),
                from: self.status.to_string(),
                to: operation.to_string(),
            }
            .into()),
        }
    }
}
