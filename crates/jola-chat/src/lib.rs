//! # jola-chat
//!
//! Multi-turn chat against the Jola chat service.
//!
//! [`ChatSession`] owns the conversation: it persists the session id through
//! a [`SessionStore`], replays history on resume, sends messages through a
//! [`ChatBackend`], and ends sessions. [`HttpChatBackend`] is the production
//! backend; [`FileSessionStore`] keeps the id between CLI runs.

pub mod backend;
pub mod error;
pub mod http;
pub mod id;
pub mod session;
pub mod store;

pub use backend::{ChatBackend, ChatHistory, ChatRequest, ChatResponse, EndOutcome, HistoryOutcome};
pub use error::ChatError;
pub use http::HttpChatBackend;
pub use session::ChatSession;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
