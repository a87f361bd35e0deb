//! View-model structs for every Jola page.
//!
//! These are the shapes handed to the view layer after remote rows have been
//! decoded and grouped. All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for JSON output and schema validation.

mod action_item;
mod chat;
mod feature;
mod feedback;
mod insight;

pub use action_item::{ActionItem, InsightSummary};
pub use chat::ChatMessage;
pub use feature::{FeatureEvidence, FeatureRequest};
pub use feedback::FeedbackRecord;
pub use insight::{Insight, Label};
