use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Sentiment;

/// A single piece of raw customer feedback. Read-only; owned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FeedbackRecord {
    pub id: String,
    pub content: String,
    pub sentiment: Option<Sentiment>,
    pub source: Option<String>,
    pub segment: Option<String>,
    pub client: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FeedbackRecord {
    /// Sentiment for display; untagged feedback reads as neutral.
    #[must_use]
    pub fn sentiment_or_neutral(&self) -> Sentiment {
        self.sentiment.unwrap_or(Sentiment::Neutral)
    }

    /// Source for display; untagged feedback reads as `Unknown`.
    #[must_use]
    pub fn source_or_unknown(&self) -> &str {
        self.source.as_deref().unwrap_or("Unknown")
    }
}
