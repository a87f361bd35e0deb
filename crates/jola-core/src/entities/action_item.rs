use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The part of an insight shown next to an action item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InsightSummary {
    pub id: String,
    pub content: String,
}

/// A recommended action, with the insights that motivated it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ActionItem {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub related_insights: Vec<InsightSummary>,
}
