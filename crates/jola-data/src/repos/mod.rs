//! Page repositories.
//!
//! Each module adds query methods to [`crate::FeedbackService`] for one page
//! of the application.

mod action_item;
mod dashboard;
mod feature;
mod feedback;
mod insight;
mod label;

/// Relation and procedure names on the backend.
pub mod relations {
    pub const FEEDBACKS: &str = "feedbacks";
    pub const INSIGHTS: &str = "insights";
    pub const LABELS: &str = "labels";
    pub const INSIGHT_LABELS: &str = "insight_labels";
    pub const ACTION_ITEMS: &str = "action_items";
    pub const ACTION_ITEM_INSIGHTS: &str = "actionitems_insights";
    pub const FEATURE_REQUESTS: &str = "feature_requests";
    pub const FEATURE_EVIDENCE: &str = "feature_evidence";

    pub const RPC_FEATURE_REQUESTS: &str = "get_feature_requests";
    pub const RPC_FEATURE_EVIDENCE: &str = "get_feature_evidence";
}
