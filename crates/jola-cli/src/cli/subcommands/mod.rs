mod action_items;
mod chat;
mod features;
mod feedback;
mod insights;

pub use action_items::ActionItemCommands;
pub use chat::ChatCommands;
pub use features::FeatureCommands;
pub use feedback::FeedbackCommands;
pub use insights::InsightCommands;
