pub mod action_items;
pub mod chat;
pub mod dashboard;
pub mod dispatch;
pub mod features;
pub mod feedback;
pub mod insights;
pub mod shared;
