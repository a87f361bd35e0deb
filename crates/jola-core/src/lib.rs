//! # jola-core
//!
//! Core types, grouping, and aggregation for Jola.
//!
//! This crate provides the foundational types shared across all Jola crates:
//! - Entity structs for every view model (feedback, insights, action items,
//!   feature requests, chat messages)
//! - Sentiment and chat enums, including the chat session state machine
//! - Fixed record types for the flat rows returned by remote queries
//! - The generic result grouper that folds join rows into nested views
//! - Dashboard aggregates and feedback filter options
//! - Small text helpers used by the view layer
//! - Cross-cutting error types

pub mod dashboard;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod grouping;
pub mod rows;
pub mod text;
