//! # jola-data
//!
//! Remote reads for every Jola page.
//!
//! - [`DataSource`]: the query seam, implemented by [`RestClient`] over a
//!   PostgREST endpoint
//! - [`RetryPolicy`]: one retry for transient read failures
//! - [`FeedbackService`]: decodes rows into fixed record types, skipping
//!   malformed rows, and exposes one method per page query
//! - [`Query`] / [`FeatureEvidenceQuery`]: explicit-refresh view state

pub mod decode;
pub mod error;
mod http;
pub mod join;
pub mod query;
pub mod query_state;
pub mod repos;
pub mod rest;
pub mod retry;
pub mod service;
pub mod source;

pub use error::DataError;
pub use query::{Rpc, Select};
pub use query_state::{FeatureEvidenceQuery, Query, QueryState};
pub use rest::RestClient;
pub use retry::RetryPolicy;
pub use service::FeedbackService;
pub use source::DataSource;
