//! The remote query seam.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::DataError;
use crate::query::{Rpc, Select};

/// Anything that can answer [`Select`] and [`Rpc`] queries with JSON rows.
///
/// [`crate::RestClient`] talks to a PostgREST endpoint; tests substitute an
/// in-memory source.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn select(&self, query: &Select) -> Result<Vec<Value>, DataError>;

    async fn rpc(&self, call: &Rpc) -> Result<Vec<Value>, DataError>;
}
