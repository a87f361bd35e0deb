//! `FeedbackService`: the entry point pages use for remote reads.

use std::sync::Arc;

use jola_config::JolaConfig;
use serde::de::DeserializeOwned;

use crate::decode::decode_rows;
use crate::error::DataError;
use crate::query::{Rpc, Select};
use crate::rest::RestClient;
use crate::retry::RetryPolicy;
use crate::source::DataSource;

/// Wraps a [`DataSource`] with read retry and row decoding. Page-specific
/// queries live in `crate::repos` as further `impl` blocks.
#[derive(Clone)]
pub struct FeedbackService {
    source: Arc<dyn DataSource>,
    retry: RetryPolicy,
}

impl FeedbackService {
    pub fn new(source: Arc<dyn DataSource>, retry: RetryPolicy) -> Self {
        Self { source, retry }
    }

    /// Service backed by the configured PostgREST endpoint.
    ///
    /// # Errors
    ///
    /// Fails before any request when the backend section is not configured.
    pub fn from_config(config: &JolaConfig) -> Result<Self, DataError> {
        let client = RestClient::from_config(&config.supabase)?;
        Ok(Self::new(
            Arc::new(client),
            RetryPolicy::from_flag(config.general.retry_reads),
        ))
    }

    /// Run a select with retry and decode the rows into `T`.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, query: &Select) -> Result<Vec<T>, DataError> {
        let rows = self
            .retry
            .run(&query.relation, || self.source.select(query))
            .await?;
        Ok(decode_rows(&query.relation, rows))
    }

    /// Call a procedure with retry and decode the rows into `T`.
    pub(crate) async fn call<T: DeserializeOwned>(&self, rpc: &Rpc) -> Result<Vec<T>, DataError> {
        let rows = self
            .retry
            .run(&rpc.function, || self.source.rpc(rpc))
            .await?;
        Ok(decode_rows(&rpc.function, rows))
    }
}
