//! PostgREST client for the hosted backend.

use std::time::Duration;

use async_trait::async_trait;
use jola_config::SupabaseConfig;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::error::DataError;
use crate::http::check_response;
use crate::query::{Rpc, Select};
use crate::source::DataSource;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for `{url}/rest/v1`.
///
/// Every request carries the anon key as `apikey` and as a bearer token.
/// A non-default schema is selected with the `Accept-Profile` /
/// `Content-Profile` headers.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    rest_url: String,
}

impl RestClient {
    /// Build a client from a validated backend config.
    ///
    /// # Errors
    ///
    /// `DataError::Config` if the section is incomplete, `DataError::Decode`
    /// if the key cannot be used as a header value, `DataError::Http` if the
    /// client fails to build.
    pub fn from_config(config: &SupabaseConfig) -> Result<Self, DataError> {
        let config = config.require()?;
        let key = HeaderValue::from_str(config.anon_key.trim())
            .map_err(|e| DataError::Decode(format!("anon key is not a valid header: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.anon_key.trim()))
            .map_err(|e| DataError::Decode(format!("anon key is not a valid header: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        if config.schema != "public" {
            let profile = HeaderValue::from_str(&config.schema)
                .map_err(|e| DataError::Decode(format!("schema is not a valid header: {e}")))?;
            headers.insert("Accept-Profile", profile.clone());
            headers.insert("Content-Profile", profile);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            rest_url: format!("{}/rest/v1", config.base_url()),
        })
    }

    #[must_use]
    pub fn select_url(&self, query: &Select) -> String {
        format!(
            "{}/{}?{}",
            self.rest_url,
            urlencoding::encode(&query.relation),
            query.query_string()
        )
    }

    #[must_use]
    pub fn rpc_url(&self, call: &Rpc) -> String {
        format!(
            "{}/rpc/{}",
            self.rest_url,
            urlencoding::encode(&call.function)
        )
    }
}

/// Procedures may return a set, a single row, or nothing.
fn into_rows(value: Value) -> Vec<Value> {
    match value {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

#[async_trait]
impl DataSource for RestClient {
    async fn select(&self, query: &Select) -> Result<Vec<Value>, DataError> {
        let url = self.select_url(query);
        tracing::debug!(relation = %query.relation, "select");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let body: Value = resp.json().await?;
        match body {
            Value::Array(rows) => Ok(rows),
            other => Err(DataError::Decode(format!(
                "expected an array of rows from '{}', got {}",
                query.relation,
                kind(&other)
            ))),
        }
    }

    async fn rpc(&self, call: &Rpc) -> Result<Vec<Value>, DataError> {
        let url = self.rpc_url(call);
        tracing::debug!(function = %call.function, "rpc");
        let resp = check_response(self.http.post(&url).json(&call.body()).send().await?).await?;
        let text = resp.text().await?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let body: Value = serde_json::from_str(&text)
            .map_err(|e| DataError::Decode(format!("rpc '{}': {e}", call.function)))?;
        Ok(into_rows(body))
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
