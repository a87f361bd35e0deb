//! `ChatBackend` over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use jola_config::ChatConfig;
use reqwest::StatusCode;

use crate::backend::{ChatBackend, ChatHistory, ChatRequest, ChatResponse, EndOutcome, HistoryOutcome};
use crate::error::ChatError;

#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpChatBackend {
    /// # Errors
    ///
    /// `ChatError::Config` for an unusable config, `ChatError::Http` if the
    /// client fails to build.
    pub fn from_config(config: &ChatConfig) -> Result<Self, ChatError> {
        let config = config.require()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    fn session_url(&self, session_id: &str) -> String {
        format!("{}/chat/{}", self.base_url, urlencoding::encode(session_id))
    }
}

/// Turn a non-success response into `ChatError::Api`, preferring the
/// service's `detail` message over the raw body.
async fn api_error(resp: reqwest::Response) -> ChatError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());
    ChatError::Api { status, message }
}

async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ChatError> {
    let text = resp.text().await?;
    serde_json::from_str(&text).map_err(|e| ChatError::Decode(e.to_string()))
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn history(&self, session_id: &str) -> Result<HistoryOutcome, ChatError> {
        let url = format!("{}/history", self.session_url(session_id));
        let resp = self.http.get(&url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(HistoryOutcome::NotFound);
        }
        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        let body: ChatHistory = decode(resp).await?;
        Ok(HistoryOutcome::Found(body.history))
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        let url = format!("{}/chat", self.base_url);
        let resp = self.http.post(&url).json(request).send().await?;
        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        decode(resp).await
    }

    async fn end(&self, session_id: &str) -> Result<EndOutcome, ChatError> {
        let resp = self.http.delete(self.session_url(session_id)).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(EndOutcome::NotFound);
        }
        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        Ok(EndOutcome::Ended)
    }
}
