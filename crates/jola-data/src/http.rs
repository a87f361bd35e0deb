//! Shared HTTP response helpers for the REST client.

use crate::error::DataError;

/// Return the response unchanged on success, or [`DataError::Api`] carrying
/// the status and the backend's message.
///
/// PostgREST error bodies are JSON objects with a `message` field; when the
/// body has one it is used, otherwise the raw body text.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, DataError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(DataError::Api {
        status,
        message: error_message(&body),
    })
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
