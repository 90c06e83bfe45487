//! Messages API client for the remote inference service.
//!
//! Issues exactly one call attempt per [`ClaudeClient::send`] and maps every
//! failure onto the [`ServiceError`] taxonomy so the retry loop can decide
//! what to do with it. Status mapping:
//!
//! - 408 / 429 / 5xx and transport errors -> [`ServiceError::Transient`]
//! - 401 / 403 -> [`ServiceError::Credentials`]
//! - any other non-2xx -> [`ServiceError::Client`]
//!
//! A client constructed without an API key reports
//! [`ServiceError::Credentials`] without issuing a request at all.

use serde_json::json;

use condense_types::{ServiceError, SummarizerConfig};

use crate::{MESSAGES_API_URL, http_client};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// One-attempt client for the Messages API.
#[derive(Debug, Clone)]
pub struct ClaudeClient {
    api_key: Option<String>,
    model: String,
    max_output_tokens: u32,
    temperature: f32,
    base_url: String,
}

impl ClaudeClient {
    #[must_use]
    pub fn new(api_key: Option<String>, settings: &SummarizerConfig) -> Self {
        Self {
            api_key,
            model: settings.model.clone(),
            max_output_tokens: settings.max_output_tokens,
            temperature: settings.temperature,
            base_url: MESSAGES_API_URL.to_string(),
        }
    }

    /// Overrides the endpoint. Used by tests against a local server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Issues one call attempt with `prompt` and returns the generated text.
    pub async fn send(&self, prompt: &str) -> Result<String, ServiceError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ServiceError::Credentials(
                "no API key configured".to_string(),
            ));
        };

        let body = json!({
            "model": self.model,
            "max_tokens": self.max_output_tokens,
            "temperature": self.temperature,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        tracing::debug!(model = %self.model, prompt_bytes = prompt.len(), "sending inference request");

        let response = http_client()
            .post(&self.base_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read error: {e}>"));
            return Err(classify_status(status, &error_text));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ServiceError::Client(format!("malformed response body: {e}")))?;

        // Response shape: { "content": [{ "type": "text", "text": "..." }] }
        payload["content"]
            .as_array()
            .and_then(|blocks| blocks.first())
            .and_then(|block| block["text"].as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                ServiceError::Client(format!("missing content text in response: {payload}"))
            })
    }
}

fn classify_transport_error(error: reqwest::Error) -> ServiceError {
    if error.is_connect() || error.is_timeout() || error.is_request() {
        ServiceError::Transient(format!("transport error: {error}"))
    } else {
        ServiceError::Client(format!("request error: {error}"))
    }
}

fn classify_status(status: reqwest::StatusCode, body: &str) -> ServiceError {
    match status.as_u16() {
        401 | 403 => ServiceError::Credentials(format!("{status}: {body}")),
        408 | 429 | 500..=599 => ServiceError::Transient(format!("{status}: {body}")),
        _ => ServiceError::Client(format!("{status}: {body}")),
    }
}
