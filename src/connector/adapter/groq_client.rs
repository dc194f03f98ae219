use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error};

use crate::application::CompletionClient;
use crate::domain::{CompletionOutcome, CompletionRequest, RelayError};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for Groq's OpenAI-compatible chat completions endpoint.
///
/// The credential is sent as a bearer token. Any server speaking the same
/// protocol can be targeted by overriding the base URL:
///
/// ```text
/// GROQ_BASE_URL=http://localhost:8080
/// GROQ_API_KEY=gsk_...
/// ```
pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// `error.message` of an upstream error body, if it has one.
    fn error_message(body: &Value) -> Option<String> {
        body.pointer("/error/message")
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    /// `choices[0].message.content` of a success body, if it is a string.
    fn first_choice_content(body: &Value) -> Option<String> {
        body.pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_owned)
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionOutcome, RelayError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| RelayError::unexpected(e.to_string()))?;

        let status = response.status();
        debug!("Groq responded with {status}");

        if !status.is_success() {
            // An unreadable or non-JSON error body counts as `{}`.
            let text = response.text().await.unwrap_or_default();
            let body: Value =
                serde_json::from_str(&text).unwrap_or_else(|_| Value::Object(Default::default()));
            error!("Groq API error ({status}): {body}");
            return Ok(CompletionOutcome::Rejected {
                status: status.as_u16(),
                message: Self::error_message(&body),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| RelayError::unexpected(e.to_string()))?;

        Ok(CompletionOutcome::Reply(Self::first_choice_content(&body)))
    }

    fn provider_name(&self) -> &str {
        "groq"
    }
}
