use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::CompletionClient;
use crate::domain::{CompletionOutcome, CompletionRequest, RelayError, Role};

enum Script {
    Echo,
    Outcome(CompletionOutcome),
    Fail(String),
}

/// Offline stand-in for an upstream provider.
///
/// By default it echoes the last user message back. It records every
/// request it receives so callers can inspect what would have been sent.
pub struct MockCompletionClient {
    script: Script,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self::scripted(Script::Echo)
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_outcome(CompletionOutcome::Reply(Some(text.into())))
    }

    pub fn with_outcome(outcome: CompletionOutcome) -> Self {
        Self::scripted(Script::Outcome(outcome))
    }

    /// Every call fails as a transport error carrying `description`.
    pub fn failing(description: impl Into<String>) -> Self {
        Self::scripted(Script::Fail(description.into()))
    }

    fn scripted(script: Script) -> Self {
        Self {
            script,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests().pop()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn echo(request: &CompletionRequest) -> Option<String> {
        request
            .conversation()
            .iter()
            .rev()
            .filter_map(|entry| entry.as_message())
            .find(|message| message.role() == Role::User)
            .map(|message| format!("echo: {}", message.content()))
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionOutcome, RelayError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        match &self.script {
            Script::Echo => Ok(CompletionOutcome::Reply(Self::echo(request))),
            Script::Outcome(outcome) => Ok(outcome.clone()),
            Script::Fail(description) => Err(RelayError::unexpected(description.clone())),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
