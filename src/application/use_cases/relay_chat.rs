use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::application::CompletionClient;
use crate::domain::{
    ChatReply, CompletionOutcome, CompletionRequest, PromptTable, RelayError, RelayRequest,
};

/// Forwards one conversation upstream behind the prompt of its mode.
///
/// `client` is `None` when no upstream credential was configured; every
/// request then fails with [`RelayError::MissingCredential`] before any
/// network call is made.
pub struct RelayChatUseCase {
    prompts: Arc<PromptTable>,
    client: Option<Arc<dyn CompletionClient>>,
}

impl RelayChatUseCase {
    pub fn new(prompts: Arc<PromptTable>, client: Option<Arc<dyn CompletionClient>>) -> Self {
        Self { prompts, client }
    }

    /// System prompt for the request's mode, then its most recent history.
    pub fn build_request(&self, request: &RelayRequest) -> CompletionRequest {
        let template = self.prompts.template(request.mode());
        CompletionRequest::new(template, request.recent_history())
    }

    /// The configured upstream client, or [`RelayError::MissingCredential`].
    pub fn ensure_configured(&self) -> Result<&Arc<dyn CompletionClient>, RelayError> {
        self.client.as_ref().ok_or_else(|| {
            error!("No upstream credential configured; rejecting request");
            RelayError::MissingCredential
        })
    }

    pub async fn execute(&self, request: RelayRequest) -> Result<ChatReply, RelayError> {
        let client = self.ensure_configured()?;

        let completion = self.build_request(&request);
        info!(
            "Relaying {} of {} messages (mode={}) to {} model={} max_tokens={} temperature={}",
            completion.conversation().len(),
            request.messages().len(),
            request.mode(),
            client.provider_name(),
            completion.model(),
            completion.max_tokens(),
            completion.temperature(),
        );

        let start_time = Instant::now();
        let outcome = client.complete(&completion).await;
        debug!("Upstream call took {:?}", start_time.elapsed());

        match outcome {
            Ok(CompletionOutcome::Reply(text)) => Ok(ChatReply::or_placeholder(text)),
            Ok(CompletionOutcome::Rejected { status, message }) => {
                warn!(
                    "{} rejected request with {}: {}",
                    client.provider_name(),
                    status,
                    message.as_deref().unwrap_or("<no message>")
                );
                Err(RelayError::from_upstream(status, message))
            }
            Err(e) => {
                error!("Server error: {}", e);
                Err(e)
            }
        }
    }
}
