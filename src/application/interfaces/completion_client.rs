use async_trait::async_trait;

use crate::domain::{CompletionOutcome, CompletionRequest, RelayError};

/// Sends a chat-completion request to an upstream model provider.
///
/// A non-success HTTP status is not an error at this seam: it comes back as
/// [`CompletionOutcome::Rejected`] so the use case can classify it.
/// `Err` is reserved for transport and decoding failures and should be
/// [`RelayError::Unexpected`].
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionOutcome, RelayError>;

    /// Name of the backing provider, for logging.
    fn provider_name(&self) -> &str;
}
