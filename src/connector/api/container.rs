use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::application::{CompletionClient, RelayChatUseCase};
use crate::connector::adapter::{GroqClient, MockCompletionClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::domain::PromptTable;

pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const BASE_URL_VAR: &str = "GROQ_BASE_URL";

pub struct ContainerConfig {
    /// Upstream credential. Requests fail with a configuration error when unset.
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    /// Answer from [`MockCompletionClient`] instead of calling the upstream.
    pub mock_upstream: bool,
}

impl ContainerConfig {
    /// Read the upstream settings from the environment:
    ///
    /// | Variable        | Default                       |
    /// |-----------------|-------------------------------|
    /// | `GROQ_API_KEY`  | none (relay answers 500)      |
    /// | `GROQ_BASE_URL` | `https://api.groq.com/openai` |
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty());
        let base_url =
            std::env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            api_key,
            base_url,
            timeout: DEFAULT_TIMEOUT,
            mock_upstream: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_mock_upstream(mut self, mock_upstream: bool) -> Self {
        self.mock_upstream = mock_upstream;
        self
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            mock_upstream: false,
        }
    }
}

/// Process-wide, read-only state shared by every request.
pub struct Container {
    prompts: Arc<PromptTable>,
    client: Option<Arc<dyn CompletionClient>>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let client: Option<Arc<dyn CompletionClient>> = if config.mock_upstream {
            info!("Using mock completion client");
            Some(Arc::new(MockCompletionClient::new()))
        } else if let Some(api_key) = config.api_key {
            let groq = GroqClient::new(api_key, config.base_url, config.timeout);
            debug!("Upstream endpoint: {}", groq.url());
            Some(Arc::new(groq))
        } else {
            warn!("{API_KEY_VAR} is not set; chat requests will fail until it is configured");
            None
        };

        Self::with_client(client)
    }

    /// Build a container around an already-constructed client.
    pub fn with_client(client: Option<Arc<dyn CompletionClient>>) -> Self {
        Self {
            prompts: Arc::new(PromptTable::builtin()),
            client,
        }
    }

    pub fn relay_use_case(&self) -> RelayChatUseCase {
        RelayChatUseCase::new(self.prompts.clone(), self.client.clone())
    }

    pub fn prompts(&self) -> &PromptTable {
        &self.prompts
    }

    pub fn has_upstream(&self) -> bool {
        self.client.is_some()
    }
}
