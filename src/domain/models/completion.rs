use serde::{Deserialize, Deserializer, Serialize};

use super::{ConversationEntry, ConversationMessage, ModeKey, PromptTemplate};
use crate::domain::RelayError;

pub const UPSTREAM_MODEL: &str = "llama-3.3-70b-versatile";
pub const MAX_OUTPUT_TOKENS: u32 = 2000;
pub const SAMPLING_TEMPERATURE: f32 = 0.7;

/// Only the most recent turns are forwarded upstream.
pub const HISTORY_LIMIT: usize = 10;

/// Reply sent when the upstream succeeds without any usable text.
pub const PLACEHOLDER_REPLY: &str = "لم أتمكن من توليد إجابة.";

/// Inbound relay body: `{ "messages": [...], "mode": "..." }`.
///
/// Both fields are optional. Missing or `null` messages mean an empty
/// conversation and any unrecognized mode means `general`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RelayRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    messages: Vec<ConversationEntry>,
    #[serde(default)]
    mode: ModeKey,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ConversationEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ConversationEntry>>::deserialize(deserializer)?.unwrap_or_default())
}

impl RelayRequest {
    pub fn new(messages: Vec<ConversationEntry>, mode: ModeKey) -> Self {
        Self { messages, mode }
    }

    /// Parse a raw request body. An empty (or whitespace-only) body is `{}`.
    pub fn from_slice(body: &[u8]) -> Result<Self, RelayError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| RelayError::invalid_request(e.to_string()))
    }

    pub fn messages(&self) -> &[ConversationEntry] {
        &self.messages
    }

    pub fn mode(&self) -> ModeKey {
        self.mode
    }

    /// The trailing [`HISTORY_LIMIT`] entries, in their original order.
    pub fn recent_history(&self) -> &[ConversationEntry] {
        let skip = self.messages.len().saturating_sub(HISTORY_LIMIT);
        &self.messages[skip..]
    }
}

/// Payload of one upstream chat-completion call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ConversationEntry>,
}

impl CompletionRequest {
    /// System prompt first, then the conversation as given.
    pub fn new(template: &PromptTemplate, history: &[ConversationEntry]) -> Self {
        let mut messages: Vec<ConversationEntry> = Vec::with_capacity(history.len() + 1);
        messages.push(ConversationMessage::system(template.text()).into());
        messages.extend_from_slice(history);

        Self {
            model: UPSTREAM_MODEL.to_string(),
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: SAMPLING_TEMPERATURE,
            messages,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn messages(&self) -> &[ConversationEntry] {
        &self.messages
    }

    /// The caller's part of the conversation, without the injected system prompt.
    pub fn conversation(&self) -> &[ConversationEntry] {
        &self.messages[1..]
    }
}

/// What the upstream answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// 2xx; the first choice's content when the body carried one.
    Reply(Option<String>),
    /// Non-2xx; `message` is the upstream `error.message` when present.
    Rejected { status: u16, message: Option<String> },
}

/// Successful relay body: `{ "reply": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    reply: String,
}

impl ChatReply {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }

    /// Empty or missing text becomes [`PLACEHOLDER_REPLY`].
    pub fn or_placeholder(text: Option<String>) -> Self {
        match text {
            Some(text) if !text.is_empty() => Self::new(text),
            _ => Self::new(PLACEHOLDER_REPLY),
        }
    }

    pub fn reply(&self) -> &str {
        &self.reply
    }

    pub fn into_reply(self) -> String {
        self.reply
    }
}
