pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::Commands;

pub use application::{CompletionClient, RelayChatUseCase};

pub use connector::{
    build_app, serve, Container, ContainerConfig, GroqClient, MockCompletionClient, CHAT_PATH,
};

pub use domain::{
    ChatReply, CompletionOutcome, CompletionRequest, ConversationEntry, ConversationMessage,
    ModeKey, PromptTable, PromptTemplate, RelayError, RelayRequest, Role,
};
