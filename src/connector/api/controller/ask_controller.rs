use anyhow::Result;

use crate::domain::{ConversationMessage, ModeKey, RelayRequest};

use super::super::Container;

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Relay a single user question in `mode` and return the reply text.
    pub async fn ask(&self, message: String, mode: String) -> Result<String> {
        let request = RelayRequest::new(
            vec![ConversationMessage::user(message).into()],
            ModeKey::resolve(&mode),
        );
        let reply = self.container.relay_use_case().execute(request).await?;
        Ok(reply.into_reply())
    }
}
