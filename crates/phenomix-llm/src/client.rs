//! The chat model seam.

use async_trait::async_trait;

use crate::error::LlmResult;

/// A chat-completion model taking one system and one user message.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the two messages and return the assistant's reply text.
    async fn complete(&self, system: &str, user: &str) -> LlmResult<String>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
