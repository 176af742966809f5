//! The completion endpoint seen from the agent.

use async_trait::async_trait;
use llm_client::{ChatResponseWithTools, LlmClient, LlmError, Message, ToolDefinition};

/// A chat model that can answer or request tool calls.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// One completion over `messages`. When `tools` is `None` the model
    /// must answer in text.
    async fn complete(
        &self,
        messages: Vec<Message>,
        tools: Option<&[ToolDefinition]>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Result<ChatResponseWithTools, LlmError>;
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn complete(
        &self,
        messages: Vec<Message>,
        tools: Option<&[ToolDefinition]>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Result<ChatResponseWithTools, LlmError> {
        self.chat_with_tools(messages, temperature, max_tokens, tools).await
    }
}
