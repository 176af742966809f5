//! Bounded tool-calling loop.

use crate::model::ChatModel;
use crate::types::{AgentReply, Outcome, ToolCallRecord};
use llm_client::{LlmError, Message, ToolCall, ToolDefinition};
use std::sync::Arc;
use tools::ToolExecutor;
use tracing::{debug, error, info, instrument, warn};

/// Answer used when the model returns no text.
pub const NO_RESPONSE: &str = "I don't have a response.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentConfig {
    /// Tool rounds before the model is forced to answer.
    pub max_rounds: usize,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_rounds: 5,
            temperature: 0.8,
            max_tokens: 1024,
        }
    }
}

/// Drives one user turn: model call, tool execution, repeat until the
/// model answers or the round limit is hit.
pub struct Agent {
    model: Arc<dyn ChatModel>,
    executor: Arc<ToolExecutor>,
    tools: Vec<ToolDefinition>,
    config: AgentConfig,
}

impl Agent {
    pub fn new(model: Arc<dyn ChatModel>, executor: Arc<ToolExecutor>, config: AgentConfig) -> Self {
        let tools = executor
            .registry()
            .get_definitions()
            .into_iter()
            .map(|d| ToolDefinition::function(d.name, d.description, d.parameters))
            .collect();

        Self {
            model,
            executor,
            tools,
            config,
        }
    }

    /// Tool schemas offered to the model, in registration order.
    pub fn tool_definitions(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Run the loop over `history`, which should end with the new user
    /// message.
    #[instrument(skip(self, history), fields(history_len = history.len()))]
    pub async fn run(&self, history: Vec<Message>) -> AgentReply {
        let mut transcript = history;
        let mut calls = Vec::new();
        let offered = (!self.tools.is_empty()).then_some(self.tools.as_slice());

        for round in 1..=self.config.max_rounds {
            debug!(round, "Awaiting model");
            let response = match self.complete(&transcript, offered).await {
                Ok(r) => r,
                Err(e) => return Self::endpoint_failed(e, calls, transcript),
            };

            let Some(requested) = response.requested_calls() else {
                if response.tool_calls.is_some() {
                    debug!("Model returned an empty tool_calls array, treating as answer");
                }
                return Self::finish(response.content, Outcome::Answered, calls, transcript);
            };
            let requested = requested.to_vec();
            debug!(round, count = requested.len(), "Model requested tool calls");

            transcript.push(Message::assistant_with_tool_calls(
                response.content,
                requested.clone(),
            ));
            for call in &requested {
                let (record, reply) = self.execute_call(call).await;
                calls.push(record);
                transcript.push(reply);
            }
        }

        warn!(max_rounds = self.config.max_rounds, "Tool round limit reached, forcing an answer");
        match self.complete(&transcript, None).await {
            Ok(response) => {
                if response.requested_calls().is_some() {
                    warn!("Model requested tools after the round limit, ignoring them");
                }
                Self::finish(response.content, Outcome::RoundLimitReached, calls, transcript)
            }
            Err(e) => Self::endpoint_failed(e, calls, transcript),
        }
    }

    async fn complete(
        &self,
        transcript: &[Message],
        tools: Option<&[ToolDefinition]>,
    ) -> Result<llm_client::ChatResponseWithTools, LlmError> {
        self.model
            .complete(
                transcript.to_vec(),
                tools,
                Some(self.config.temperature),
                Some(self.config.max_tokens),
            )
            .await
    }

    async fn execute_call(&self, call: &ToolCall) -> (ToolCallRecord, Message) {
        let request = tools::ToolCall::new(&call.id, &call.function.name, &call.function.arguments);
        let result = self.executor.execute(&request).await;

        let record = ToolCallRecord {
            name: call.function.name.clone(),
            arguments: ToolCallRecord::parse_arguments(&call.function.arguments),
            result: result.content.clone(),
            success: result.success,
        };
        (record, Message::tool_result(&call.id, result.content))
    }

    fn finish(
        content: Option<String>,
        outcome: Outcome,
        calls: Vec<ToolCallRecord>,
        mut transcript: Vec<Message>,
    ) -> AgentReply {
        let content = content
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| NO_RESPONSE.to_string());
        transcript.push(Message::assistant(content.clone()));
        info!(?outcome, calls = calls.len(), chars = content.len(), "Agent finished");

        AgentReply {
            content,
            calls,
            transcript,
            outcome,
        }
    }

    fn endpoint_failed(
        err: LlmError,
        calls: Vec<ToolCallRecord>,
        transcript: Vec<Message>,
    ) -> AgentReply {
        error!(error = %err, "Model endpoint failed");
        AgentReply {
            content: diagnostic(&err),
            calls,
            transcript,
            outcome: Outcome::EndpointFailed,
        }
    }
}

/// User-facing text for an endpoint failure.
pub fn diagnostic(err: &LlmError) -> String {
    match err {
        LlmError::RateLimit => {
            "⚠️ The AI service is receiving too many requests. Please wait a moment and try again."
                .into()
        }
        LlmError::Unauthorized => {
            "⚠️ The AI service rejected the API key. Please check that LLM__API_KEY is configured correctly."
                .into()
        }
        other => format!("⚠️ Something went wrong talking to the AI service: {}", other),
    }
}
