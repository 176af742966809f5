//! HTTP client for OpenAI-compatible chat completion endpoints.

use crate::error::LlmError;
use crate::types::*;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Chat completions client (DeepSeek, OpenAI and compatible services).
///
/// The API key is held as a `SecretString` and only exposed when the
/// `Authorization` header is built.
#[derive(Clone)]
pub struct LlmClient {
    http: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
}

impl LlmClient {
    /// Create a new client. `timeout` bounds every request end to end.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: SecretString::new(api_key.into()),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Text-only completion. An empty answer is an error.
    #[instrument(skip(self, messages), fields(message_count = messages.len()))]
    pub async fn chat(
        &self,
        messages: Vec<Message>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Result<String, LlmError> {
        let response = self.chat_with_tools(messages, temperature, max_tokens, None).await?;

        response
            .content
            .filter(|content| !content.is_empty())
            .ok_or(LlmError::EmptyResponse)
    }

    /// Completion that may answer with tool calls.
    ///
    /// `None` or an empty slice leaves `tools` and `tool_choice` out of the
    /// request body, so the model has to answer in text.
    #[instrument(
        skip(self, messages, tools),
        fields(message_count = messages.len(), tool_count = tools.map_or(0, <[_]>::len))
    )]
    pub async fn chat_with_tools(
        &self,
        messages: Vec<Message>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
        tools: Option<&[ToolDefinition]>,
    ) -> Result<ChatResponseWithTools, LlmError> {
        let tools = tools.filter(|t| !t.is_empty());
        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature,
            max_tokens,
            stream: false,
            tools,
            tool_choice: tools.map(|_| "auto"),
        };

        let request = self
            .authorized(self.http.post(self.url("chat/completions")))
            .json(&body);
        let completion: Completion = self.send(request).await?;

        let Completion { choices, usage } = completion;
        let choice = choices.into_iter().next().ok_or(LlmError::EmptyResponse)?;

        Ok(ChatResponseWithTools {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls,
            finish_reason: choice.finish_reason.unwrap_or_else(|| "stop".into()),
            usage,
        })
    }

    #[instrument(skip(self))]
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, LlmError> {
        let request = self.authorized(self.http.get(self.url("models")));
        let list: ModelList = self.send(request).await?;
        Ok(list.data)
    }

    /// True when `GET /models` succeeds.
    pub async fn health_check(&self) -> bool {
        self.list_models().await.is_ok()
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.api_key.expose_secret())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, LlmError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(status_error(status, response).await);
        }

        let body = response.text().await?;
        debug!(body = preview(&body, 200), "Endpoint responded");
        Ok(serde_json::from_str(&body)?)
    }
}

async fn status_error(status: StatusCode, response: Response) -> LlmError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            warn!("Rate limit exceeded");
            LlmError::RateLimit
        }
        StatusCode::UNAUTHORIZED => {
            warn!("Authentication failed");
            LlmError::Unauthorized
        }
        _ => LlmError::Api {
            status: status.as_u16(),
            message: response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into()),
        },
    }
}

fn preview(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
