//! Common test utilities for integration tests.

#![allow(dead_code)]

use llm_client::LlmClient;
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;
use unilife::config::{AgentSettings, AppConfig, Config, DataConfig, LlmConfig, ToolsConfig};
use wiremock::MockServer;

/// Start a mock model endpoint.
pub async fn mock_llm_server() -> MockServer {
    MockServer::start().await
}

/// Create a client configured for a mock server.
pub fn test_llm_client(mock_server: &MockServer) -> LlmClient {
    LlmClient::new(
        "test-api-key",
        mock_server.uri(),
        "test-model",
        Duration::from_secs(5),
    )
    .unwrap()
}

/// Configuration pointing at a mock server and a scratch data file.
pub fn test_config(mock_server: &MockServer, data_path: &Path) -> Config {
    Config {
        llm: LlmConfig {
            api_key: "test-api-key".into(),
            base_url: mock_server.uri(),
            model: "test-model".into(),
            timeout: Duration::from_secs(5),
        },
        agent: AgentSettings::default(),
        tools: ToolsConfig::default(),
        data: DataConfig {
            path: data_path.to_path_buf(),
            max_history: 50,
        },
        app: AppConfig::default(),
    }
}

/// A chat completion answering with plain text.
pub fn text_completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-text",
        "object": "chat.completion",
        "created": 1677652288,
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 10,
            "completion_tokens": 15,
            "total_tokens": 25
        }
    })
}

/// A chat completion requesting one tool call.
pub fn tool_call_completion(id: &str, name: &str, arguments: Value) -> Value {
    json!({
        "id": "chatcmpl-tool",
        "object": "chat.completion",
        "created": 1677652288,
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": id,
                    "type": "function",
                    "function": {
                        "name": name,
                        "arguments": arguments.to_string()
                    }
                }]
            },
            "finish_reason": "tool_calls"
        }]
    })
}
