//! Tool executor with timeout and error handling.

use crate::error::ToolError;
use crate::registry::ToolRegistry;
use crate::types::{ToolCall, ToolResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info, instrument, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_RESPONSE_LEN: usize = 4000;

/// Executor for running tools with safety limits.
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
    timeout: Duration,
    max_response_len: usize,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            timeout: DEFAULT_TIMEOUT,
            max_response_len: DEFAULT_MAX_RESPONSE_LEN,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set maximum response length, in characters.
    pub fn with_max_response_len(mut self, len: usize) -> Self {
        self.max_response_len = len;
        self
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Execute a tool call. Never fails: errors come back as result text.
    #[instrument(skip(self, tool_call), fields(tool = %tool_call.name, id = %tool_call.id))]
    pub async fn execute(&self, tool_call: &ToolCall) -> ToolResult {
        let tool_name = &tool_call.name;
        info!("Executing tool");

        let dispatch = self.registry.dispatch(tool_name, &tool_call.arguments);
        let mutates = self
            .registry
            .get_tool(tool_name)
            .is_some_and(|tool| tool.mutates());

        let result = if mutates {
            dispatch.await
        } else {
            timeout(self.timeout, dispatch)
                .await
                .unwrap_or(Err(ToolError::Timeout(self.timeout)))
        };

        match result {
            Ok(content) => {
                let content = truncate(content, self.max_response_len);
                info!(len = content.len(), "Tool executed successfully");
                ToolResult::success(&tool_call.id, content)
            }
            Err(e @ ToolError::Timeout(_)) => {
                error!(timeout = ?self.timeout, "Tool timed out");
                ToolResult::error(&tool_call.id, e.to_string())
            }
            Err(e) => {
                warn!(error = %e, "Tool execution failed");
                ToolResult::error(&tool_call.id, e.to_string())
            }
        }
    }
}

fn truncate(content: String, max_chars: usize) -> String {
    let total = content.chars().count();
    if total <= max_chars {
        return content;
    }
    let cut: String = content.chars().take(max_chars).collect();
    format!("{}... [truncated, {} chars total]", cut, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Arguments, ParameterSchema};
    use crate::types::Tool;
    use async_trait::async_trait;

    struct SlowTool;

    #[async_trait]
    impl Tool for SlowTool {
        fn name(&self) -> &str {
            "slow"
        }

        fn description(&self) -> &str {
            "Slow tool"
        }

        fn parameters(&self) -> ParameterSchema {
            ParameterSchema::new()
        }

        async fn execute(&self, _args: Arguments) -> Result<String, ToolError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("done".into())
        }
    }

    struct SlowWriteTool;

    #[async_trait]
    impl Tool for SlowWriteTool {
        fn name(&self) -> &str {
            "slow_write"
        }

        fn description(&self) -> &str {
            "Slow mutating tool"
        }

        fn parameters(&self) -> ParameterSchema {
            ParameterSchema::new()
        }

        fn mutates(&self) -> bool {
            true
        }

        async fn execute(&self, _args: Arguments) -> Result<String, ToolError> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok("written".into())
        }
    }

    struct EchoTool(String);

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo tool"
        }

        fn parameters(&self) -> ParameterSchema {
            ParameterSchema::new()
        }

        async fn execute(&self, _args: Arguments) -> Result<String, ToolError> {
            Ok(self.0.clone())
        }
    }

    fn executor_with(tool: Arc<dyn Tool>) -> ToolExecutor {
        let mut registry = ToolRegistry::new();
        registry.register(tool).unwrap();
        ToolExecutor::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_execute_success() {
        let executor = executor_with(Arc::new(EchoTool("fast result".into())));

        let result = executor.execute(&ToolCall::new("call-1", "echo", "{}")).await;
        assert!(result.success);
        assert_eq!(result.tool_call_id, "call-1");
        assert_eq!(result.content, "fast result");
    }

    #[tokio::test]
    async fn test_execute_timeout() {
        let executor = executor_with(Arc::new(SlowTool)).with_timeout(Duration::from_millis(50));

        let result = executor.execute(&ToolCall::new("call-1", "slow", "{}")).await;
        assert!(!result.success);
        assert!(result.content.contains("timed out"));
    }

    #[tokio::test]
    async fn test_mutating_tool_runs_to_completion() {
        let executor = executor_with(Arc::new(SlowWriteTool)).with_timeout(Duration::from_millis(20));

        let result = executor.execute(&ToolCall::new("call-1", "slow_write", "{}")).await;
        assert!(result.success);
        assert_eq!(result.content, "written");
    }

    #[tokio::test]
    async fn test_execute_tool_not_found() {
        let executor = ToolExecutor::new(Arc::new(ToolRegistry::new()));

        let result = executor.execute(&ToolCall::new("call-1", "nonexistent", "{}")).await;
        assert!(!result.success);
        assert_eq!(result.content, "Unknown tool: nonexistent");
    }

    #[tokio::test]
    async fn test_truncation_respects_char_boundaries() {
        let executor = executor_with(Arc::new(EchoTool("¥".repeat(10)))).with_max_response_len(4);

        let result = executor.execute(&ToolCall::new("call-1", "echo", "")).await;
        assert!(result.success);
        assert_eq!(result.content, "¥¥¥¥... [truncated, 10 chars total]");
    }

    #[test]
    fn test_truncate_short_content_untouched() {
        assert_eq!(truncate("abc".into(), 3), "abc");
    }
}
