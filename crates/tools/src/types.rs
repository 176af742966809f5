//! Core tool types: the [`Tool`] trait and what flows in and out of it.

use crate::error::ToolError;
use crate::schema::{Arguments, ParameterSchema};
use async_trait::async_trait;
use serde::Serialize;

/// What the model is told about a tool. Rendered into a function entry of
/// the request's `tools` array by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema of the argument object.
    pub parameters: serde_json::Value,
}

/// A single invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// Raw JSON text as the model sent it. May be empty or malformed.
    pub arguments: String,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// Outcome of one [`ToolCall`]. Failures carry the error text in `content`.
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub content: String,
    pub success: bool,
}

impl ToolResult {
    pub fn success(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
            success: true,
        }
    }

    pub fn error(tool_call_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::success(tool_call_id, message)
        }
    }
}

/// A capability the model can invoke.
///
/// Handlers receive arguments that already passed [`Tool::parameters`]
/// validation, so they only need to deal with domain failures.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    /// Shown to the model; should say when to use the tool.
    fn description(&self) -> &str;

    fn parameters(&self) -> ParameterSchema;

    /// Whether the tool writes to the store. Writing tools are exempt from
    /// the executor timeout.
    fn mutates(&self) -> bool {
        false
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters().to_json(),
        }
    }

    async fn execute(&self, args: Arguments) -> Result<String, ToolError>;
}
