//! Tool registry for managing available tools.

use crate::error::ToolError;
use crate::types::{Tool, ToolDefinition};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Registry of available tools.
///
/// Registration order is kept: it is the order schemas are offered to the
/// model in, and it does not change between calls.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
    enabled: HashSet<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
            enabled: HashSet::new(),
        }
    }

    /// Register a tool (enabled by default). Names must be unique.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.index.contains_key(&name) {
            return Err(ToolError::DuplicateTool(name));
        }
        self.index.insert(name.clone(), self.tools.len());
        self.tools.push(tool);
        self.enabled.insert(name);
        Ok(())
    }

    pub fn enable(&mut self, name: &str) -> Result<(), ToolError> {
        if !self.index.contains_key(name) {
            return Err(ToolError::UnknownTool(name.to_string()));
        }
        self.enabled.insert(name.to_string());
        Ok(())
    }

    pub fn disable(&mut self, name: &str) -> Result<(), ToolError> {
        if !self.index.contains_key(name) {
            return Err(ToolError::UnknownTool(name.to_string()));
        }
        self.enabled.remove(name);
        Ok(())
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.contains(name)
    }

    /// Definitions for all enabled tools, in registration order.
    pub fn get_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .filter(|tool| self.enabled.contains(tool.name()))
            .map(|tool| tool.definition())
            .collect()
    }

    /// Get a tool by name (only if enabled).
    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        if !self.enabled.contains(name) {
            return None;
        }
        self.index.get(name).map(|&i| Arc::clone(&self.tools[i]))
    }

    pub fn list_tools(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn list_enabled(&self) -> Vec<&str> {
        self.tools
            .iter()
            .map(|t| t.name())
            .filter(|name| self.enabled.contains(*name))
            .collect()
    }

    /// Parse, validate and run one call.
    ///
    /// An empty or whitespace-only payload is treated as `{}`.
    pub async fn dispatch(&self, name: &str, raw_arguments: &str) -> Result<String, ToolError> {
        let tool = self
            .get_tool(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        let raw = raw_arguments.trim();
        let value: Value = if raw.is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_str(raw).map_err(|e| ToolError::ArgumentParse(e.to_string()))?
        };

        let args = tool.parameters().validate(&value)?;
        debug!(tool = %name, "Arguments validated");
        tool.execute(args).await
    }

    /// Like [`dispatch`](Self::dispatch), but every failure is rendered as
    /// text so the model can read it.
    pub async fn execute(&self, name: &str, raw_arguments: &str) -> String {
        match self.dispatch(name, raw_arguments).await {
            Ok(output) => output,
            Err(e) => {
                warn!(tool = %name, error = %e, "Tool call failed");
                e.to_string()
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
