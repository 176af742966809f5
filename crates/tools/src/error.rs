//! Tool execution errors.

use campus_data::CampusDataError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during tool registration or execution.
///
/// At execution time every variant is rendered to text and handed back to
/// the model as the tool result.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The model asked for a tool that is not registered or is disabled.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A tool with this name is already registered.
    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    /// The raw argument payload is not valid JSON.
    #[error("Argument parse error: {0}")]
    ArgumentParse(String),

    /// Arguments do not match the tool's parameter schema.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Reading or writing the persisted state failed.
    #[error("Data store error: {0}")]
    Data(String),

    /// Tool execution timed out.
    #[error("Tool execution timed out after {0:?}")]
    Timeout(Duration),
}

impl From<CampusDataError> for ToolError {
    fn from(err: CampusDataError) -> Self {
        match err {
            CampusDataError::InvalidInput(msg) => ToolError::InvalidArguments(msg),
            other => ToolError::Data(other.to_string()),
        }
    }
}
