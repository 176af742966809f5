//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Model endpoint error: {0}")]
    Llm(#[from] llm_client::LlmError),

    #[error("Data error: {0}")]
    Data(#[from] campus_data::CampusDataError),

    #[error("Tool setup error: {0}")]
    Tools(#[from] tools::ToolError),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
