//! Chat completions client with OpenAI-compatible tool calling.

mod client;
mod error;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use types::*;
