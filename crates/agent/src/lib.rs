//! Tool-calling agent loop over a chat model and the tool registry.

mod agent;
mod model;
mod types;

pub use agent::{diagnostic, Agent, AgentConfig, NO_RESPONSE};
pub use model::ChatModel;
pub use types::{AgentReply, Outcome, ToolCallRecord};
