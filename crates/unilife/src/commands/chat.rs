//! Chat command - sends free text to the assistant.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use crate::session::ChatSession;
use agent::AgentReply;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

/// Tool results longer than this are shortened in the printed call log.
const RESULT_PREVIEW_CHARS: usize = 120;

pub struct ChatHandler {
    session: Arc<ChatSession>,
}

impl ChatHandler {
    pub fn new(session: Arc<ChatSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl CommandHandler for ChatHandler {
    fn is_default(&self) -> bool {
        true
    }

    #[instrument(skip(self, input))]
    async fn execute(&self, input: &str) -> AppResult<String> {
        let reply = self.session.send(input).await?;
        info!(outcome = ?reply.outcome, tools = reply.calls.len(), "Turn complete");
        Ok(format_reply(&reply))
    }
}

/// The answer followed by the tool calls that produced it.
pub fn format_reply(reply: &AgentReply) -> String {
    if reply.calls.is_empty() {
        return reply.content.clone();
    }

    let mut out = reply.content.clone();
    out.push_str("\n\n🔧 Tools used:");
    for call in &reply.calls {
        let mark = if call.success { "✓" } else { "✗" };
        let first_line = call.result.lines().next().unwrap_or_default();
        let preview: String = first_line.chars().take(RESULT_PREVIEW_CHARS).collect();
        out.push_str(&format!("\n  {} {} {} → {}", mark, call.name, call.arguments, preview));
    }
    out
}
