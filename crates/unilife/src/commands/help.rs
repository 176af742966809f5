//! Help command - displays available commands.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use async_trait::async_trait;

pub struct HelpHandler;

impl HelpHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HelpHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandHandler for HelpHandler {
    fn trigger(&self) -> Option<&str> {
        Some("!help")
    }

    async fn execute(&self, _input: &str) -> AppResult<String> {
        Ok(r#"UniLife - your campus-life assistant

Just type a message to chat. I can check your timetable, budget, health, todos, exams and trip plans, record expenses and tick off todos.

Commands:
- !water - Log a cup of water
- !exercise - Log today's workout
- !mood <text> - Set today's mood
- !pack <item> - Tick or untick a packing-list item (no item shows the list)
- !clear - Clear conversation history
- !models - List available AI models
- !help - Show this message

Press Ctrl-D or Ctrl-C to quit."#
            .into())
    }
}
