//! Clear command - resets conversation history.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use crate::session::ChatSession;
use async_trait::async_trait;
use std::sync::Arc;

pub struct ClearHandler {
    session: Arc<ChatSession>,
}

impl ClearHandler {
    pub fn new(session: Arc<ChatSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl CommandHandler for ClearHandler {
    fn trigger(&self) -> Option<&str> {
        Some("!clear")
    }

    async fn execute(&self, _input: &str) -> AppResult<String> {
        if self.session.clear().await? {
            Ok("Conversation history cleared.".into())
        } else {
            Ok("No conversation history to clear.".into())
        }
    }
}
