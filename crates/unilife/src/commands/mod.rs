//! Console command handlers.

mod chat;
mod clear;
mod health;
mod help;
mod models;
mod pack;

pub use chat::{format_reply, ChatHandler};
pub use clear::ClearHandler;
pub use health::{ExerciseHandler, MoodHandler, WaterHandler};
pub use help::HelpHandler;
pub use models::ModelsHandler;
pub use pack::PackHandler;

use crate::error::AppResult;
use async_trait::async_trait;

/// Command handler trait.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command trigger (e.g., "!help").
    fn trigger(&self) -> Option<&str> {
        None
    }

    /// Whether this is the default handler for non-command input.
    fn is_default(&self) -> bool {
        false
    }

    /// Check if this handler matches the input line.
    fn matches(&self, input: &str) -> bool {
        if let Some(trigger) = self.trigger() {
            input.split_whitespace().next() == Some(trigger)
        } else {
            self.is_default() && !input.starts_with('!')
        }
    }

    async fn execute(&self, input: &str) -> AppResult<String>;
}

/// First handler matching `input`.
pub fn find<'a>(handlers: &'a [Box<dyn CommandHandler>], input: &str) -> Option<&'a dyn CommandHandler> {
    handlers.iter().find(|h| h.matches(input)).map(|h| h.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<&'static str>);

    #[async_trait]
    impl CommandHandler for Fixed {
        fn trigger(&self) -> Option<&str> {
            self.0
        }

        fn is_default(&self) -> bool {
            self.0.is_none()
        }

        async fn execute(&self, _input: &str) -> AppResult<String> {
            Ok(self.0.unwrap_or("chat").to_string())
        }
    }

    async fn run(handlers: &[Box<dyn CommandHandler>], input: &str) -> Option<String> {
        match find(handlers, input) {
            Some(h) => Some(h.execute(input).await.unwrap()),
            None => None,
        }
    }

    #[tokio::test]
    async fn test_dispatch() {
        let handlers: Vec<Box<dyn CommandHandler>> = vec![
            Box::new(Fixed(None)),
            Box::new(Fixed(Some("!clear"))),
            Box::new(Fixed(Some("!help"))),
        ];

        assert_eq!(run(&handlers, "hello").await.as_deref(), Some("chat"));
        assert_eq!(run(&handlers, "!clear").await.as_deref(), Some("!clear"));
        assert_eq!(run(&handlers, "!help me").await.as_deref(), Some("!help"));
        assert_eq!(run(&handlers, "!clearall").await, None);
        assert_eq!(run(&handlers, "!unknown").await, None);
    }
}
