//! Models command - lists available AI models.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use async_trait::async_trait;
use llm_client::LlmClient;
use std::sync::Arc;
use tracing::error;

pub struct ModelsHandler {
    client: Arc<LlmClient>,
}

impl ModelsHandler {
    pub fn new(client: Arc<LlmClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CommandHandler for ModelsHandler {
    fn trigger(&self) -> Option<&str> {
        Some("!models")
    }

    async fn execute(&self, _input: &str) -> AppResult<String> {
        match self.client.list_models().await {
            Ok(models) => {
                let model_list: String = models
                    .iter()
                    .take(10)
                    .map(|m| format!("- {}", m.id))
                    .collect::<Vec<_>>()
                    .join("\n");

                Ok(format!(
                    "Available models:\n{}\n\nCurrent: {}",
                    model_list,
                    self.client.model()
                ))
            }
            Err(e) => {
                error!("Failed to list models: {}", e);
                Ok("Could not fetch model list.".into())
            }
        }
    }
}
