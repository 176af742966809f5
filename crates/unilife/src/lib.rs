//! UniLife campus-life assistant: configuration, session and console
//! commands around the tool-calling agent.

pub mod commands;
pub mod config;
pub mod error;
pub mod prompt;
pub mod session;

use crate::config::Config;
use crate::error::AppResult;
use crate::session::ChatSession;
use agent::{Agent, ChatModel};
use campus_data::{CampusData, Dashboard, UserDataStore};
use std::sync::Arc;
use tools::{ToolExecutor, ToolRegistry};
use tracing::info;

/// Registry with every built-in tool, minus the ones switched off.
pub fn build_registry(data: Arc<dyn CampusData>, disabled: &[&str]) -> AppResult<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    tools::builtin::register_all(&mut registry, data)?;
    for name in disabled {
        registry.disable(name)?;
    }
    info!(
        "Registered {} tools ({} enabled)",
        registry.list_tools().len(),
        registry.list_enabled().len()
    );
    Ok(registry)
}

/// Open the store and wire data, tools and agent into a session.
pub async fn build_session(config: &Config, model: Arc<dyn ChatModel>) -> AppResult<ChatSession> {
    let store = Arc::new(UserDataStore::open(&config.data.path).await?);
    let data: Arc<dyn CampusData> = Arc::new(Dashboard::new(Arc::clone(&store)));

    let registry = build_registry(Arc::clone(&data), &config.tools.disabled_tools())?;
    let executor = ToolExecutor::new(Arc::new(registry))
        .with_timeout(config.tools.timeout)
        .with_max_response_len(config.tools.max_response_len);
    let agent = Agent::new(model, Arc::new(executor), config.agent.to_agent_config());

    Ok(ChatSession::new(
        agent,
        data,
        store,
        config.app.system_prompt.clone(),
        config.data.max_history,
    ))
}
