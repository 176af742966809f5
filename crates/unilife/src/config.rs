//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Model endpoint configuration
    pub llm: LlmConfig,

    #[serde(default)]
    pub agent: AgentSettings,

    #[serde(default)]
    pub tools: ToolsConfig,

    /// Persisted dashboard state and chat history
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub app: AppConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub api_key: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout
    #[serde(default = "default_llm_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentSettings {
    /// Tool rounds per user turn before the model must answer
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolsConfig {
    /// Per-call execution timeout
    #[serde(default = "default_tool_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Tool results longer than this many characters are truncated
    #[serde(default = "default_max_response_len")]
    pub max_response_len: usize,

    /// Comma-separated tool names to switch off
    #[serde(default)]
    pub disabled: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,

    /// Saved chat messages kept and replayed to the model
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl ToolsConfig {
    /// Names listed in `disabled`, trimmed, blanks skipped.
    pub fn disabled_tools(&self) -> Vec<&str> {
        self.disabled
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }
}

impl AgentSettings {
    pub fn to_agent_config(&self) -> agent::AgentConfig {
        agent::AgentConfig {
            max_rounds: self.max_rounds,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

// Default implementations
impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_rounds: default_max_rounds(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            timeout: default_tool_timeout(),
            max_response_len: default_max_response_len(),
            disabled: String::new(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            max_history: default_max_history(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            system_prompt: default_system_prompt(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.deepseek.com".into()
}

fn default_model() -> String {
    "deepseek-chat".into()
}

fn default_llm_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_max_rounds() -> usize {
    agent::AgentConfig::default().max_rounds
}

fn default_temperature() -> f32 {
    agent::AgentConfig::default().temperature
}

fn default_max_tokens() -> u32 {
    agent::AgentConfig::default().max_tokens
}

fn default_tool_timeout() -> Duration {
    tools::DEFAULT_TIMEOUT
}

fn default_max_response_len() -> usize {
    tools::DEFAULT_MAX_RESPONSE_LEN
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/user_data.json")
}

fn default_max_history() -> usize {
    50
}

fn default_log_level() -> String {
    "info".into()
}

fn default_system_prompt() -> String {
    crate::prompt::DEFAULT_SYSTEM_PROMPT.into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Build from the process environment only.
    pub fn from_env() -> Result<Self> {
        Self::from_source(config::Environment::default())
    }

    fn from_source(env: config::Environment) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(env.separator("__").try_parsing(false))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
