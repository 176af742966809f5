//! A persistent conversation with the assistant.

use crate::error::AppResult;
use crate::prompt;
use agent::{Agent, AgentReply, Outcome};
use campus_data::{CampusData, ContextSummary, StoredCallRecord, StoredMessage, UserDataStore};
use chrono::Local;
use llm_client::Message;
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub struct ChatSession {
    agent: Agent,
    data: Arc<dyn CampusData>,
    store: Arc<UserDataStore>,
    base_prompt: String,
    max_history: usize,
}

impl ChatSession {
    pub fn new(
        agent: Agent,
        data: Arc<dyn CampusData>,
        store: Arc<UserDataStore>,
        base_prompt: impl Into<String>,
        max_history: usize,
    ) -> Self {
        Self {
            agent,
            data,
            store,
            base_prompt: base_prompt.into(),
            max_history,
        }
    }

    /// Send one user message and persist the exchange.
    ///
    /// A turn that failed at the endpoint before any tool ran is not saved,
    /// so the next attempt starts from the same history. Once a tool has
    /// run, the exchange is kept with its call log so a retry knows what was
    /// already done.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn send(&self, text: &str) -> AppResult<AgentReply> {
        let summary = ContextSummary::build(self.data.as_ref()).await;
        let system = prompt::build_system_prompt(&self.base_prompt, &summary, Local::now().naive_local());

        let mut messages = vec![Message::system(system)];
        messages.extend(self.history().await);
        messages.push(Message::user(text));
        debug!(messages = messages.len(), "Built request");

        let reply = self.agent.run(messages).await;
        if reply.outcome == Outcome::EndpointFailed && reply.calls.is_empty() {
            return Ok(reply);
        }

        let calls = reply
            .calls
            .iter()
            .map(|c| StoredCallRecord {
                name: c.name.clone(),
                arguments: c.arguments.clone(),
                result: c.result.clone(),
            })
            .collect();
        let saved = self
            .store
            .append_chat_messages(
                vec![
                    StoredMessage::new("user", text),
                    StoredMessage::new("assistant", &reply.content).with_calls(calls),
                ],
                self.max_history,
            )
            .await?;
        debug!(saved, "Chat history persisted");

        Ok(reply)
    }

    /// Wipe the saved conversation. Returns false when there was none.
    pub async fn clear(&self) -> AppResult<bool> {
        let cleared = self.store.clear_chat_history().await?;
        if cleared {
            info!("Conversation history cleared");
        }
        Ok(cleared)
    }

    /// Saved messages, oldest first.
    pub async fn saved_messages(&self) -> Vec<StoredMessage> {
        self.store.load_chat_history().await
    }

    pub fn data(&self) -> &Arc<dyn CampusData> {
        &self.data
    }

    /// Daily brief, for when a conversation starts fresh.
    pub async fn welcome(&self) -> String {
        prompt::welcome(&ContextSummary::build(self.data.as_ref()).await)
    }

    /// Saved user and assistant turns as model messages, newest
    /// `max_history` only. Assistant turns carry a digest of their tool
    /// results.
    async fn history(&self) -> Vec<Message> {
        let saved = self.store.load_chat_history().await;
        let start = saved.len().saturating_sub(self.max_history);
        saved[start..]
            .iter()
            .filter_map(|m| match m.role.as_str() {
                "user" => Some(Message::user(&m.content)),
                "assistant" => Some(Message::assistant(with_call_digest(m))),
                _ => None,
            })
            .collect()
    }
}

fn with_call_digest(message: &StoredMessage) -> String {
    if message.calls.is_empty() {
        return message.content.clone();
    }
    let mut text = format!("{}\n\n[Tool results]", message.content);
    for call in &message.calls {
        let first_line = call.result.lines().next().unwrap_or_default();
        text.push_str(&format!("\n- {}: {}", call.name, first_line));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent::{AgentConfig, ChatModel};
    use async_trait::async_trait;
    use campus_data::Dashboard;
    use chrono::NaiveDate;
    use campus_data::Category;
    use llm_client::{ChatResponseWithTools, LlmError, Role, ToolCall, ToolDefinition};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tempfile::TempDir;
    use tools::{ToolExecutor, ToolRegistry};

    /// Answers with a fixed text and remembers what it was sent.
    struct EchoModel {
        answer: Result<String, ()>,
        seen: Mutex<Vec<Vec<Message>>>,
    }

    #[async_trait]
    impl ChatModel for EchoModel {
        async fn complete(
            &self,
            messages: Vec<Message>,
            _tools: Option<&[ToolDefinition]>,
            _temperature: Option<f32>,
            _max_tokens: Option<u32>,
        ) -> Result<ChatResponseWithTools, LlmError> {
            self.seen.lock().unwrap().push(messages);
            match &self.answer {
                Ok(text) => Ok(ChatResponseWithTools::text(text.clone())),
                Err(()) => Err(LlmError::Unauthorized),
            }
        }
    }

    /// Plays back a fixed list of responses and remembers what it was sent.
    struct ScriptedModel {
        script: Mutex<VecDeque<Result<ChatResponseWithTools, LlmError>>>,
        seen: Mutex<Vec<Vec<Message>>>,
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn complete(
            &self,
            messages: Vec<Message>,
            _tools: Option<&[ToolDefinition]>,
            _temperature: Option<f32>,
            _max_tokens: Option<u32>,
        ) -> Result<ChatResponseWithTools, LlmError> {
            self.seen.lock().unwrap().push(messages);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ChatResponseWithTools::text("script exhausted")))
        }
    }

    async fn session(dir: &TempDir, model: Arc<dyn ChatModel>, max_history: usize) -> ChatSession {
        let store = Arc::new(
            UserDataStore::open(dir.path().join("user_data.json"))
                .await
                .unwrap(),
        );
        let data: Arc<dyn CampusData> = Arc::new(
            Dashboard::new(Arc::clone(&store))
                .with_today(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()),
        );
        let mut registry = ToolRegistry::new();
        tools::builtin::register_all(&mut registry, Arc::clone(&data)).unwrap();
        let executor = Arc::new(ToolExecutor::new(Arc::new(registry)));
        let agent = Agent::new(model, executor, AgentConfig::default());
        ChatSession::new(agent, data, store, "Base prompt.", max_history)
    }

    fn echo(answer: &str) -> Arc<EchoModel> {
        Arc::new(EchoModel {
            answer: Ok(answer.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn test_send_persists_and_replays_history() {
        let dir = TempDir::new().unwrap();
        let model = echo("Sure!");
        let session = session(&dir, model.clone(), 50).await;

        session.send("First").await.unwrap();
        session.send("Second").await.unwrap();

        let saved = session.saved_messages().await;
        assert_eq!(saved.len(), 4);
        assert_eq!(saved[0].content, "First");
        assert_eq!(saved[1].role, "assistant");

        let seen = model.seen.lock().unwrap().clone();
        let second = &seen[1];
        assert_eq!(second[0].role, Role::System);
        assert!(second[0].content.as_deref().unwrap().contains("# Current dashboard"));
        assert_eq!(second.len(), 4);
        assert_eq!(second[1].content.as_deref(), Some("First"));
        assert_eq!(second[3].content.as_deref(), Some("Second"));
    }

    #[tokio::test]
    async fn test_history_trimmed() {
        let dir = TempDir::new().unwrap();
        let model = echo("ok");
        let session = session(&dir, model.clone(), 2).await;

        for text in ["one", "two", "three"] {
            session.send(text).await.unwrap();
        }
        let saved = session.saved_messages().await;
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].content, "three");

        let seen = model.seen.lock().unwrap().clone();
        // system + one saved pair + new user message
        assert_eq!(seen[2].len(), 4);
    }

    #[tokio::test]
    async fn test_failed_turn_not_saved() {
        let dir = TempDir::new().unwrap();
        let model = Arc::new(EchoModel {
            answer: Err(()),
            seen: Mutex::new(Vec::new()),
        });
        let session = session(&dir, model, 50).await;

        let reply = session.send("Hello?").await.unwrap();
        assert_eq!(reply.outcome, Outcome::EndpointFailed);
        assert!(reply.content.contains("API key"));
        assert!(session.saved_messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_turn_after_tool_keeps_call_log() {
        let dir = TempDir::new().unwrap();
        let tea = ToolCall::function(
            "call_1",
            "record_expense",
            r#"{"item": "Tea", "amount": 18, "category": "Food"}"#,
        );
        let model = Arc::new(ScriptedModel {
            script: Mutex::new(VecDeque::from(vec![
                Ok(ChatResponseWithTools::with_tool_calls(None, vec![tea])),
                Err(LlmError::RateLimit),
                Ok(ChatResponseWithTools::text("Your tea is already logged.")),
            ])),
            seen: Mutex::new(Vec::new()),
        });
        let session = session(&dir, model.clone(), 50).await;

        let reply = session.send("I spent 18 on tea").await.unwrap();
        assert_eq!(reply.outcome, Outcome::EndpointFailed);
        assert_eq!(reply.calls.len(), 1);

        let saved = session.saved_messages().await;
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].content, "I spent 18 on tea");
        assert!(saved[1].content.contains("too many requests"));
        assert_eq!(saved[1].calls.len(), 1);
        assert_eq!(saved[1].calls[0].name, "record_expense");

        let reply = session.send("Did that go through?").await.unwrap();
        assert_eq!(reply.outcome, Outcome::Answered);
        assert!(reply.calls.is_empty());

        // The retry sees the earlier tool result and the expense exists once.
        let seen = model.seen.lock().unwrap().clone();
        let replayed = seen[2][2].content.as_deref().unwrap();
        assert!(replayed.contains("[Tool results]"));
        assert!(replayed.contains("- record_expense: Recorded expense: Tea"));
        let finance = session.data().finance().await;
        assert_eq!(finance.category_total(Category::Food), 838.0);
    }

    #[tokio::test]
    async fn test_clear() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir, echo("ok"), 50).await;

        assert!(!session.clear().await.unwrap());
        session.send("hi").await.unwrap();
        assert!(session.clear().await.unwrap());
        assert!(session.saved_messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_welcome() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir, echo("ok"), 50).await;

        let text = session.welcome().await;
        assert!(text.contains("UniLife"));
        assert!(text.contains("Friday"));
    }
}
