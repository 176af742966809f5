use llm_client::Message;
use serde::Serialize;
use serde_json::Value;

/// One executed tool call, as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCallRecord {
    pub name: String,
    /// Parsed arguments. Unparseable payloads are kept as a JSON string.
    pub arguments: Value,
    pub result: String,
    pub success: bool,
}

impl ToolCallRecord {
    pub(crate) fn parse_arguments(raw: &str) -> Value {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Object(Default::default());
        }
        serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(raw.to_string()))
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The model answered without requesting tools.
    Answered,
    /// Tool rounds ran out; the answer came from a final call without tools.
    RoundLimitReached,
    /// The endpoint failed; the content is a diagnostic.
    EndpointFailed,
}

/// Result of [`Agent::run`](crate::Agent::run).
#[derive(Debug, Clone)]
pub struct AgentReply {
    pub content: String,
    /// Executed calls, in execution order.
    pub calls: Vec<ToolCallRecord>,
    /// The full working transcript, starting with the history passed in.
    pub transcript: Vec<Message>,
    pub outcome: Outcome,
}
