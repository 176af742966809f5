//! Manual check of tool calling against a live endpoint.
//! Run with: cargo run -p llm-client --example live_tool_calling

use llm_client::{LlmClient, Message, ToolDefinition};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    dotenvy::dotenv().ok();

    let api_key = std::env::var("LLM__API_KEY").expect("LLM__API_KEY must be set");
    let base_url = std::env::var("LLM__BASE_URL").unwrap_or_else(|_| "https://api.deepseek.com".to_string());
    let model = std::env::var("LLM__MODEL").unwrap_or_else(|_| "deepseek-chat".to_string());

    println!("Using model: {} at {}", model, base_url);

    let client = LlmClient::new(api_key, base_url, model, Duration::from_secs(60))?;

    let tools = vec![ToolDefinition::function(
        "record_expense",
        "Record a new expense the user tells you about",
        serde_json::json!({
            "type": "object",
            "properties": {
                "item": { "type": "string", "description": "What was bought" },
                "amount": { "type": "number", "description": "Amount spent" },
                "category": {
                    "type": "string",
                    "enum": ["Food", "Transport", "Shopping", "Study Supplies", "Entertainment", "Other"]
                }
            },
            "required": ["item", "amount", "category"]
        }),
    )];

    let messages = vec![
        Message::system("You are a campus-life assistant that keeps the user's budget."),
        Message::user("I just spent 18 on bubble tea."),
    ];

    let response = client
        .chat_with_tools(messages.clone(), Some(0.8), None, Some(&tools))
        .await?;
    println!("content: {:?}", response.content);
    println!("tool calls: {:?}", response.tool_calls);

    let Some(calls) = response.tool_calls.filter(|c| !c.is_empty()) else {
        return Ok(());
    };

    let mut follow_up = messages;
    follow_up.push(Message::assistant_with_tool_calls(response.content, calls.clone()));
    for call in &calls {
        println!("{} {}", call.function.name, call.function.arguments);
        follow_up.push(Message::tool_result(&call.id, "Recorded: bubble tea 18.00 (Food)"));
    }

    // No tools on the follow-up: the model has to answer in text.
    let answer = client.chat_with_tools(follow_up, Some(0.8), None, None).await?;
    println!("answer: {:?}", answer.content);
    Ok(())
}
