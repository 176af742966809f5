//! Todo listing and completion toggling.

use crate::error::ToolError;
use crate::schema::{Arguments, Param, ParameterSchema};
use crate::types::Tool;
use async_trait::async_trait;
use campus_data::{CampusData, TodoFilter};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

pub struct QueryTodosTool {
    data: Arc<dyn CampusData>,
}

#[derive(Deserialize)]
struct QueryTodosArgs {
    status: Option<String>,
}

impl QueryTodosTool {
    pub fn new(data: Arc<dyn CampusData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl Tool for QueryTodosTool {
    fn name(&self) -> &str {
        "query_todos"
    }

    fn description(&self) -> &str {
        "List todo items. Can filter to all, pending or done items."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::new().param(
            Param::string("status", "Which items to list: all, pending or done. Defaults to all.")
                .one_of(["all", "pending", "done"]),
        )
    }

    async fn execute(&self, args: Arguments) -> Result<String, ToolError> {
        let args: QueryTodosArgs = args.parse()?;
        let filter = match args.status.as_deref() {
            Some(status) => status.parse::<TodoFilter>().map_err(ToolError::InvalidArguments)?,
            None => TodoFilter::All,
        };

        let todos = self.data.todos(filter).await;
        if todos.is_empty() {
            return Ok("No todo items match.".into());
        }

        let title = match filter {
            TodoFilter::All => "All todo items:",
            TodoFilter::Pending => "Pending todo items:",
            TodoFilter::Done => "Completed todo items:",
        };
        let mut lines = vec![title.to_string()];
        for t in &todos {
            let mark = if t.done { "✅" } else { "⬜" };
            lines.push(format!(
                "- {} [{}] {} {} (due {})",
                mark,
                t.id,
                t.priority.label(),
                t.task,
                t.deadline
            ));
        }
        Ok(lines.join("\n"))
    }
}

pub struct ToggleTodoTool {
    data: Arc<dyn CampusData>,
}

#[derive(Deserialize)]
struct ToggleTodoArgs {
    task_id: i64,
}

impl ToggleTodoTool {
    pub fn new(data: Arc<dyn CampusData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl Tool for ToggleTodoTool {
    fn name(&self) -> &str {
        "toggle_todo"
    }

    fn description(&self) -> &str {
        "Flip a todo item between done and not done."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::new().param(Param::integer("task_id", "ID of the todo item").required())
    }

    fn mutates(&self) -> bool {
        true
    }

    async fn execute(&self, args: Arguments) -> Result<String, ToolError> {
        let args: ToggleTodoArgs = args.parse()?;
        let not_found = || ToolError::NotFound(format!("no todo with ID {}", args.task_id));

        let id = u32::try_from(args.task_id).map_err(|_| not_found())?;
        let todo = self.data.toggle_todo(id).await?.ok_or_else(not_found)?;
        info!(todo_id = id, done = todo.done, "Todo toggled");

        let status = if todo.done { "done" } else { "not done" };
        Ok(format!("Todo \"{}\" is now marked as {}.", todo.task, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::testing;
    use serde_json::json;
    use tempfile::TempDir;

    async fn run(tool: &dyn Tool, value: serde_json::Value) -> Result<String, ToolError> {
        let args = tool.parameters().validate(&value)?;
        tool.execute(args).await
    }

    #[tokio::test]
    async fn test_list_all_by_default() {
        let dir = TempDir::new().unwrap();
        let tool = QueryTodosTool::new(testing::dashboard(&dir).await);

        let output = run(&tool, json!({})).await.unwrap();
        assert!(output.starts_with("All todo items:"));
        assert_eq!(output.lines().count(), 6);
        assert!(output.contains("- ⬜ [1] 🔴 Urgent Submit calculus homework (due 2026-10-17)"));
        assert!(output.contains("- ✅ [5]"));
    }

    #[tokio::test]
    async fn test_filters() {
        let dir = TempDir::new().unwrap();
        let tool = QueryTodosTool::new(testing::dashboard(&dir).await);

        let pending = run(&tool, json!({"status": "pending"})).await.unwrap();
        assert!(pending.starts_with("Pending todo items:"));
        assert!(!pending.contains("✅"));

        let done = run(&tool, json!({"status": "done"})).await.unwrap();
        assert_eq!(done.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_empty_filter_result() {
        let dir = TempDir::new().unwrap();
        let data = testing::dashboard(&dir).await;
        data.toggle_todo(5).await.unwrap();
        let tool = QueryTodosTool::new(data);

        let output = run(&tool, json!({"status": "done"})).await.unwrap();
        assert_eq!(output, "No todo items match.");
    }

    #[tokio::test]
    async fn test_toggle_round_trip() {
        let dir = TempDir::new().unwrap();
        let tool = ToggleTodoTool::new(testing::dashboard(&dir).await);

        let output = run(&tool, json!({"task_id": 3})).await.unwrap();
        assert_eq!(output, "Todo \"Python lab report\" is now marked as done.");

        let output = run(&tool, json!({"task_id": "3"})).await.unwrap();
        assert_eq!(output, "Todo \"Python lab report\" is now marked as not done.");
    }

    #[tokio::test]
    async fn test_toggle_missing_id() {
        let dir = TempDir::new().unwrap();
        let tool = ToggleTodoTool::new(testing::dashboard(&dir).await);

        for id in [99, -1] {
            let err = run(&tool, json!({ "task_id": id })).await.unwrap_err();
            assert!(matches!(err, ToolError::NotFound(_)));
            assert!(err.to_string().contains(&id.to_string()));
        }
    }
}
