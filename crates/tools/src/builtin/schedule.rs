//! Timetable lookup.

use crate::error::ToolError;
use crate::schema::{Arguments, Param, ParameterSchema};
use crate::types::Tool;
use async_trait::async_trait;
use campus_data::{parse_weekday, weekday_name, CampusData, WEEKDAYS};
use chrono::Datelike;
use serde::Deserialize;
use std::sync::Arc;

pub struct QueryScheduleTool {
    data: Arc<dyn CampusData>,
}

#[derive(Deserialize)]
struct ScheduleArgs {
    day: Option<String>,
}

impl QueryScheduleTool {
    pub fn new(data: Arc<dyn CampusData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl Tool for QueryScheduleTool {
    fn name(&self) -> &str {
        "query_schedule"
    }

    fn description(&self) -> &str {
        "Look up the class timetable for one day of the week. Defaults to today when no day is given."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::new().param(
            Param::string("day", "Day of the week, e.g. 'Monday'. Omit for today.")
                .one_of(WEEKDAYS.iter().map(|d| weekday_name(*d))),
        )
    }

    async fn execute(&self, args: Arguments) -> Result<String, ToolError> {
        let args: ScheduleArgs = args.parse()?;

        let (weekday, heading) = match args.day.as_deref() {
            Some(name) => {
                let day = parse_weekday(name)
                    .ok_or_else(|| ToolError::InvalidArguments(format!("unknown day '{}'", name)))?;
                (day, weekday_name(day).to_string())
            }
            None => {
                let day = self.data.today().weekday();
                (day, format!("Today ({})", weekday_name(day)))
            }
        };

        let courses = self.data.schedule(Some(weekday)).await;
        if courses.is_empty() {
            return Ok(format!("{}: no classes, the day is free!", heading));
        }

        let mut lines = vec![format!("{} classes:", heading)];
        for c in &courses {
            lines.push(format!(
                "- {} {} ({}, {}, {})",
                c.time, c.course, c.location, c.teacher, c.kind
            ));
        }
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::testing;
    use serde_json::json;
    use tempfile::TempDir;

    async fn run(tool: &QueryScheduleTool, value: serde_json::Value) -> String {
        let args = tool.parameters().validate(&value).unwrap();
        tool.execute(args).await.unwrap()
    }

    #[tokio::test]
    async fn test_named_day() {
        let dir = TempDir::new().unwrap();
        let tool = QueryScheduleTool::new(testing::dashboard(&dir).await);

        let output = run(&tool, json!({"day": "Wednesday"})).await;
        assert!(output.starts_with("Wednesday classes:"));
        assert!(output.contains("Linear Algebra"));
        assert!(output.contains("English Listening & Speaking"));
    }

    #[tokio::test]
    async fn test_defaults_to_today() {
        let dir = TempDir::new().unwrap();
        let tool = QueryScheduleTool::new(testing::dashboard(&dir).await);

        let output = run(&tool, json!({})).await;
        assert!(output.starts_with("Today (Friday) classes:"));
        assert!(output.contains("Political Theory"));
    }

    #[tokio::test]
    async fn test_free_day() {
        let dir = TempDir::new().unwrap();
        let tool = QueryScheduleTool::new(testing::dashboard(&dir).await);

        let output = run(&tool, json!({"day": "Sunday"})).await;
        assert_eq!(output, "Sunday: no classes, the day is free!");
    }

    #[tokio::test]
    async fn test_day_enum_lists_all_weekdays() {
        let dir = TempDir::new().unwrap();
        let tool = QueryScheduleTool::new(testing::dashboard(&dir).await);

        let schema = tool.definition().parameters;
        assert_eq!(schema["properties"]["day"]["enum"].as_array().unwrap().len(), 7);
        assert_eq!(schema["required"], json!([]));
        assert!(tool.parameters().validate(&json!({"day": "Funday"})).is_err());
    }
}
