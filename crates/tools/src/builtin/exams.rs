use crate::error::ToolError;
use crate::schema::{Arguments, ParameterSchema};
use crate::types::Tool;
use async_trait::async_trait;
use campus_data::CampusData;
use std::sync::Arc;

pub struct QueryExamsTool {
    data: Arc<dyn CampusData>,
}

impl QueryExamsTool {
    pub fn new(data: Arc<dyn CampusData>) -> Self {
        Self { data }
    }
}

fn urgency(days_left: i64) -> &'static str {
    if days_left <= 3 {
        "🔴 Urgent!"
    } else if days_left <= 7 {
        "🟡 Soon"
    } else {
        "🔵"
    }
}

#[async_trait]
impl Tool for QueryExamsTool {
    fn name(&self) -> &str {
        "query_exams"
    }

    fn description(&self) -> &str {
        "List upcoming exams with a countdown in days."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::new()
    }

    async fn execute(&self, _args: Arguments) -> Result<String, ToolError> {
        let exams = self.data.upcoming_exams().await;
        if exams.is_empty() {
            return Ok("No upcoming exams.".into());
        }

        let mut lines = vec!["Upcoming exams:".to_string()];
        for e in &exams {
            lines.push(format!(
                "- {} {} ({}): {}, {} days left, location: {}",
                urgency(e.days_left),
                e.course,
                e.kind,
                e.date,
                e.days_left,
                e.location
            ));
        }
        Ok(lines.join("\n"))
    }
}
