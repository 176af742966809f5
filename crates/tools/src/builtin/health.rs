use crate::error::ToolError;
use crate::schema::{Arguments, ParameterSchema};
use crate::types::Tool;
use async_trait::async_trait;
use campus_data::CampusData;
use std::sync::Arc;

pub struct QueryHealthTool {
    data: Arc<dyn CampusData>,
}

impl QueryHealthTool {
    pub fn new(data: Arc<dyn CampusData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl Tool for QueryHealthTool {
    fn name(&self) -> &str {
        "query_health"
    }

    fn description(&self) -> &str {
        "Get today's health data: steps, sleep, water intake, exercise, mood and check-in streak."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::new()
    }

    async fn execute(&self, _args: Arguments) -> Result<String, ToolError> {
        let h = self.data.health().await;
        let days_since_exercise = (self.data.today() - h.last_exercise).num_days();

        let lines = [
            "Health today:".to_string(),
            format!("- Steps: {}/{}", h.today_steps, h.step_goal),
            format!("- Sleep: {}h ({})", h.sleep_hours, h.sleep_quality),
            format!("- Water: {}/{} cups", h.water_cups, h.water_goal),
            format!("- Exercise this week: {}/{} sessions", h.exercise_this_week, h.exercise_goal),
            format!("- Days since last exercise: {}", days_since_exercise),
            format!("- Mood: {}", h.mood),
            format!("- Check-in streak: {} days", h.checkin_streak),
            format!("- BMI: {} | Weight: {}kg", h.bmi, h.weight_kg),
        ];
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::testing;
    use campus_data::{Dashboard, UserDataStore};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_health_report() {
        let dir = TempDir::new().unwrap();
        let tool = QueryHealthTool::new(testing::dashboard(&dir).await);

        let output = tool.execute(Arguments::default()).await.unwrap();
        assert!(output.contains("- Steps: 4523/8000"));
        assert!(output.contains("- Water: 4/8 cups"));
        assert!(output.contains("- Days since last exercise: 4"));
        assert!(output.contains("- BMI: 21.3 | Weight: 62kg"));
    }

    #[tokio::test]
    async fn test_health_report_reflects_overrides() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(
            UserDataStore::open(dir.path().join("user_data.json"))
                .await
                .unwrap(),
        );
        store.increment_water().await.unwrap();
        store.log_exercise().await.unwrap();
        let data = Dashboard::new(store).with_today(testing::today());
        let tool = QueryHealthTool::new(Arc::new(data));

        let output = tool.execute(Arguments::default()).await.unwrap();
        assert!(output.contains("- Water: 5/8 cups"));
        assert!(output.contains("- Exercise this week: 2/3 sessions"));
        assert!(output.contains("- Days since last exercise: 0"));
    }
}
