//! Health check-in commands: water, exercise and mood.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use async_trait::async_trait;
use campus_data::CampusData;
use std::sync::Arc;
use tracing::info;

/// Text after the trigger word, trimmed.
fn argument<'a>(input: &'a str, trigger: &str) -> &'a str {
    input.trim().strip_prefix(trigger).unwrap_or_default().trim()
}

pub struct WaterHandler {
    data: Arc<dyn CampusData>,
}

impl WaterHandler {
    pub fn new(data: Arc<dyn CampusData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl CommandHandler for WaterHandler {
    fn trigger(&self) -> Option<&str> {
        Some("!water")
    }

    async fn execute(&self, _input: &str) -> AppResult<String> {
        let health = self.data.log_water().await?;
        info!(cups = health.water_cups, "Water logged");

        let mut out = format!(
            "💧 Logged a cup of water: {}/{} cups today.",
            health.water_cups, health.water_goal
        );
        if health.water_cups >= health.water_goal {
            out.push_str(" Daily goal reached!");
        }
        Ok(out)
    }
}

pub struct ExerciseHandler {
    data: Arc<dyn CampusData>,
}

impl ExerciseHandler {
    pub fn new(data: Arc<dyn CampusData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl CommandHandler for ExerciseHandler {
    fn trigger(&self) -> Option<&str> {
        Some("!exercise")
    }

    async fn execute(&self, _input: &str) -> AppResult<String> {
        let health = self.data.log_exercise().await?;
        Ok(format!(
            "🏃 Workout logged: {}/{} sessions this week.",
            health.exercise_this_week, health.exercise_goal
        ))
    }
}

pub struct MoodHandler {
    data: Arc<dyn CampusData>,
}

impl MoodHandler {
    pub fn new(data: Arc<dyn CampusData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl CommandHandler for MoodHandler {
    fn trigger(&self) -> Option<&str> {
        Some("!mood")
    }

    async fn execute(&self, input: &str) -> AppResult<String> {
        let mood = argument(input, "!mood");
        if mood.is_empty() {
            let current = self.data.health().await.mood;
            return Ok(format!("Current mood: {}\nUsage: !mood <how you feel>", current));
        }

        let health = self.data.log_mood(mood).await?;
        Ok(format!("Mood set to {}.", health.mood))
    }
}
