//! Short natural-language digest of the dashboard for the system prompt.

use crate::dashboard::CampusData;
use crate::types::{weekday_name, Priority, TodoFilter};
use chrono::Datelike;

/// Budget usage above which the summary warns about spending.
const BUDGET_WARNING_PCT: f64 = 80.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ContextSummary {
    pub schedule: String,
    pub finance: String,
    pub health: String,
    pub todos: String,
}

impl ContextSummary {
    pub async fn build(data: &dyn CampusData) -> Self {
        let today = data.today();
        let weekday = today.weekday();
        let day_name = weekday_name(weekday);

        let finance = data.finance().await;
        let mut finance_line = format!(
            "Monthly budget ¥{:.0}, spent ¥{:.0} ({}%), ¥{:.0} left.",
            finance.monthly_budget, finance.spent, finance.budget_usage_pct, finance.remaining
        );
        if finance.budget_usage_pct > BUDGET_WARNING_PCT {
            finance_line.push_str(" ⚠️ Over 80% of the budget is used, spending should slow down.");
        }

        let health = data.health().await;
        let health_line = format!(
            "Steps {}/{}, slept {}h ({}), exercised {}/{} times this week, water {}/{} cups, check-in streak {} days.",
            health.today_steps,
            health.step_goal,
            health.sleep_hours,
            health.sleep_quality,
            health.exercise_this_week,
            health.exercise_goal,
            health.water_cups,
            health.water_goal,
            health.checkin_streak
        );

        let pending = data.todos(TodoFilter::Pending).await;
        let urgent = pending.iter().filter(|t| t.priority == Priority::Urgent).count();
        let mut todo_lines = if urgent > 0 {
            format!("{} pending todos, {} urgent!", pending.len(), urgent)
        } else {
            format!("{} pending todos.", pending.len())
        };
        for todo in &pending {
            todo_lines.push_str(&format!(
                "\n  - {} {} (due {})",
                todo.priority.label(),
                todo.task,
                todo.deadline
            ));
        }

        let courses = data.schedule(Some(weekday)).await;
        let mut schedule_lines = if courses.is_empty() {
            format!("No classes today ({}), the day is free 🎉", day_name)
        } else {
            let mut s = format!("{} classes today ({}):", courses.len(), day_name);
            for c in &courses {
                s.push_str(&format!("\n  - {} {} ({})", c.time, c.course, c.location));
            }
            s
        };

        let exams = data.upcoming_exams().await;
        if !exams.is_empty() {
            schedule_lines.push_str("\n📝 Upcoming exams:");
            for e in &exams {
                schedule_lines.push_str(&format!(
                    "\n  - {}: {} ({} days left)",
                    e.course, e.date, e.days_left
                ));
            }
        }

        Self {
            schedule: schedule_lines,
            finance: finance_line,
            health: health_line,
            todos: todo_lines,
        }
    }

    /// Render as a prompt section.
    pub fn to_prompt_section(&self) -> String {
        format!(
            "## Schedule\n{}\n\n## Finances\n{}\n\n## Health\n{}\n\n## Todos\n{}",
            self.schedule, self.finance, self.health, self.todos
        )
    }
}
