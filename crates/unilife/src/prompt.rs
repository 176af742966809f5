//! System prompt assembly.

use campus_data::ContextSummary;
use chrono::NaiveDateTime;

pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are UniLife, a friendly campus-life assistant for a university student.

## What you can do
You can read and update the student's dashboard with tools:
- **query_schedule**: class timetable for a day
- **query_finance** / **record_expense**: monthly budget, spending, and logging new expenses
- **query_health**: steps, sleep, water, exercise and mood
- **query_todos** / **toggle_todo**: todo list and marking items done
- **query_exams**: upcoming exams and countdowns
- **query_travel**: the next trip's plan and packing list

## Guidelines
- Be concise and warm, like a helpful senior student
- Use tools for anything that depends on current data instead of guessing
- When the student mentions spending money, record it with record_expense
- Amounts are in yuan (¥)
- If a tool fails, say what went wrong and help anyway"#;

/// Append the dashboard digest and the current local time to `base`.
pub fn build_system_prompt(base: &str, summary: &ContextSummary, now: NaiveDateTime) -> String {
    format!(
        "{}\n\n# Current dashboard\n{}\n\nCurrent date and time: {}",
        base,
        summary.to_prompt_section(),
        now.format("%A, %B %d, %Y at %H:%M")
    )
}

/// Greeting shown when there is no saved conversation yet.
pub fn welcome(summary: &ContextSummary) -> String {
    let first_line = |s: &str| s.lines().next().unwrap_or_default().to_string();
    [
        "Hey, welcome back 👋 I'm UniLife, your campus-life assistant.".to_string(),
        "Here's your day at a glance:".to_string(),
        format!("📅 Classes: {}", first_line(&summary.schedule)),
        format!("💰 Money: {}", summary.finance),
        format!("📝 Todos: {}", first_line(&summary.todos)),
        format!("🏥 Health: {}", summary.health),
        "Ask me anything, e.g. \"Is my budget OK this month?\"".to_string(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn summary() -> ContextSummary {
        ContextSummary {
            schedule: "1 classes today (Friday):\n  - 08:30-10:05 Political Theory".into(),
            finance: "Monthly budget ¥2000, spent ¥1650 (82.5%), ¥350 left.".into(),
            health: "Steps 4523/8000.".into(),
            todos: "4 pending todos, 1 urgent!\n  - 🔴 Urgent Submit calculus homework".into(),
        }
    }

    #[test]
    fn test_system_prompt_sections() {
        let now = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        let prompt = build_system_prompt("Base prompt.", &summary(), now);

        assert!(prompt.starts_with("Base prompt.\n\n# Current dashboard\n## Schedule"));
        assert!(prompt.contains("## Finances\nMonthly budget ¥2000"));
        assert!(prompt.ends_with("Current date and time: Friday, October 16, 2026 at 09:05"));
    }

    #[test]
    fn test_welcome_uses_first_lines() {
        let text = welcome(&summary());
        assert!(text.contains("📅 Classes: 1 classes today (Friday):"));
        assert!(!text.contains("Political Theory"));
        assert!(text.contains("📝 Todos: 4 pending todos, 1 urgent!"));
    }

    #[test]
    fn test_default_prompt_names_every_tool() {
        for tool in [
            "query_schedule",
            "query_finance",
            "record_expense",
            "query_health",
            "query_todos",
            "toggle_todo",
            "query_exams",
            "query_travel",
        ] {
            assert!(DEFAULT_SYSTEM_PROMPT.contains(tool), "{} missing", tool);
        }
    }
}
