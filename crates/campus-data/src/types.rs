//! Dashboard snapshot and persisted-state types.

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One class slot in the weekly timetable.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub weekday: Weekday,
    pub time: String,
    pub course: String,
    pub location: String,
    pub teacher: String,
    pub kind: String,
}

/// English name of a weekday, as used in tool arguments.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Parse a full English weekday name, ignoring case.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let name = name.trim();
    WEEKDAYS
        .into_iter()
        .find(|d| weekday_name(*d).eq_ignore_ascii_case(name))
}

/// Spending category. The display names are the values the model may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    #[serde(rename = "Study Supplies")]
    StudySupplies,
    Entertainment,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::StudySupplies,
        Category::Entertainment,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::StudySupplies => "Study Supplies",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }

    /// Display names of every category, in canonical order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Category::as_str).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown category '{}'", wanted))
    }
}

/// A single expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub item: String,
    pub amount: f64,
    pub category: Category,
}

/// Month-to-date finances with derived budget figures.
#[derive(Debug, Clone, PartialEq)]
pub struct FinanceSummary {
    pub monthly_budget: f64,
    pub spent: f64,
    pub remaining: f64,
    pub budget_usage_pct: f64,
    /// Totals per category, in `Category::ALL` order.
    pub categories: Vec<(Category, f64)>,
    /// Newest first.
    pub recent_transactions: Vec<Transaction>,
    pub daily_avg_spent: f64,
    pub days_left_in_month: u32,
    pub suggested_daily: f64,
}

impl FinanceSummary {
    pub fn category_total(&self, category: Category) -> f64 {
        self.categories
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, total)| *total)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthSnapshot {
    pub today_steps: u32,
    pub step_goal: u32,
    pub sleep_hours: f64,
    pub sleep_quality: String,
    pub water_cups: u32,
    pub water_goal: u32,
    pub exercise_this_week: u32,
    pub exercise_goal: u32,
    pub last_exercise: NaiveDate,
    pub mood: String,
    pub checkin_streak: u32,
    pub bmi: f64,
    pub weight_kg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Urgent,
    Important,
    Normal,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Urgent => "🔴 Urgent",
            Priority::Important => "🟡 Important",
            Priority::Normal => "🟢 Normal",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: u32,
    pub task: String,
    pub deadline: NaiveDate,
    pub priority: Priority,
    pub done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TodoFilter {
    #[default]
    All,
    Pending,
    Done,
}

impl TodoFilter {
    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            TodoFilter::All => true,
            TodoFilter::Pending => !todo.done,
            TodoFilter::Done => todo.done,
        }
    }
}

impl FromStr for TodoFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TodoFilter::All),
            "pending" => Ok(TodoFilter::Pending),
            "done" => Ok(TodoFilter::Done),
            other => Err(format!("unknown todo status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exam {
    pub course: String,
    pub kind: String,
    pub date: NaiveDate,
    pub days_left: i64,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TravelStop {
    pub time: String,
    pub activity: String,
    pub location: String,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackingItem {
    pub item: String,
    pub packed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TravelPlan {
    pub trip_name: String,
    pub date: NaiveDate,
    pub budget: f64,
    pub total_estimated_cost: f64,
    pub companions: Vec<String>,
    pub itinerary: Vec<TravelStop>,
    pub packing_list: Vec<PackingItem>,
}

/// Tool call shown next to an assistant reply in the saved transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCallRecord {
    pub name: String,
    pub arguments: serde_json::Value,
    pub result: String,
}

/// A single message in the saved chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub calls: Vec<StoredCallRecord>,
}

impl StoredMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            timestamp: Utc::now(),
            calls: Vec::new(),
        }
    }

    pub fn with_calls(mut self, calls: Vec<StoredCallRecord>) -> Self {
        self.calls = calls;
        self
    }
}

/// Health values the user changed by hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthOverrides {
    pub water_cups_added: u32,
    pub exercise_today: bool,
    pub mood: Option<String>,
}

/// Everything persisted to disk: user-introduced deltas on top of the
/// baseline data, plus the chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserData {
    pub version: u32,
    /// Completion overrides keyed by todo id.
    pub todos: BTreeMap<u32, bool>,
    /// Newest first.
    pub extra_transactions: Vec<Transaction>,
    pub health_overrides: HealthOverrides,
    pub chat_messages: Vec<StoredMessage>,
    pub packing_checked: Vec<String>,
}

pub(crate) const DATA_VERSION: u32 = 1;

impl Default for UserData {
    fn default() -> Self {
        Self {
            version: DATA_VERSION,
            todos: BTreeMap::new(),
            extra_transactions: Vec::new(),
            health_overrides: HealthOverrides::default(),
            chat_messages: Vec::new(),
            packing_checked: Vec::new(),
        }
    }
}
