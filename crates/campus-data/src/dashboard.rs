//! Query and mutation collaborators over baseline data plus user deltas.

use crate::baseline;
use crate::error::CampusDataError;
use crate::store::UserDataStore;
use crate::types::*;
use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate, Weekday};
use std::sync::Arc;
use tracing::debug;

/// Data access used by the dashboard tools.
///
/// Queries return snapshots; mutations are persisted before they return so
/// a following query observes them.
#[async_trait]
pub trait CampusData: Send + Sync {
    /// The date every "today" computation is relative to.
    fn today(&self) -> NaiveDate;

    /// Courses on `day`, or the whole week when `None`.
    async fn schedule(&self, day: Option<Weekday>) -> Vec<Course>;

    async fn finance(&self) -> FinanceSummary;

    async fn health(&self) -> HealthSnapshot;

    async fn todos(&self, filter: TodoFilter) -> Vec<Todo>;

    /// Exams from today onwards, soonest first.
    async fn upcoming_exams(&self) -> Vec<Exam>;

    async fn travel_plan(&self) -> TravelPlan;

    async fn record_expense(
        &self,
        item: &str,
        amount: f64,
        category: Category,
    ) -> Result<Transaction, CampusDataError>;

    /// Flip a todo's completion state. `None` when no todo has this id.
    async fn toggle_todo(&self, id: u32) -> Result<Option<Todo>, CampusDataError>;

    /// One more cup of water today.
    async fn log_water(&self) -> Result<HealthSnapshot, CampusDataError>;

    /// Mark today as an exercise day.
    async fn log_exercise(&self) -> Result<HealthSnapshot, CampusDataError>;

    async fn log_mood(&self, mood: &str) -> Result<HealthSnapshot, CampusDataError>;

    /// Tick or untick a packing-list item, matched case-insensitively.
    /// `None` when the trip has no such item.
    async fn toggle_packed(&self, item: &str) -> Result<Option<PackingItem>, CampusDataError>;
}

/// [`CampusData`] backed by the built-in mock data and a [`UserDataStore`].
pub struct Dashboard {
    store: Arc<UserDataStore>,
    today: Option<NaiveDate>,
}

impl Dashboard {
    pub fn new(store: Arc<UserDataStore>) -> Self {
        Self { store, today: None }
    }

    /// Pin "today" to a fixed date instead of the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn store(&self) -> &Arc<UserDataStore> {
        &self.store
    }

    async fn all_todos(&self) -> Vec<Todo> {
        let overrides = self.store.todo_overrides().await;
        baseline::todos(self.today())
            .into_iter()
            .map(|mut todo| {
                if let Some(done) = overrides.get(&todo.id) {
                    todo.done = *done;
                }
                todo
            })
            .collect()
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[async_trait]
impl CampusData for Dashboard {
    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    async fn schedule(&self, day: Option<Weekday>) -> Vec<Course> {
        baseline::week_schedule()
            .into_iter()
            .filter(|c| day.map_or(true, |d| c.weekday == d))
            .collect()
    }

    async fn finance(&self) -> FinanceSummary {
        let today = self.today();
        let extras = self.store.extra_transactions().await;

        let categories: Vec<(Category, f64)> = baseline::category_totals()
            .into_iter()
            .map(|(category, base)| {
                let added: f64 = extras
                    .iter()
                    .filter(|t| t.category == category)
                    .map(|t| t.amount)
                    .sum();
                (category, base + added)
            })
            .collect();

        let spent: f64 = categories.iter().map(|(_, v)| v).sum();
        let remaining = baseline::MONTHLY_BUDGET - spent;
        let day_of_month = today.day().max(1);
        let days_left = baseline::days_in_month(today) - today.day() + 1;

        let mut recent_transactions = extras;
        recent_transactions.extend(baseline::recent_transactions(today));

        FinanceSummary {
            monthly_budget: baseline::MONTHLY_BUDGET,
            spent,
            remaining,
            budget_usage_pct: round1(spent / baseline::MONTHLY_BUDGET * 100.0),
            categories,
            recent_transactions,
            daily_avg_spent: spent / day_of_month as f64,
            days_left_in_month: days_left,
            suggested_daily: remaining.max(0.0) / days_left as f64,
        }
    }

    async fn health(&self) -> HealthSnapshot {
        let today = self.today();
        let overrides = self.store.health_overrides().await;
        let mut health = baseline::health(today);

        health.water_cups += overrides.water_cups_added;
        if overrides.exercise_today {
            health.exercise_this_week += 1;
            health.last_exercise = today;
        }
        if let Some(mood) = overrides.mood {
            health.mood = mood;
        }
        health
    }

    async fn todos(&self, filter: TodoFilter) -> Vec<Todo> {
        self.all_todos()
            .await
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect()
    }

    async fn upcoming_exams(&self) -> Vec<Exam> {
        let today = self.today();
        let mut exams: Vec<Exam> = baseline::exams(today)
            .into_iter()
            .map(|mut exam| {
                exam.days_left = (exam.date - today).num_days();
                exam
            })
            .filter(|exam| exam.days_left >= 0)
            .collect();
        exams.sort_by_key(|exam| exam.date);
        exams
    }

    async fn travel_plan(&self) -> TravelPlan {
        let packed = self.store.packing_checked().await;
        let mut plan = baseline::travel_plan(self.today());
        for entry in &mut plan.packing_list {
            entry.packed = packed.contains(&entry.item);
        }
        plan
    }

    async fn record_expense(
        &self,
        item: &str,
        amount: f64,
        category: Category,
    ) -> Result<Transaction, CampusDataError> {
        let item = item.trim();
        if item.is_empty() {
            return Err(CampusDataError::InvalidInput("item must not be empty".into()));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CampusDataError::InvalidInput(format!(
                "amount must be a positive number, got {}",
                amount
            )));
        }
        self.store
            .add_expense(self.today(), item, amount, category)
            .await
    }

    async fn toggle_todo(&self, id: u32) -> Result<Option<Todo>, CampusDataError> {
        let Some(mut todo) = baseline::todos(self.today()).into_iter().find(|t| t.id == id) else {
            debug!(todo_id = id, "Todo not found");
            return Ok(None);
        };

        todo.done = self.store.toggle_todo_done(id, todo.done).await?;
        Ok(Some(todo))
    }

    async fn log_water(&self) -> Result<HealthSnapshot, CampusDataError> {
        self.store.increment_water().await?;
        Ok(self.health().await)
    }

    async fn log_exercise(&self) -> Result<HealthSnapshot, CampusDataError> {
        self.store.log_exercise().await?;
        Ok(self.health().await)
    }

    async fn log_mood(&self, mood: &str) -> Result<HealthSnapshot, CampusDataError> {
        let mood = mood.trim();
        if mood.is_empty() {
            return Err(CampusDataError::InvalidInput("mood must not be empty".into()));
        }
        self.store.log_mood(mood).await?;
        Ok(self.health().await)
    }

    async fn toggle_packed(&self, item: &str) -> Result<Option<PackingItem>, CampusDataError> {
        let wanted = item.trim();
        let plan = baseline::travel_plan(self.today());
        let Some(entry) = plan
            .packing_list
            .into_iter()
            .find(|p| p.item.eq_ignore_ascii_case(wanted))
        else {
            debug!(item = wanted, "Packing item not found");
            return Ok(None);
        };

        let packed = self.store.toggle_packed(&entry.item).await?;
        Ok(Some(PackingItem { packed, ..entry }))
    }
}
