//! Spending overview and expense recording.

use crate::error::ToolError;
use crate::schema::{Arguments, Param, ParameterSchema};
use crate::types::Tool;
use async_trait::async_trait;
use campus_data::{CampusData, Category};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

const RECENT_LIMIT: usize = 10;
const CATEGORY_RECENT_LIMIT: usize = 8;

pub struct QueryFinanceTool {
    data: Arc<dyn CampusData>,
}

#[derive(Deserialize)]
struct FinanceArgs {
    category: Option<String>,
}

impl QueryFinanceTool {
    pub fn new(data: Arc<dyn CampusData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl Tool for QueryFinanceTool {
    fn name(&self) -> &str {
        "query_finance"
    }

    fn description(&self) -> &str {
        "Get this month's finances: budget, spending, per-category totals and recent transactions. Optionally focus on one category."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::new().param(Param::string(
            "category",
            format!("Optional spending category to focus on: {}.", Category::names().join(", ")),
        ))
    }

    async fn execute(&self, args: Arguments) -> Result<String, ToolError> {
        let args: FinanceArgs = args.parse()?;
        let finance = self.data.finance().await;

        if let Some(wanted) = args.category.as_deref() {
            let Ok(category) = wanted.parse::<Category>() else {
                return Ok(format!(
                    "There is no spending category called '{}'. Known categories: {}.",
                    wanted.trim(),
                    Category::names().join(", ")
                ));
            };

            let mut lines = vec![
                format!("[{}] spending:", category),
                format!("Total this month: ¥{:.0}", finance.category_total(category)),
            ];
            let matching: Vec<_> = finance
                .recent_transactions
                .iter()
                .filter(|t| t.category == category)
                .take(CATEGORY_RECENT_LIMIT)
                .collect();
            if !matching.is_empty() {
                lines.push("Related transactions:".into());
                for t in matching {
                    lines.push(format!("- {} {} ¥{:.1}", t.date, t.item, t.amount));
                }
            }
            return Ok(lines.join("\n"));
        }

        let mut lines = vec![
            "Finances this month:".to_string(),
            format!("- Budget: ¥{:.0}", finance.monthly_budget),
            format!("- Spent: ¥{:.0} ({}%)", finance.spent, finance.budget_usage_pct),
            format!("- Remaining: ¥{:.0}", finance.remaining),
            format!("- Daily average: ¥{:.1}", finance.daily_avg_spent),
            format!("- Days left: {}", finance.days_left_in_month),
            format!("- Suggested daily limit: ¥{:.1}", finance.suggested_daily),
            String::new(),
            "By category:".into(),
        ];
        for (category, total) in &finance.categories {
            lines.push(format!("- {}: ¥{:.0}", category, total));
        }
        lines.push(String::new());
        lines.push("Recent transactions:".into());
        for t in finance.recent_transactions.iter().take(RECENT_LIMIT) {
            lines.push(format!("- {} {} ¥{:.1} ({})", t.date, t.item, t.amount, t.category));
        }
        Ok(lines.join("\n"))
    }
}

pub struct RecordExpenseTool {
    data: Arc<dyn CampusData>,
}

#[derive(Deserialize)]
struct RecordExpenseArgs {
    item: String,
    amount: f64,
    category: String,
}

impl RecordExpenseTool {
    pub fn new(data: Arc<dyn CampusData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl Tool for RecordExpenseTool {
    fn name(&self) -> &str {
        "record_expense"
    }

    fn description(&self) -> &str {
        "Record a new expense. Call this when the user says they bought something and how much it cost."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::new()
            .param(Param::string("item", "What was bought, e.g. 'Milk tea' or 'Textbook'").required())
            .param(Param::number("amount", "Amount spent in yuan").required())
            .param(
                Param::string("category", "Spending category")
                    .required()
                    .one_of(Category::names()),
            )
    }

    fn mutates(&self) -> bool {
        true
    }

    async fn execute(&self, args: Arguments) -> Result<String, ToolError> {
        let args: RecordExpenseArgs = args.parse()?;
        let category: Category = args.category.parse().map_err(ToolError::InvalidArguments)?;

        let tx = self.data.record_expense(&args.item, args.amount, category).await?;
        info!(item = %tx.item, amount = tx.amount, category = %tx.category, "Expense recorded");

        Ok(format!(
            "Recorded expense: {} ¥{:.2} ({}) on {}.",
            tx.item, tx.amount, tx.category, tx.date
        ))
    }
}
