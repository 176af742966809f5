//! Built-in dashboard tools.

mod exams;
mod finance;
mod health;
mod schedule;
mod todos;
mod travel;

pub use exams::QueryExamsTool;
pub use finance::{QueryFinanceTool, RecordExpenseTool};
pub use health::QueryHealthTool;
pub use schedule::QueryScheduleTool;
pub use todos::{QueryTodosTool, ToggleTodoTool};
pub use travel::QueryTravelTool;

use crate::error::ToolError;
use crate::registry::ToolRegistry;
use crate::types::Tool;
use campus_data::CampusData;
use std::sync::Arc;

/// Every built-in tool, in the order their schemas are offered.
pub fn all(data: Arc<dyn CampusData>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(QueryScheduleTool::new(Arc::clone(&data))),
        Arc::new(QueryFinanceTool::new(Arc::clone(&data))),
        Arc::new(RecordExpenseTool::new(Arc::clone(&data))),
        Arc::new(QueryHealthTool::new(Arc::clone(&data))),
        Arc::new(QueryTodosTool::new(Arc::clone(&data))),
        Arc::new(ToggleTodoTool::new(Arc::clone(&data))),
        Arc::new(QueryExamsTool::new(Arc::clone(&data))),
        Arc::new(QueryTravelTool::new(data)),
    ]
}

/// Register every built-in tool.
pub fn register_all(registry: &mut ToolRegistry, data: Arc<dyn CampusData>) -> Result<(), ToolError> {
    all(data).into_iter().try_for_each(|tool| registry.register(tool))
}
