use crate::error::ToolError;
use crate::schema::{Arguments, ParameterSchema};
use crate::types::Tool;
use async_trait::async_trait;
use campus_data::CampusData;
use std::sync::Arc;

pub struct QueryTravelTool {
    data: Arc<dyn CampusData>,
}

impl QueryTravelTool {
    pub fn new(data: Arc<dyn CampusData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl Tool for QueryTravelTool {
    fn name(&self) -> &str {
        "query_travel"
    }

    fn description(&self) -> &str {
        "Get the upcoming trip plan: itinerary, budget and packing list."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::new()
    }

    async fn execute(&self, _args: Arguments) -> Result<String, ToolError> {
        let plan = self.data.travel_plan().await;

        let mut lines = vec![
            format!("Trip: {}", plan.trip_name),
            format!("- Date: {}", plan.date),
            format!("- Budget: ¥{:.0}", plan.budget),
            format!("- Estimated cost: ¥{:.0}", plan.total_estimated_cost),
            format!("- Companions: {}", plan.companions.join(", ")),
            String::new(),
            "Itinerary:".into(),
        ];
        for stop in &plan.itinerary {
            let cost = if stop.cost > 0.0 {
                format!("¥{:.0}", stop.cost)
            } else {
                "free".to_string()
            };
            lines.push(format!("- {} {} ({}, {})", stop.time, stop.activity, stop.location, cost));
        }

        lines.push(String::new());
        let packing: Vec<String> = plan
            .packing_list
            .iter()
            .map(|p| format!("{} {}", if p.packed { "✅" } else { "⬜" }, p.item))
            .collect();
        lines.push(format!("Packing list: {}", packing.join(", ")));
        Ok(lines.join("\n"))
    }
}
