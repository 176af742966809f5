//! Pack command - ticks items off the trip's packing list.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use async_trait::async_trait;
use campus_data::{CampusData, PackingItem};
use std::sync::Arc;

pub struct PackHandler {
    data: Arc<dyn CampusData>,
}

impl PackHandler {
    pub fn new(data: Arc<dyn CampusData>) -> Self {
        Self { data }
    }

    async fn checklist(&self) -> String {
        let plan = self.data.travel_plan().await;
        let lines: Vec<String> = plan.packing_list.iter().map(line).collect();
        format!("Packing list for {}:\n{}", plan.trip_name, lines.join("\n"))
    }
}

fn line(entry: &PackingItem) -> String {
    format!("{} {}", if entry.packed { "✅" } else { "⬜" }, entry.item)
}

#[async_trait]
impl CommandHandler for PackHandler {
    fn trigger(&self) -> Option<&str> {
        Some("!pack")
    }

    async fn execute(&self, input: &str) -> AppResult<String> {
        let item = input.trim().strip_prefix("!pack").unwrap_or_default().trim();
        if item.is_empty() {
            return Ok(format!("{}\n\nUsage: !pack <item>", self.checklist().await));
        }

        match self.data.toggle_packed(item).await? {
            Some(entry) => Ok(line(&entry)),
            None => Ok(format!(
                "No packing item named \"{}\".\n\n{}",
                item,
                self.checklist().await
            )),
        }
    }
}
