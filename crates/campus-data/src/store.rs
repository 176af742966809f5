//! JSON-file store for user deltas and the chat transcript.

use crate::error::CampusDataError;
use crate::types::*;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Persisted state store.
///
/// The whole document lives in memory behind a lock. Every mutation is
/// applied to a copy, written to disk (temp file + rename) and only then
/// swapped in, so readers never observe a change that failed to persist.
pub struct UserDataStore {
    data: RwLock<UserData>,
    storage_path: PathBuf,
}

impl UserDataStore {
    /// Open the store, loading existing data if available.
    ///
    /// A missing file starts empty. An unreadable or corrupt file is logged
    /// and replaced by defaults on the next write.
    pub async fn open(storage_path: impl Into<PathBuf>) -> Result<Self, CampusDataError> {
        let storage_path = storage_path.into();
        let data = Self::load(&storage_path).await;

        info!(
            "User data store ready at {:?} ({} extra transactions, {} chat messages)",
            storage_path,
            data.extra_transactions.len(),
            data.chat_messages.len()
        );

        Ok(Self {
            data: RwLock::new(data),
            storage_path,
        })
    }

    async fn load(path: &Path) -> UserData {
        if !path.exists() {
            info!("User data not found at {:?}, starting fresh", path);
            return UserData::default();
        }

        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to read user data at {:?}, starting fresh: {}", path, e);
                return UserData::default();
            }
        };

        match serde_json::from_slice::<UserData>(&bytes) {
            Ok(data) => data,
            Err(e) => {
                warn!("User data at {:?} is corrupt, starting fresh: {}", path, e);
                UserData::default()
            }
        }
    }

    async fn persist(&self, data: &UserData) -> Result<(), CampusDataError> {
        let json = serde_json::to_vec_pretty(data)?;

        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        // Atomic write
        let temp_path = self.storage_path.with_extension("tmp");
        fs::write(&temp_path, &json).await?;
        fs::rename(&temp_path, &self.storage_path).await?;

        debug!("Saved user data ({} bytes) to {:?}", json.len(), self.storage_path);
        Ok(())
    }

    /// Read-modify-write under the write lock.
    async fn update<R>(&self, f: impl FnOnce(&mut UserData) -> R) -> Result<R, CampusDataError> {
        let mut guard = self.data.write().await;
        let mut next = guard.clone();
        let out = f(&mut next);
        self.persist(&next).await?;
        *guard = next;
        Ok(out)
    }

    #[cfg(test)]
    async fn snapshot(&self) -> UserData {
        self.data.read().await.clone()
    }

    /// Record a new expense, newest first.
    #[instrument(skip(self))]
    pub async fn add_expense(
        &self,
        date: NaiveDate,
        item: &str,
        amount: f64,
        category: Category,
    ) -> Result<Transaction, CampusDataError> {
        let record = Transaction {
            date,
            item: item.to_string(),
            amount,
            category,
        };
        let stored = record.clone();
        self.update(move |data| data.extra_transactions.insert(0, stored))
            .await?;
        info!("Recorded expense {} {:.2} ({})", item, amount, category);
        Ok(record)
    }

    pub async fn extra_transactions(&self) -> Vec<Transaction> {
        self.data.read().await.extra_transactions.clone()
    }

    /// Flip a todo's completion state. `baseline_done` is the state used
    /// when no override exists yet. Returns the new state.
    #[instrument(skip(self))]
    pub async fn toggle_todo_done(&self, todo_id: u32, baseline_done: bool) -> Result<bool, CampusDataError> {
        self.update(|data| {
            let done = !data.todos.get(&todo_id).copied().unwrap_or(baseline_done);
            data.todos.insert(todo_id, done);
            done
        })
        .await
    }

    pub async fn todo_overrides(&self) -> std::collections::BTreeMap<u32, bool> {
        self.data.read().await.todos.clone()
    }

    /// One more cup of water. Returns the number of cups added so far.
    pub async fn increment_water(&self) -> Result<u32, CampusDataError> {
        self.update(|data| {
            data.health_overrides.water_cups_added += 1;
            data.health_overrides.water_cups_added
        })
        .await
    }

    pub async fn log_exercise(&self) -> Result<(), CampusDataError> {
        self.update(|data| data.health_overrides.exercise_today = true)
            .await
    }

    pub async fn log_mood(&self, mood: &str) -> Result<(), CampusDataError> {
        let mood = mood.to_string();
        self.update(move |data| data.health_overrides.mood = Some(mood))
            .await
    }

    pub async fn health_overrides(&self) -> HealthOverrides {
        self.data.read().await.health_overrides.clone()
    }

    /// Tick or untick an item on the travel packing list. Returns whether
    /// the item is packed afterwards.
    pub async fn toggle_packed(&self, item: &str) -> Result<bool, CampusDataError> {
        let item = item.to_string();
        self.update(move |data| {
            if data.packing_checked.contains(&item) {
                data.packing_checked.retain(|i| *i != item);
                false
            } else {
                data.packing_checked.push(item);
                true
            }
        })
        .await
    }

    pub async fn packing_checked(&self) -> Vec<String> {
        self.data.read().await.packing_checked.clone()
    }

    /// Append to the saved transcript, keeping only the most recent
    /// `max_messages` entries.
    pub async fn append_chat_messages(
        &self,
        messages: Vec<StoredMessage>,
        max_messages: usize,
    ) -> Result<usize, CampusDataError> {
        self.update(move |data| {
            data.chat_messages.extend(messages);
            if data.chat_messages.len() > max_messages {
                let start = data.chat_messages.len() - max_messages;
                data.chat_messages.drain(..start);
            }
            data.chat_messages.len()
        })
        .await
    }

    pub async fn load_chat_history(&self) -> Vec<StoredMessage> {
        self.data.read().await.chat_messages.clone()
    }

    /// Clear the saved transcript. Returns false when it was already empty.
    pub async fn clear_chat_history(&self) -> Result<bool, CampusDataError> {
        let had_messages = !self.data.read().await.chat_messages.is_empty();
        if had_messages {
            self.update(|data| data.chat_messages.clear()).await?;
            info!("Cleared chat history");
        }
        Ok(had_messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn data_path(dir: &TempDir) -> PathBuf {
        dir.path().join("data").join("user_data.json")
    }

    async fn open_in(dir: &TempDir) -> UserDataStore {
        UserDataStore::open(data_path(dir)).await.unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;

        assert_eq!(store.snapshot().await, UserData::default());
        assert!(!data_path(&dir).exists());
    }

    #[tokio::test]
    async fn test_expense_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = open_in(&dir).await;
            store.add_expense(day(), "Tea", 18.0, Category::Food).await.unwrap();
            store.add_expense(day(), "Bus", 2.0, Category::Transport).await.unwrap();
        }

        let store = open_in(&dir).await;
        let extras = store.extra_transactions().await;
        assert_eq!(extras.len(), 2);
        assert_eq!(extras[0].item, "Bus");
        assert_eq!(extras[1].item, "Tea");
        assert_eq!(extras[1].category, Category::Food);
    }

    #[tokio::test]
    async fn test_file_format_uses_category_names() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;
        store
            .add_expense(day(), "Notebook", 6.5, Category::StudySupplies)
            .await
            .unwrap();

        let raw = std::fs::read_to_string(data_path(&dir)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["extra_transactions"][0]["category"], "Study Supplies");
        assert_eq!(json["extra_transactions"][0]["date"], "2026-10-16");
        assert_eq!(json["version"], 1);
    }

    #[tokio::test]
    async fn test_todo_overrides_roundtrip() {
        let dir = TempDir::new().unwrap();
        {
            let store = open_in(&dir).await;
            assert!(store.toggle_todo_done(3, false).await.unwrap());
            assert!(!store.toggle_todo_done(5, true).await.unwrap());
        }
        let store = open_in(&dir).await;
        let overrides = store.todo_overrides().await;
        assert_eq!(overrides.get(&3), Some(&true));
        assert_eq!(overrides.get(&5), Some(&false));
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_fresh() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("user_data.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = UserDataStore::open(&path).await.unwrap();
        assert_eq!(store.snapshot().await, UserData::default());

        store.log_mood("🙂 Good").await.unwrap();
        let reopened = UserDataStore::open(&path).await.unwrap();
        assert_eq!(reopened.health_overrides().await.mood.as_deref(), Some("🙂 Good"));
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("user_data.json");
        std::fs::write(&path, r#"{"todos": {"2": true}}"#).unwrap();

        let store = UserDataStore::open(&path).await.unwrap();
        let data = store.snapshot().await;
        assert_eq!(data.todos.get(&2), Some(&true));
        assert!(data.chat_messages.is_empty());
        assert!(data.extra_transactions.is_empty());
    }

    #[tokio::test]
    async fn test_health_overrides() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;

        assert_eq!(store.increment_water().await.unwrap(), 1);
        assert_eq!(store.increment_water().await.unwrap(), 2);
        store.log_exercise().await.unwrap();

        let overrides = store.health_overrides().await;
        assert_eq!(overrides.water_cups_added, 2);
        assert!(overrides.exercise_today);
        assert!(overrides.mood.is_none());
    }

    #[tokio::test]
    async fn test_packing_checklist() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;

        assert!(store.toggle_packed("Umbrella").await.unwrap());
        assert!(store.toggle_packed("Power bank").await.unwrap());
        assert_eq!(store.packing_checked().await, vec!["Umbrella", "Power bank"]);

        assert!(!store.toggle_packed("Umbrella").await.unwrap());
        assert_eq!(store.packing_checked().await, vec!["Power bank"]);
    }

    #[tokio::test]
    async fn test_chat_history_trim_and_clear() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;

        let batch: Vec<StoredMessage> = (1..=5)
            .map(|i| StoredMessage::new("user", format!("Message {}", i)))
            .collect();
        let kept = store.append_chat_messages(batch, 3).await.unwrap();
        assert_eq!(kept, 3);

        let history = store.load_chat_history().await;
        assert_eq!(history[0].content, "Message 3");
        assert_eq!(history[2].content, "Message 5");

        assert!(store.clear_chat_history().await.unwrap());
        assert!(!store.clear_chat_history().await.unwrap());
        assert!(store.load_chat_history().await.is_empty());
    }

    #[tokio::test]
    async fn test_chat_history_keeps_calls() {
        let dir = TempDir::new().unwrap();
        {
            let store = open_in(&dir).await;
            let reply = StoredMessage::new("assistant", "Logged it.").with_calls(vec![StoredCallRecord {
                name: "record_expense".into(),
                arguments: serde_json::json!({"item": "Tea", "amount": 18.0, "category": "Food"}),
                result: "Recorded".into(),
            }]);
            store
                .append_chat_messages(vec![StoredMessage::new("user", "I bought tea"), reply], 50)
                .await
                .unwrap();
        }

        let store = open_in(&dir).await;
        let history = store.load_chat_history().await;
        assert_eq!(history.len(), 2);
        assert!(history[0].calls.is_empty());
        assert_eq!(history[1].calls[0].name, "record_expense");
        assert_eq!(history[1].calls[0].arguments["amount"], 18.0);
    }

    #[tokio::test]
    async fn test_concurrent_writes_are_serialized() {
        let dir = TempDir::new().unwrap();
        let store = std::sync::Arc::new(open_in(&dir).await);

        let mut handles = Vec::new();
        for i in 0..10 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .add_expense(day(), &format!("Snack {}", i), 1.0, Category::Food)
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let reopened = open_in(&dir).await;
        assert_eq!(reopened.extra_transactions().await.len(), 10);
    }

    #[tokio::test]
    async fn test_concurrent_toggles_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let store = std::sync::Arc::new(open_in(&dir).await);

        let mut handles = Vec::new();
        for _ in 0..5 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.toggle_todo_done(2, false).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Five flips from "not done" end at "done".
        assert_eq!(store.todo_overrides().await.get(&2), Some(&true));
    }
}
