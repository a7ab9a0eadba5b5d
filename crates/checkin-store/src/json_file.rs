//! Single-file JSON store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use checkin_core::UserTable;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::Result;
use crate::UserStore;

/// Default file name, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "db.json";

/// Stores the table as pretty-printed JSON in one file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}

#[async_trait]
impl UserStore for JsonFileStore {
    async fn load(&self) -> UserTable {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No state file yet, starting empty");
                return UserTable::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read state file");
                return UserTable::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(table) => table,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "State file is not valid, starting empty");
                UserTable::default()
            }
        }
    }

    async fn save(&self, table: &UserTable) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_string_pretty(table)?;
        fs::write(&self.path, data).await?;

        debug!(path = %self.path.display(), users = table.len(), "Saved state file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkin_core::{ChatId, ConversationState, Mode};

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/dir/db.json"));

        let mut table = UserTable::new();
        let record = table.get_or_create("42");
        record.chat_id = Some(ChatId(42));
        record.state = ConversationState::WaitingTopic;
        record.mode = Some(Mode::Clarity);
        record.last.label = Some("нежность".to_string());
        store.save(&table).await.unwrap();

        let loaded = store.load().await;
        assert_eq!(loaded, table);
    }

    #[tokio::test]
    async fn test_save_overwrites_whole_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("db.json"));

        let mut first = UserTable::new();
        first.get_or_create("1");
        first.get_or_create("2");
        store.save(&first).await.unwrap();

        let mut second = UserTable::new();
        second.get_or_create("3");
        store.save(&second).await.unwrap();

        let loaded = store.load().await;
        assert_eq!(loaded.len(), 1);
        assert!(loaded.get("3").is_some());
    }

    #[tokio::test]
    async fn test_reads_handwritten_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(
            &path,
            r#"{
              "users": {
                "7": {
                  "chatId": 7,
                  "state": "waiting_label",
                  "mode": "support",
                  "last": { "intensity": 5, "label": null, "topic": null, "choice": null },
                  "dailyEnabled": true,
                  "history": []
                }
              }
            }"#,
        )
        .unwrap();

        let table = JsonFileStore::new(&path).load().await;
        let record = table.get("7").unwrap();
        assert_eq!(record.state, ConversationState::WaitingLabel);
        assert_eq!(record.mode, Some(Mode::Support));
        assert_eq!(record.last.intensity.map(|i| i.value()), Some(5));
        assert!(record.daily_enabled);
    }
}
