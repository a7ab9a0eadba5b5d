//! In-memory store for tests and dry runs.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use checkin_core::UserTable;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::UserStore;

/// Keeps the table in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<UserTable>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing table.
    pub fn with_table(table: UserTable) -> Self {
        Self {
            table: RwLock::new(table),
            saves: AtomicUsize::new(0),
        }
    }

    /// Current contents.
    pub async fn snapshot(&self) -> UserTable {
        self.table.read().await.clone()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn load(&self) -> UserTable {
        self.table.read().await.clone()
    }

    async fn save(&self, table: &UserTable) -> Result<()> {
        *self.table.write().await = table.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().await.is_empty());

        let mut table = store.load().await;
        table.get_or_create("1").daily_enabled = true;
        store.save(&table).await.unwrap();

        assert_eq!(store.save_count(), 1);
        assert!(store.snapshot().await.get("1").unwrap().daily_enabled);
    }

    #[tokio::test]
    async fn test_load_returns_a_copy() {
        let store = MemoryStore::new();
        let mut table = store.load().await;
        table.get_or_create("1");
        assert!(store.load().await.is_empty());
    }
}
