//! Persistence for the mood check-in bot.
//!
//! The whole [`UserTable`] is read and overwritten as one JSON document.
//! There is no locking: two processes saving at once means the last writer
//! wins.
//!
//! # Example
//!
//! ```no_run
//! use checkin_store::{JsonFileStore, UserStore};
//!
//! # async fn example() -> checkin_store::Result<()> {
//! let store = JsonFileStore::new("data/db.json");
//!
//! let mut table = store.load().await;
//! table.get_or_create("12345").daily_enabled = true;
//! store.save(&table).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod json_file;
pub mod memory;

pub use checkin_core::UserTable;
pub use error::{Result, StoreError};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use async_trait::async_trait;

/// Loads and saves the full user table.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Read the table.
    ///
    /// A missing, unreadable or malformed file yields an empty table; the
    /// problem is logged and never returned.
    async fn load(&self) -> UserTable;

    /// Overwrite the stored table.
    async fn save(&self, table: &UserTable) -> Result<()>;
}

#[async_trait]
impl<T: UserStore + ?Sized> UserStore for Arc<T> {
    async fn load(&self) -> UserTable {
        (**self).load().await
    }

    async fn save(&self, table: &UserTable) -> Result<()> {
        (**self).save(table).await
    }
}
