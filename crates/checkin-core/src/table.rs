//! The full user table, as persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::{ChatId, UserRecord};

/// All known users keyed by their platform user identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTable {
    #[serde(default)]
    pub users: BTreeMap<String, UserRecord>,
}

impl UserTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: &str) -> Option<&UserRecord> {
        self.users.get(user_id)
    }

    /// Get a user's record, creating a fresh one on first contact.
    pub fn get_or_create(&mut self, user_id: &str) -> &mut UserRecord {
        self.users.entry(user_id.to_string()).or_default()
    }

    /// Replace a user's record.
    pub fn insert(&mut self, user_id: impl Into<String>, record: UserRecord) {
        self.users.insert(user_id.into(), record);
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Users opted in to daily reminders that have a known chat.
    pub fn reminder_recipients(&self) -> impl Iterator<Item = (&str, ChatId)> {
        self.users
            .iter()
            .filter_map(|(id, record)| record.reminder_target().map(|chat| (id.as_str(), chat)))
    }
}
