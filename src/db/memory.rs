//! In-memory user store for local development and tests.

use crate::db::UserStore;
use crate::error::AppError;
use crate::models::User;
use async_trait::async_trait;
use dashmap::DashMap;
use std::path::Path;

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: DashMap<String, User>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load users from a JSON array on disk.
    pub fn from_seed_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let users: Vec<User> = serde_json::from_str(&raw)?;
        let store = Self::new();
        for user in users {
            store.insert(user);
        }
        tracing::info!(
            path = %path.display(),
            count = store.len(),
            "Loaded user seed file"
        );
        Ok(store)
    }

    /// Insert or replace a user, keyed by ID.
    pub fn insert(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.get(user_id).map(|entry| entry.value().clone()))
    }
}
