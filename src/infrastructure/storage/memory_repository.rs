use crate::domain::{Repository, StorageKey};
use anyhow::Result;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory [`Repository`] for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryRepository {
    // ---
    values: RwLock<HashMap<StorageKey, String>>,
}

impl MemoryRepository {
    // ---
    pub fn new() -> Self {
        // ---
        Self::default()
    }
}

#[async_trait::async_trait]
impl Repository for MemoryRepository {
    // ---
    async fn read_raw(&self, key: StorageKey) -> Result<Option<String>> {
        // ---
        Ok(self.values.read().await.get(&key).cloned())
    }

    async fn write_raw(&self, key: StorageKey, value: String) -> Result<()> {
        // ---
        self.values.write().await.insert(key, value);
        Ok(())
    }
}
