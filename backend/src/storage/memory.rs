use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::traits::KeyValueStorage;

/// Key-value storage that lives only as long as the process
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStorage {
    values: Arc<RwLock<BTreeMap<String, String>>>,
}

impl InMemoryKeyValueStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorage for InMemoryKeyValueStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.values.write().await.remove(key).is_some())
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        Ok(self.values.read().await.keys().cloned().collect())
    }
}
