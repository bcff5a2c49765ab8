//! Storage doubles for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

use super::{InMemoryKeyValueStorage, KeyValueStorage};

/// In-memory storage whose first `set` parks until [`GatedStorage::release`]
/// is called. `entered` fires once that write is parked.
#[derive(Default)]
pub struct GatedStorage {
    inner: InMemoryKeyValueStorage,
    gate_used: AtomicBool,
    pub entered: Notify,
    release: Notify,
}

impl GatedStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl KeyValueStorage for GatedStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if !self.gate_used.swap(true, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        self.inner.remove(key).await
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        self.inner.list_keys().await
    }
}
