//! # Storage Traits
//!
//! The storage port the domain layer depends on.

use anyhow::Result;
use async_trait::async_trait;

/// String key-value storage, the server-side stand-in for per-browser
/// local storage
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Returns true if a value was removed
    async fn remove(&self, key: &str) -> Result<bool>;

    /// All stored keys in ascending order
    async fn list_keys(&self) -> Result<Vec<String>>;
}
