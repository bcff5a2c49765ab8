//! SQLite adapter for the key-value storage port.

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::sync::Arc;

use super::traits::KeyValueStorage;

/// Key-value storage in a `key_values` table
#[derive(Clone)]
pub struct SqliteKeyValueStorage {
    pool: Arc<SqlitePool>,
}

impl SqliteKeyValueStorage {
    /// Open (creating if needed) the database at `url`.
    ///
    /// `sqlite::memory:` gets its own named shared-cache database held open by
    /// a single pooled connection, so every query sees the same data.
    pub async fn new(url: &str) -> Result<Self> {
        if Self::is_memory_url(url) {
            let named = format!("file:memdb_{}?mode=memory&cache=shared", uuid::Uuid::new_v4());
            let pool = SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(&named)
                .await?;
            Self::setup_schema(&pool).await?;
            info!("Opened in-memory key-value store");
            return Ok(Self { pool: Arc::new(pool) });
        }

        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating key-value database at {}", url);
            Sqlite::create_database(url).await?;
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// A fresh, empty in-memory store
    pub async fn in_memory() -> Result<Self> {
        Self::new("sqlite::memory:").await
    }

    fn is_memory_url(url: &str) -> bool {
        matches!(url, "sqlite::memory:" | "sqlite://:memory:" | ":memory:")
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS key_values (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStorage for SqliteKeyValueStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM key_values WHERE key = ?")
            .bind(key)
            .fetch_optional(&*self.pool)
            .await?;

        Ok(row.map(|r| r.get("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO key_values (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM key_values WHERE key = ?")
            .bind(key)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT key FROM key_values ORDER BY key")
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows.iter().map(|row| row.get("key")).collect())
    }
}
