//! SQLite Key-Value Repository
//!
//! SQLite-backed implementation of KeyValueStore.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};
use super::db::init_db;
use super::traits::KeyValueStore;

pub struct SqliteKvStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteKvStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Open the database file, running migrations
    pub fn open(db_path: &Path) -> DomainResult<Self> {
        let conn = init_db(db_path)?;
        Ok(Self::new(Arc::new(Mutex::new(conn))))
    }

    pub fn open_in_memory() -> DomainResult<Self> {
        Self::open(Path::new(":memory:"))
    }
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn get(&self, key: &str) -> DomainResult<Option<Vec<u8>>> {
        let conn = self.conn.lock().await;

        conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?",
            params![key],
            |row| row.get::<_, Vec<u8>>(0),
        )
        .optional()
        .map_err(|e| DomainError::Storage(e.to_string()))
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        let now = chrono::Local::now().timestamp_millis();
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = excluded.updated_at",
            params![key, value, now],
        )
        .map_err(|e| DomainError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        conn.execute("DELETE FROM kv_store WHERE key = ?", params![key])
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        Ok(())
    }
}
