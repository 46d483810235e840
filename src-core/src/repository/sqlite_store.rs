//! SQLite Record Store
//!
//! Each collection is one row of `collections`, its data a JSON array.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{
    DomainError, DomainResult, StoredCollections, CATEGORIES_KEY, CLIPBOARD_KEY, MEMOS_KEY,
};
use super::db::SharedConnection;
use super::traits::RecordStore;

/// SQLite implementation of the record store
pub struct SqliteRecordStore {
    conn: SharedConnection,
}

impl SqliteRecordStore {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

fn storage_err(e: impl std::fmt::Display) -> DomainError {
    DomainError::StorageFailure(e.to_string())
}

fn read_collection<T: DeserializeOwned>(conn: &rusqlite::Connection, name: &str) -> DomainResult<Vec<T>> {
    let data: Option<String> = conn
        .query_row("SELECT data FROM collections WHERE name = ?", params![name], |row| row.get(0))
        .optional()
        .map_err(storage_err)?;

    match data {
        Some(json) => serde_json::from_str(&json)
            .map_err(|e| DomainError::StorageFailure(format!("Corrupt collection {}: {}", name, e))),
        None => Ok(Vec::new()),
    }
}

fn write_collection<T: Serialize>(
    tx: &rusqlite::Transaction<'_>,
    name: &str,
    records: &[T],
    now: i64,
) -> DomainResult<()> {
    let json = serde_json::to_string(records).map_err(storage_err)?;
    tx.execute(
        "INSERT INTO collections (name, data, updated_at) VALUES (?, ?, ?)
         ON CONFLICT(name) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
        params![name, json, now],
    )
    .map_err(storage_err)?;
    Ok(())
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn load(&self) -> DomainResult<StoredCollections> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        Ok(StoredCollections {
            categories: read_collection(conn, CATEGORIES_KEY)?,
            memos: read_collection(conn, MEMOS_KEY)?,
            clipboard_buttons: read_collection(conn, CLIPBOARD_KEY)?,
        })
    }

    async fn save_all(&self, collections: &StoredCollections) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or(DomainError::Internal("Database not initialized".to_string()))?;
        let now = chrono::Utc::now().timestamp_millis();

        let tx = conn.transaction().map_err(storage_err)?;
        write_collection(&tx, CATEGORIES_KEY, &collections.categories, now)?;
        write_collection(&tx, MEMOS_KEY, &collections.memos, now)?;
        write_collection(&tx, CLIPBOARD_KEY, &collections.clipboard_buttons, now)?;
        tx.commit().map_err(storage_err)?;

        log::debug!(
            "Saved {} categories, {} memos, {} clipboard buttons",
            collections.categories.len(),
            collections.memos.len(),
            collections.clipboard_buttons.len()
        );
        Ok(())
    }
}
