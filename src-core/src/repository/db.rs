//! Database Connection and Setup
//!
//! Manages the SQLite connection and schema migrations.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Current schema version stored in `meta`
pub const SCHEMA_VERSION: i64 = 2;

/// Shared connection slot; `None` until `init_db` succeeds
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: SharedConnection,
}

impl DbState {
    pub fn new() -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
        }
    }
}

impl Default for DbState {
    fn default() -> Self {
        Self::new()
    }
}

/// Open (or create) the database at `db_path` and run migrations.
///
/// `":memory:"` opens a private in-memory database.
pub async fn init_db(db_path: &Path) -> Result<DbState, String> {
    let conn = if db_path.as_os_str() == ":memory:" {
        Connection::open_in_memory()
    } else {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        Connection::open(db_path)
    }
    .map_err(|e| format!("Failed to open db: {}", e))?;

    run_migrations(&conn)?;

    let state = DbState::new();
    *state.conn.lock().await = Some(conn);
    Ok(state)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(mut rows) = stmt.query([]) else {
        return false;
    };
    while let Ok(Some(row)) = rows.next() {
        if let Ok(name) = row.get::<_, String>(1) {
            if name == column {
                return true;
            }
        }
    }
    false
}

/// Read the recorded schema version, 0 for a fresh database
pub fn schema_version(conn: &Connection) -> Result<i64, String> {
    let value: Option<String> = conn
        .query_row("SELECT value FROM meta WHERE key = 'schema_version'", [], |row| row.get(0))
        .optional()
        .map_err(|e| e.to_string())?;
    Ok(value.and_then(|v| v.parse().ok()).unwrap_or(0))
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    // Version 1: one JSON array per collection
    conn.execute(
        "CREATE TABLE IF NOT EXISTS collections (
            name TEXT PRIMARY KEY,
            data TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    // Version 2: write timestamps
    if !column_exists(conn, "collections", "updated_at") {
        conn.execute(
            "ALTER TABLE collections ADD COLUMN updated_at INTEGER NOT NULL DEFAULT 0",
            [],
        )
        .map_err(|e| format!("Failed to add updated_at: {}", e))?;
    }

    let from = schema_version(conn)?;
    if from < SCHEMA_VERSION {
        conn.execute(
            "INSERT INTO meta (key, value) VALUES ('schema_version', ?1)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![SCHEMA_VERSION.to_string()],
        )
        .map_err(|e| e.to_string())?;
        log::info!("Database schema migrated from v{} to v{}", from, SCHEMA_VERSION);
    }

    Ok(())
}
