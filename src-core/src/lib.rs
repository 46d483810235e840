//! Memo-Shelf Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - engine: Ordering, pinning, migration and backup logic over the domain
//! - repository: Record store abstraction and implementations
//! - service: Draft/commit mutations with rollback on storage failure
//! - commands: Handlers the frontend calls

use std::sync::Arc;
use tokio::sync::Mutex;

pub mod domain;
pub mod engine;
pub mod repository;
pub mod service;
pub mod config;
pub mod commands;

pub use config::AppConfig;
use repository::{init_db, SqliteRecordStore};
use service::MemoService;

/// Application state shared across commands
pub struct AppState {
    pub service: Mutex<MemoService>,
    pub config: AppConfig,
}

/// Start the rolling file logger in the configured log directory.
///
/// A second call is reported as an error and leaves the first logger in place.
pub fn init_logging(config: &AppConfig) -> Result<(), String> {
    rolling_logger::init_logger(config.log_dir(), "MemoShelf")
}

/// Whether `init_logging` succeeded, so errors already reach stderr
pub fn logging_enabled() -> bool {
    rolling_logger::log_file_path().is_some()
}

/// Open the database and load the memo book
pub async fn init_app(config: AppConfig) -> Result<AppState, String> {
    let db_path = config.db_path();
    log::info!("Opening database at {}", db_path.display());

    let db_state = init_db(&db_path).await.map_err(|e| {
        let _ = rolling_logger::error(&format!("DB init failed: {}", e));
        e
    })?;
    let store = Arc::new(SqliteRecordStore::new(db_state.conn.clone()));

    let now = chrono::Utc::now().timestamp_millis();
    let service = MemoService::open(store, config.default_bucket.clone(), config.history_limit, now)
        .await
        .map_err(|e| e.to_string())?;

    log::info!(
        "Loaded {} categories and {} memos",
        service.book().categories().len(),
        service.book().memos().len()
    );

    Ok(AppState {
        service: Mutex::new(service),
        config,
    })
}
