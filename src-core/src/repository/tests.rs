//! Repository Integration Tests
//!
//! Tests for the record stores with in-memory and on-disk SQLite databases.

#[cfg(test)]
mod tests {
    use crate::domain::{ClipboardButton, DomainError, RawCategory, RawMemo, StoredCollections};
    use crate::repository::{
        init_db, schema_version, MemoryRecordStore, MemoryStoreConfig, RecordStore, SqliteRecordStore,
        SCHEMA_VERSION,
    };
    use std::path::PathBuf;

    async fn setup_test_store() -> SqliteRecordStore {
        // Use in-memory database for tests
        let db_state = init_db(&PathBuf::from(":memory:")).await.expect("Failed to init test DB");
        SqliteRecordStore::new(db_state.conn.clone())
    }

    fn sample() -> StoredCollections {
        StoredCollections {
            categories: vec![RawCategory {
                id: "in-box".into(),
                name: "IN-BOX".into(),
                color: Some("#FFE1E6".into()),
                order: Some(0),
                created_at: Some(1),
            }],
            memos: vec![RawMemo {
                id: "m1".into(),
                title: Some("hello".into()),
                content: "hello\nworld".into(),
                category_id: Some("in-box".into()),
                created_at: Some(2),
                order: Some(1),
                pinned: Some(false),
                bookmark_position: Some(12.5),
                ..Default::default()
            }],
            clipboard_buttons: vec![ClipboardButton::new(
                "c1".into(),
                "mail".into(),
                "me@example.com".into(),
                "#E1F0FF".into(),
            )],
        }
    }

    #[tokio::test]
    async fn test_empty_database_loads_empty_collections() {
        let store = setup_test_store().await;
        let loaded = store.load().await.expect("Load failed");
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let store = setup_test_store().await;
        store.save_all(&sample()).await.expect("Save failed");

        let loaded = store.load().await.expect("Load failed");
        assert_eq!(loaded, sample());
    }

    #[tokio::test]
    async fn test_save_replaces_previous_data() {
        let store = setup_test_store().await;
        store.save_all(&sample()).await.unwrap();

        let mut next = sample();
        next.memos.clear();
        store.save_all(&next).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert!(loaded.memos.is_empty());
        assert_eq!(loaded.categories.len(), 1);
    }

    #[tokio::test]
    async fn test_legacy_rows_load_as_raw_records() {
        let db_state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        {
            let guard = db_state.conn.lock().await;
            let conn = guard.as_ref().unwrap();
            conn.execute(
                "INSERT INTO collections (name, data) VALUES ('memos', '[{\"id\":\"1700000000000\",\"content\":\"old\"}]')",
                [],
            )
            .unwrap();
        }
        let store = SqliteRecordStore::new(db_state.conn.clone());

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.memos.len(), 1);
        assert_eq!(loaded.memos[0].order, None);
        assert!(loaded.categories.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_collection_is_a_storage_failure() {
        let db_state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        {
            let guard = db_state.conn.lock().await;
            guard
                .as_ref()
                .unwrap()
                .execute("INSERT INTO collections (name, data) VALUES ('categories', 'nope')", [])
                .unwrap();
        }
        let store = SqliteRecordStore::new(db_state.conn.clone());

        assert!(matches!(store.load().await, Err(DomainError::StorageFailure(_))));
    }

    #[tokio::test]
    async fn test_on_disk_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("memo_shelf.db");

        {
            let db_state = init_db(&path).await.unwrap();
            SqliteRecordStore::new(db_state.conn.clone()).save_all(&sample()).await.unwrap();
        }

        let db_state = init_db(&path).await.unwrap();
        {
            let guard = db_state.conn.lock().await;
            assert_eq!(schema_version(guard.as_ref().unwrap()).unwrap(), SCHEMA_VERSION);
        }
        let loaded = SqliteRecordStore::new(db_state.conn.clone()).load().await.unwrap();
        assert_eq!(loaded, sample());
    }

    #[tokio::test]
    async fn test_uninitialized_connection() {
        let store = SqliteRecordStore::new(crate::repository::DbState::new().conn);
        assert!(matches!(store.load().await, Err(DomainError::Internal(_))));
    }

    #[tokio::test]
    async fn test_memory_store_failure_injection() {
        let store = MemoryRecordStore::with_data(sample());
        store.save_all(&sample()).await.unwrap();
        assert_eq!(store.save_count().await, 1);

        store
            .set_config(MemoryStoreConfig {
                fail_load: true,
                fail_save: true,
            })
            .await;
        assert!(matches!(store.load().await, Err(DomainError::StorageFailure(_))));
        assert!(matches!(
            store.save_all(&StoredCollections::default()).await,
            Err(DomainError::StorageFailure(_))
        ));
        assert_eq!(store.save_count().await, 1);
        assert_eq!(store.data().await, sample());
    }
}
