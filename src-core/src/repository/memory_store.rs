//! In-memory Record Store
//!
//! Keeps the collections in memory. Failures can be switched on to exercise
//! the rollback path of the service.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{DomainError, DomainResult, StoredCollections};
use super::traits::RecordStore;

/// Configuration for simulated failures
#[derive(Debug, Clone, Default)]
pub struct MemoryStoreConfig {
    /// Whether `load` fails
    pub fail_load: bool,
    /// Whether `save_all` fails
    pub fail_save: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    data: Arc<RwLock<StoredCollections>>,
    config: Arc<RwLock<MemoryStoreConfig>>,
    saves: Arc<RwLock<usize>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing collections, e.g. legacy records
    pub fn with_data(data: StoredCollections) -> Self {
        Self {
            data: Arc::new(RwLock::new(data)),
            ..Self::default()
        }
    }

    pub async fn set_config(&self, config: MemoryStoreConfig) {
        *self.config.write().await = config;
    }

    pub async fn set_fail_save(&self, fail: bool) {
        self.config.write().await.fail_save = fail;
    }

    /// Number of successful `save_all` calls
    pub async fn save_count(&self) -> usize {
        *self.saves.read().await
    }

    pub async fn data(&self) -> StoredCollections {
        self.data.read().await.clone()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn load(&self) -> DomainResult<StoredCollections> {
        if self.config.read().await.fail_load {
            return Err(DomainError::StorageFailure("Simulated load failure".to_string()));
        }
        Ok(self.data.read().await.clone())
    }

    async fn save_all(&self, collections: &StoredCollections) -> DomainResult<()> {
        if self.config.read().await.fail_save {
            return Err(DomainError::StorageFailure("Simulated save failure".to_string()));
        }
        *self.data.write().await = collections.clone();
        *self.saves.write().await += 1;
        Ok(())
    }
}
