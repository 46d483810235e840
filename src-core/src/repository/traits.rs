//! Repository Layer - Core Traits
//!
//! Defines the abstract interface for record persistence.
//! Implementations can use SQLite, in-memory, a remote document store, etc.

use async_trait::async_trait;
use crate::domain::{DomainResult, StoredCollections};

/// Whole-collection key-value store
///
/// Each collection is read and written as a unit; there are no per-record
/// operations. All operations are async to support various backends.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load every collection. Missing keys load as empty lists.
    async fn load(&self) -> DomainResult<StoredCollections>;

    /// Replace every collection in one write
    async fn save_all(&self, collections: &StoredCollections) -> DomainResult<()>;
}
