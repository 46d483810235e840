//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities have a unique, opaque string ID and are thread-safe.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// Returns the entity's unique identifier
    fn id(&self) -> &str;
}

/// Index of the entity with `id` in a flat collection
pub fn position_of<T: Entity>(entities: &[T], id: &str) -> Option<usize> {
    entities.iter().position(|e| e.id() == id)
}

/// Find an entity by id in a flat collection
pub fn find_by_id<'a, T: Entity>(entities: &'a [T], id: &str) -> Option<&'a T> {
    entities.iter().find(|e| e.id() == id)
}

/// Fresh time-derived identifier (ULID text form, sorts by creation time)
pub fn new_id() -> String {
    ulid::Ulid::new().to_string()
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DomainError {
    /// A memo or move referenced a category that does not exist
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    /// Imported backup is unparseable or has the wrong shape
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// The record store rejected a read or write
    #[error("Storage failure: {0}")]
    StorageFailure(String),
    #[error("Not found: {0}")]
    NotFound(String),
    /// Pinned memos must be unpinned before deletion
    #[error("Memo {0} is pinned; unpin it before deleting")]
    Pinned(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
