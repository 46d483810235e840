//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod sqlite_store;
mod memory_store;

#[cfg(test)]
mod tests;

pub use traits::RecordStore;
pub use db::{init_db, schema_version, DbState, SharedConnection, SCHEMA_VERSION};
pub use sqlite_store::SqliteRecordStore;
pub use memory_store::{MemoryRecordStore, MemoryStoreConfig};
