//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer does no I/O.

mod entity;
mod memo;
mod category;
mod clipboard;
mod history;
mod outline;
mod snapshot;

pub use entity::{Entity, DomainError, DomainResult, find_by_id, position_of, new_id};
pub use memo::{Memo, RawMemo, title_of};
pub use category::{Category, RawCategory, DefaultBucket, PALETTE, palette_color};
pub use clipboard::ClipboardButton;
pub use history::{EditHistory, DEFAULT_HISTORY_LIMIT};
pub use outline::{outline, flatten as flatten_outline, Section};
pub use snapshot::{StoredCollections, CATEGORIES_KEY, MEMOS_KEY, CLIPBOARD_KEY};
