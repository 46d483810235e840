//! Persisted collections
//!
//! The whole-collection shape read from and written to a record store.

use serde::{Deserialize, Serialize};
use super::category::RawCategory;
use super::clipboard::ClipboardButton;
use super::memo::RawMemo;

/// Storage keys, one JSON array per key
pub const CATEGORIES_KEY: &str = "categories";
pub const MEMOS_KEY: &str = "memos";
pub const CLIPBOARD_KEY: &str = "clipboardButtons";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCollections {
    #[serde(default)]
    pub categories: Vec<RawCategory>,
    #[serde(default)]
    pub memos: Vec<RawMemo>,
    #[serde(default)]
    pub clipboard_buttons: Vec<ClipboardButton>,
}

impl StoredCollections {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.memos.is_empty() && self.clipboard_buttons.is_empty()
    }
}
