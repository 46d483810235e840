//! Memo Entity
//!
//! A note belonging to exactly one category. Display order is driven by
//! `order` for normal memos and `pinned_at` for pinned ones.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// A memo in its normalized shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    /// Unique identifier
    pub id: String,
    /// First line of the content
    pub title: String,
    /// Full text (markdown / wiki markup)
    pub content: String,
    /// Owning category
    pub category_id: String,
    /// Creation time (ms since epoch)
    pub created_at: i64,
    /// Position among the non-pinned memos of the category
    pub order: i64,
    #[serde(default)]
    pub pinned: bool,
    /// When the memo was pinned (ms); present iff `pinned`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_at: Option<i64>,
    /// Saved scroll offset in the viewer, 0 = none
    #[serde(default)]
    pub bookmark_position: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl Memo {
    /// Create an unplaced memo; the ordering engine assigns `order`
    pub fn new(id: String, content: String, category_id: String, created_at: i64) -> Self {
        Self {
            id,
            title: title_of(&content),
            content,
            category_id,
            created_at,
            order: 0,
            pinned: false,
            pinned_at: None,
            bookmark_position: 0.0,
            updated_at: None,
        }
    }

    /// Replace the content, keeping the title in sync
    pub fn set_content(&mut self, content: String) {
        self.title = title_of(&content);
        self.content = content;
    }

    pub fn is_in(&self, category_id: &str) -> bool {
        self.category_id == category_id
    }

    pub fn has_bookmark(&self) -> bool {
        self.bookmark_position > 0.0
    }
}

impl Entity for Memo {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Title derived from content: the first line of the trimmed text
pub fn title_of(content: &str) -> String {
    content.trim().lines().next().unwrap_or("").trim().to_string()
}

/// A memo as found in storage or a backup file.
///
/// Legacy records may lack `order`, `pinnedAt`, `createdAt` and friends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMemo {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmark_position: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl From<Memo> for RawMemo {
    fn from(memo: Memo) -> Self {
        Self {
            id: memo.id,
            title: Some(memo.title),
            content: memo.content,
            category_id: Some(memo.category_id),
            created_at: Some(memo.created_at),
            order: Some(memo.order),
            pinned: Some(memo.pinned),
            pinned_at: memo.pinned_at,
            bookmark_position: Some(memo.bookmark_position),
            updated_at: memo.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_creation() {
        let memo = Memo::new("m1".into(), "Groceries\nmilk\neggs".into(), "in-box".into(), 10);
        assert_eq!(memo.id(), "m1");
        assert_eq!(memo.title, "Groceries");
        assert!(!memo.pinned);
        assert!(memo.is_in("in-box"));
        assert!(!memo.has_bookmark());
    }

    #[test]
    fn test_set_content_updates_title() {
        let mut memo = Memo::new("m1".into(), "old".into(), "in-box".into(), 10);
        memo.set_content("  new title  \nbody".into());
        assert_eq!(memo.title, "new title");
        assert_eq!(memo.content, "  new title  \nbody");
        assert_eq!(title_of("\n\n  heading\nrest"), "heading");
    }

    #[test]
    fn test_raw_memo_legacy_json() {
        let raw: RawMemo = serde_json::from_str(
            r#"{"id":"1699999999999","title":"t","content":"t","categoryId":"in-box","createdAt":1699999999999,"pinned":true,"bookmarkPosition":120.5}"#,
        )
        .unwrap();
        assert_eq!(raw.order, None);
        assert_eq!(raw.pinned, Some(true));
        assert_eq!(raw.pinned_at, None);
        assert_eq!(raw.bookmark_position, Some(120.5));
    }

    #[test]
    fn test_unpinned_memo_omits_pinned_at() {
        let memo = Memo::new("m1".into(), "x".into(), "in-box".into(), 10);
        let json = serde_json::to_value(&memo).unwrap();
        assert!(json.get("pinnedAt").is_none());
        assert_eq!(json["categoryId"], "in-box");
    }
}
