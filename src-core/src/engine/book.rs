//! Memo Book
//!
//! In-memory aggregate of categories, memos and clipboard buttons. Every user
//! operation goes through here; placement and sorting are delegated to the
//! ordering engine and the category reorder module.

use crate::domain::{
    find_by_id, new_id, palette_color, position_of, Category, ClipboardButton, DefaultBucket,
    DomainError, DomainResult, Memo, RawCategory, RawMemo, StoredCollections,
};

use super::backup::{self, Backup, ParsedBackup};
use super::category_order;
use super::migration::{self, MigrationReport};
use super::ordering;

#[derive(Debug, Clone)]
pub struct MemoBook {
    categories: Vec<Category>,
    memos: Vec<Memo>,
    clipboard_buttons: Vec<ClipboardButton>,
    bucket: DefaultBucket,
}

impl MemoBook {
    /// Empty book holding only the default bucket
    pub fn new(bucket: DefaultBucket, now: i64) -> Self {
        Self {
            categories: vec![bucket.to_category(now)],
            memos: Vec::new(),
            clipboard_buttons: Vec::new(),
            bucket,
        }
    }

    /// Build from persisted collections, normalizing legacy records
    pub fn from_stored(stored: StoredCollections, bucket: DefaultBucket, now: i64) -> (Self, MigrationReport) {
        let normalized = migration::normalize(stored.categories, stored.memos, &bucket, now);
        let book = Self {
            categories: normalized.categories,
            memos: normalized.memos,
            clipboard_buttons: stored.clipboard_buttons,
            bucket,
        };
        (book, normalized.report)
    }

    /// Collections in their persisted shape
    pub fn snapshot(&self) -> StoredCollections {
        StoredCollections {
            categories: self.categories.iter().cloned().map(RawCategory::from).collect(),
            memos: self.memos.iter().cloned().map(RawMemo::from).collect(),
            clipboard_buttons: self.clipboard_buttons.clone(),
        }
    }

    pub fn bucket(&self) -> &DefaultBucket {
        &self.bucket
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn memos(&self) -> &[Memo] {
        &self.memos
    }

    // ========================
    // Memos
    // ========================

    /// Create a memo at the end of `category_id` (default bucket when `None`)
    pub fn add_memo(&mut self, content: &str, category_id: Option<&str>, now: i64) -> DomainResult<Memo> {
        if content.trim().is_empty() {
            return Err(DomainError::InvalidInput("Memo content is empty".to_string()));
        }
        let category_id = category_id.unwrap_or(&self.bucket.id).to_string();

        let mut memo = Memo::new(new_id(), content.trim().to_string(), String::new(), now);
        memo.updated_at = Some(now);
        let memo = ordering::append(&mut self.memos, &self.categories, memo, &category_id)?;

        self.memos.push(memo.clone());
        Ok(memo)
    }

    /// Replace content, optionally moving the memo to another category
    pub fn edit_memo(
        &mut self,
        id: &str,
        content: &str,
        category_id: Option<&str>,
        now: i64,
    ) -> DomainResult<Memo> {
        if content.trim().is_empty() {
            return Err(DomainError::InvalidInput("Memo content is empty".to_string()));
        }
        let index = self.memo_index(id)?;

        let target = category_id.filter(|c| *c != self.memos[index].category_id);
        if let Some(target) = target {
            ordering::check_category(&self.categories, target)?;
            if self.memos[index].pinned {
                // keeps its pin time; normal order is reassigned on unpin
                self.memos[index].category_id = target.to_string();
            } else {
                let current = self.memos[index].clone();
                let placed = ordering::append(&mut self.memos, &self.categories, current, target)?;
                self.memos[index] = placed;
            }
        }

        let memo = &mut self.memos[index];
        memo.set_content(content.trim().to_string());
        memo.updated_at = Some(now);
        Ok(memo.clone())
    }

    /// Remove a memo. Pinned memos are refused.
    pub fn delete_memo(&mut self, id: &str) -> DomainResult<Memo> {
        let index = self.memo_index(id)?;
        if !ordering::can_delete(&self.memos[index]) {
            return Err(DomainError::Pinned(id.to_string()));
        }
        Ok(self.memos.remove(index))
    }

    pub fn toggle_pin(&mut self, id: &str, now: i64) -> Option<Memo> {
        ordering::toggle_pin(&mut self.memos, id, now)
    }

    pub fn reorder_memos(&mut self, category_id: &str, ordered_ids: &[String]) -> DomainResult<usize> {
        ordering::reorder(&mut self.memos, &self.categories, category_id, ordered_ids)
    }

    /// Save a scroll position; `None` or 0 clears the bookmark
    pub fn toggle_bookmark(&mut self, id: &str, position: Option<f64>) -> DomainResult<Memo> {
        let position = position.unwrap_or(0.0);
        if !position.is_finite() || position < 0.0 {
            return Err(DomainError::InvalidInput(format!("Invalid bookmark position: {}", position)));
        }
        let index = self.memo_index(id)?;
        self.memos[index].bookmark_position = position;
        Ok(self.memos[index].clone())
    }

    pub fn find_memo(&self, id: &str) -> Option<&Memo> {
        find_by_id(&self.memos, id)
    }

    pub fn memos_for_display(&self, category_id: &str) -> Vec<&Memo> {
        ordering::sort_for_display(&self.memos, category_id)
    }

    /// Case-insensitive match on title and content, in display order
    pub fn search(&self, query: &str) -> Vec<&Memo> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.categories_for_display()
            .into_iter()
            .flat_map(|category| self.memos_for_display(&category.id))
            .filter(|m| m.title.to_lowercase().contains(&needle) || m.content.to_lowercase().contains(&needle))
            .collect()
    }

    fn memo_index(&self, id: &str) -> DomainResult<usize> {
        position_of(&self.memos, id).ok_or_else(|| DomainError::NotFound(format!("Memo {} not found", id)))
    }

    // ========================
    // Categories
    // ========================

    pub fn add_category(&mut self, name: &str, now: i64) -> DomainResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidInput("Category name is empty".to_string()));
        }

        let order = category_order::append_order(&mut self.categories, &self.bucket);
        let color = palette_color(self.categories.len()).to_string();
        let category = Category::new(new_id(), name.to_string(), color, order, now);

        self.categories.push(category.clone());
        Ok(category)
    }

    pub fn rename_category(&mut self, id: &str, name: &str) -> DomainResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidInput("Category name is empty".to_string()));
        }
        let index = self.category_index(id)?;
        self.categories[index].name = name.to_string();
        Ok(self.categories[index].clone())
    }

    /// Delete a category with all of its memos.
    ///
    /// Returns the removed category and how many memos went with it.
    pub fn delete_category(&mut self, id: &str) -> DomainResult<(Category, usize)> {
        if self.bucket.is_bucket(id) {
            return Err(DomainError::InvalidInput(format!("{} cannot be deleted", self.bucket.name)));
        }
        let index = self.category_index(id)?;

        let before = self.memos.len();
        self.memos.retain(|m| !m.is_in(id));
        let removed = before - self.memos.len();

        Ok((self.categories.remove(index), removed))
    }

    pub fn move_category_up(&mut self, id: &str) -> DomainResult<bool> {
        category_order::move_up(&mut self.categories, id, &self.bucket)
    }

    pub fn move_category_down(&mut self, id: &str) -> DomainResult<bool> {
        category_order::move_down(&mut self.categories, id, &self.bucket)
    }

    pub fn categories_for_display(&self) -> Vec<&Category> {
        ordering::sort_categories(&self.categories, &self.bucket)
    }

    pub fn find_category(&self, id: &str) -> Option<&Category> {
        find_by_id(&self.categories, id)
    }

    fn category_index(&self, id: &str) -> DomainResult<usize> {
        position_of(&self.categories, id).ok_or_else(|| DomainError::UnknownCategory(id.to_string()))
    }

    // ========================
    // Clipboard buttons
    // ========================

    pub fn add_clipboard_button(&mut self, title: &str, content: &str) -> DomainResult<ClipboardButton> {
        if title.trim().is_empty() || content.is_empty() {
            return Err(DomainError::InvalidInput("Clipboard button needs a title and content".to_string()));
        }
        let color = palette_color(self.clipboard_buttons.len()).to_string();
        let button = ClipboardButton::new(new_id(), title.trim().to_string(), content.to_string(), color);
        self.clipboard_buttons.push(button.clone());
        Ok(button)
    }

    pub fn update_clipboard_button(
        &mut self,
        id: &str,
        title: Option<&str>,
        content: Option<&str>,
        color: Option<&str>,
    ) -> DomainResult<ClipboardButton> {
        let index = position_of(&self.clipboard_buttons, id)
            .ok_or_else(|| DomainError::NotFound(format!("Clipboard button {} not found", id)))?;
        if title.is_some_and(|t| t.trim().is_empty()) {
            return Err(DomainError::InvalidInput("Clipboard button title is empty".to_string()));
        }

        let button = &mut self.clipboard_buttons[index];
        if let Some(title) = title {
            button.title = title.trim().to_string();
        }
        if let Some(content) = content {
            button.content = content.to_string();
        }
        if let Some(color) = color {
            button.color = color.to_string();
        }
        Ok(button.clone())
    }

    pub fn delete_clipboard_button(&mut self, id: &str) -> DomainResult<ClipboardButton> {
        let index = position_of(&self.clipboard_buttons, id)
            .ok_or_else(|| DomainError::NotFound(format!("Clipboard button {} not found", id)))?;
        Ok(self.clipboard_buttons.remove(index))
    }

    pub fn clipboard_buttons(&self) -> &[ClipboardButton] {
        &self.clipboard_buttons
    }

    // ========================
    // Backup
    // ========================

    pub fn export_backup(&self, now: i64) -> Backup {
        backup::export_backup(&self.categories, &self.memos, &self.clipboard_buttons, now)
    }

    /// Replace every collection with the backup's, then normalize
    pub fn restore(&mut self, parsed: ParsedBackup, now: i64) -> MigrationReport {
        let (restored, report) = Self::from_stored(parsed.into_stored(), self.bucket.clone(), now);
        *self = restored;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::validate_backup;

    fn book() -> MemoBook {
        MemoBook::new(DefaultBucket::default(), 0)
    }

    fn titles(memos: &[&Memo]) -> Vec<String> {
        memos.iter().map(|m| m.title.clone()).collect()
    }

    #[test]
    fn test_add_memo_appends_in_bucket() {
        let mut book = book();
        let a = book.add_memo("first\nbody", None, 10).unwrap();
        let b = book.add_memo("second", Some("in-box"), 11).unwrap();

        assert_eq!(a.title, "first");
        assert_eq!(a.category_id, "in-box");
        assert_eq!((a.order, b.order), (1, 2));
        assert_eq!(titles(&book.memos_for_display("in-box")), vec!["first", "second"]);
    }

    #[test]
    fn test_add_memo_validation() {
        let mut book = book();
        assert!(matches!(book.add_memo("   ", None, 1), Err(DomainError::InvalidInput(_))));
        assert!(matches!(book.add_memo("x", Some("nope"), 1), Err(DomainError::UnknownCategory(_))));
        assert!(book.memos().is_empty());
    }

    #[test]
    fn test_edit_moves_to_end_of_target() {
        let mut book = book();
        let work = book.add_category("Work", 1).unwrap();
        book.add_memo("w1", Some(&work.id), 2).unwrap();
        book.add_memo("w2", Some(&work.id), 3).unwrap();
        let memo = book.add_memo("inbox", None, 4).unwrap();

        let edited = book.edit_memo(&memo.id, "moved\ntext", Some(&work.id), 5).unwrap();
        assert_eq!(edited.category_id, work.id);
        assert_eq!(edited.order, 3);
        assert_eq!(edited.title, "moved");
        assert_eq!(edited.updated_at, Some(5));
        assert_eq!(titles(&book.memos_for_display(&work.id)), vec!["w1", "w2", "moved"]);
    }

    #[test]
    fn test_edit_pinned_keeps_pin_time() {
        let mut book = book();
        let work = book.add_category("Work", 1).unwrap();
        let memo = book.add_memo("pinned", None, 2).unwrap();
        book.toggle_pin(&memo.id, 50).unwrap();

        let edited = book.edit_memo(&memo.id, "pinned", Some(&work.id), 60).unwrap();
        assert!(edited.pinned);
        assert_eq!(edited.pinned_at, Some(50));
        assert_eq!(edited.category_id, work.id);
    }

    #[test]
    fn test_edit_into_unknown_category() {
        let mut book = book();
        let memo = book.add_memo("a", None, 1).unwrap();
        assert!(matches!(
            book.edit_memo(&memo.id, "b", Some("ghost"), 2),
            Err(DomainError::UnknownCategory(_))
        ));
        assert_eq!(book.find_memo(&memo.id).unwrap().content, "a");
    }

    #[test]
    fn test_delete_guard_and_not_found() {
        let mut book = book();
        let pinned = book.add_memo("pinned", None, 1).unwrap();
        let plain = book.add_memo("plain", None, 2).unwrap();
        book.toggle_pin(&pinned.id, 3);

        assert_eq!(book.delete_memo(&pinned.id), Err(DomainError::Pinned(pinned.id.clone())));
        assert!(matches!(book.delete_memo("ghost"), Err(DomainError::NotFound(_))));

        let before = book.find_memo(&pinned.id).unwrap().clone();
        book.delete_memo(&plain.id).unwrap();
        assert_eq!(book.memos().len(), 1);
        let after = book.find_memo(&pinned.id).unwrap();
        assert!(after.pinned);
        assert_eq!(after.order, before.order);
        assert_eq!(after.pinned_at, Some(3));
        assert_eq!(*after, before);
    }

    #[test]
    fn test_content_is_trimmed() {
        let mut book = book();
        let memo = book.add_memo("\n  Groceries\nmilk  \n\n", None, 1).unwrap();
        assert_eq!(memo.content, "Groceries\nmilk");
        assert_eq!(memo.title, "Groceries");

        let edited = book.edit_memo(&memo.id, "   \tTodo\n- call back   ", None, 2).unwrap();
        assert_eq!(edited.content, "Todo\n- call back");
        assert_eq!(edited.title, "Todo");
    }

    #[test]
    fn test_add_after_restore_with_max_orders() {
        let parsed = validate_backup(
            r#"{
                "memos": [{"id":"a","content":"old","categoryId":"work","order":9223372036854775807}],
                "categories": [
                    {"id":"in-box","name":"IN-BOX","order":0},
                    {"id":"work","name":"Work","order":9223372036854775807}
                ]
            }"#,
        )
        .unwrap();
        let mut book = book();
        book.restore(parsed, 1);

        let memo = book.add_memo("next", Some("work"), 2).unwrap();
        assert_eq!(memo.order, 2);
        assert_eq!(titles(&book.memos_for_display("work")), vec!["old", "next"]);

        let category = book.add_category("Later", 3).unwrap();
        assert_eq!(category.order, 2);
        let names: Vec<&str> = book.categories_for_display().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["IN-BOX", "Work", "Later"]);
    }

    #[test]
    fn test_bookmark_set_and_clear() {
        let mut book = book();
        let memo = book.add_memo("long read", None, 1).unwrap();

        assert!(book.toggle_bookmark(&memo.id, Some(320.5)).unwrap().has_bookmark());
        assert!(!book.toggle_bookmark(&memo.id, None).unwrap().has_bookmark());
        assert!(matches!(
            book.toggle_bookmark(&memo.id, Some(-1.0)),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_search_follows_display_order() {
        let mut book = book();
        let work = book.add_category("Work", 1).unwrap();
        book.add_memo("Shopping list\nApples", None, 2).unwrap();
        book.add_memo("report draft", Some(&work.id), 3).unwrap();
        let pinned = book.add_memo("apple pie recipe", None, 4).unwrap();
        book.toggle_pin(&pinned.id, 5);

        let found = titles(&book.search("APPLE"));
        assert_eq!(found, vec!["apple pie recipe", "Shopping list"]);
        assert!(book.search("  ").is_empty());
    }

    #[test]
    fn test_add_category_order_and_color() {
        let mut book = book();
        let a = book.add_category("  A  ", 1).unwrap();
        let b = book.add_category("B", 2).unwrap();

        assert_eq!(a.name, "A");
        assert_eq!((a.order, b.order), (1, 2));
        assert_eq!(a.color, palette_color(1));
        assert_eq!(b.color, palette_color(2));
        assert!(matches!(book.add_category("", 3), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_rename_keeps_everything_else() {
        let mut book = book();
        let a = book.add_category("A", 1).unwrap();
        let renamed = book.rename_category(&a.id, "Alpha").unwrap();
        assert_eq!(renamed, Category { name: "Alpha".into(), ..a });
        assert_eq!(book.rename_category("in-box", "Inbox").unwrap().order, 0);
    }

    #[test]
    fn test_delete_category_cascades() {
        let mut book = book();
        let work = book.add_category("Work", 1).unwrap();
        book.add_memo("a", Some(&work.id), 2).unwrap();
        book.add_memo("b", Some(&work.id), 3).unwrap();
        book.add_memo("keep", None, 4).unwrap();

        let (removed, cascaded) = book.delete_category(&work.id).unwrap();
        assert_eq!(removed.id, work.id);
        assert_eq!(cascaded, 2);
        assert_eq!(book.memos().len(), 1);
        assert!(matches!(book.delete_category("in-box"), Err(DomainError::InvalidInput(_))));
        assert!(matches!(book.delete_category("ghost"), Err(DomainError::UnknownCategory(_))));
    }

    #[test]
    fn test_category_moves() {
        let mut book = book();
        let a = book.add_category("A", 1).unwrap();
        let b = book.add_category("B", 2).unwrap();

        assert!(book.move_category_up(&b.id).unwrap());
        let names: Vec<&str> = book.categories_for_display().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["IN-BOX", "B", "A"]);
        assert!(!book.move_category_down(&a.id).unwrap());
    }

    #[test]
    fn test_clipboard_buttons() {
        let mut book = book();
        let first = book.add_clipboard_button("mail", "me@example.com").unwrap();
        let second = book.add_clipboard_button("phone", "555").unwrap();
        assert_eq!(first.color, palette_color(0));
        assert_eq!(second.color, palette_color(1));

        let updated = book.update_clipboard_button(&first.id, None, Some("you@example.com"), None).unwrap();
        assert_eq!(updated.title, "mail");
        assert_eq!(updated.content, "you@example.com");

        book.delete_clipboard_button(&second.id).unwrap();
        assert_eq!(book.clipboard_buttons().len(), 1);
        assert!(matches!(book.delete_clipboard_button("ghost"), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn test_backup_round_trip_restores_without_orphans() {
        let mut source = book();
        let work = source.add_category("Work", 1).unwrap();
        for i in 0..4 {
            source.add_memo(&format!("memo {}", i), Some(&work.id), i).unwrap();
        }
        source.add_memo("inbox memo", None, 9).unwrap();
        let json = source.export_backup(100).to_json().unwrap();

        let parsed = validate_backup(&json).unwrap();
        assert_eq!(parsed.summary().memos, 5);

        let mut target = book();
        target.add_memo("will be replaced", None, 1).unwrap();
        let report = target.restore(parsed, 200);

        assert!(report.is_empty());
        assert_eq!(target.memos().len(), 5);
        assert_eq!(target.memos_for_display(&work.id).len(), 4);
        for memo in target.memos() {
            assert!(target.find_category(&memo.category_id).is_some());
        }
    }

    #[test]
    fn test_restore_without_categories_uses_bucket() {
        let parsed = validate_backup(r#"{"memos":[{"id":"1700000000000","content":"legacy","categoryId":"old"}]}"#).unwrap();
        let mut book = book();
        let report = book.restore(parsed, 7);

        assert!(report.bucket_created);
        assert_eq!(report.orphans_reassigned, 1);
        assert_eq!(book.memos()[0].category_id, "in-box");
        assert_eq!(book.memos()[0].created_at, 1700000000000);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut original = book();
        original.add_category("Work", 1).unwrap();
        original.add_memo("x", None, 2).unwrap();
        original.add_clipboard_button("t", "c").unwrap();

        let (restored, report) = MemoBook::from_stored(original.snapshot(), DefaultBucket::default(), 99);
        assert!(report.is_empty());
        assert_eq!(restored.categories(), original.categories());
        assert_eq!(restored.memos(), original.memos());
        assert_eq!(restored.clipboard_buttons(), original.clipboard_buttons());
    }
}
