//! Memo Service
//!
//! Owns the last confirmed `MemoBook`. Every mutation runs on a draft copy;
//! the draft only replaces the confirmed book once the store accepted it.
//! A failed write leaves the confirmed book untouched and surfaces as
//! `StorageFailure`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{Category, ClipboardButton, DefaultBucket, DomainError, DomainResult, EditHistory, Memo};
use crate::engine::{Backup, MemoBook, MigrationReport, ParsedBackup, ReorderStrategy};
use crate::repository::RecordStore;

pub struct MemoService {
    store: Arc<dyn RecordStore>,
    book: MemoBook,
    histories: HashMap<String, EditHistory>,
    history_limit: usize,
}

impl MemoService {
    /// Load, normalize and, when legacy records were fixed up, persist them
    pub async fn open(
        store: Arc<dyn RecordStore>,
        bucket: DefaultBucket,
        history_limit: usize,
        now: i64,
    ) -> DomainResult<Self> {
        let stored = store.load().await?;
        let (book, report) = MemoBook::from_stored(stored, bucket, now);

        let mut service = Self {
            store,
            book: book.clone(),
            histories: HashMap::new(),
            history_limit,
        };

        if !report.is_empty() {
            log::info!("Normalized stored records: {}", report);
            service.persist(book).await?;
        }
        Ok(service)
    }

    /// Last confirmed state
    pub fn book(&self) -> &MemoBook {
        &self.book
    }

    async fn persist(&mut self, draft: MemoBook) -> DomainResult<()> {
        match self.store.save_all(&draft.snapshot()).await {
            Ok(()) => {
                self.book = draft;
                Ok(())
            }
            Err(e) => {
                log::error!("Save failed, keeping last confirmed state: {}", e);
                Err(match e {
                    DomainError::StorageFailure(msg) => DomainError::StorageFailure(msg),
                    other => DomainError::StorageFailure(other.to_string()),
                })
            }
        }
    }

    /// Apply `op` to a draft and persist it when `changed` says so
    async fn commit_with<T>(
        &mut self,
        op: impl FnOnce(&mut MemoBook) -> DomainResult<T>,
        changed: impl FnOnce(&T) -> bool,
    ) -> DomainResult<T> {
        let mut draft = self.book.clone();
        let out = op(&mut draft)?;
        if changed(&out) {
            self.persist(draft).await?;
        }
        Ok(out)
    }

    async fn commit<T>(&mut self, op: impl FnOnce(&mut MemoBook) -> DomainResult<T>) -> DomainResult<T> {
        self.commit_with(op, |_| true).await
    }

    // ========================
    // Memos
    // ========================

    pub async fn add_memo(&mut self, content: &str, category_id: Option<&str>, now: i64) -> DomainResult<Memo> {
        let memo = self.commit(|book| book.add_memo(content, category_id, now)).await?;
        log::info!("Added memo {} to {}", memo.id, memo.category_id);
        Ok(memo)
    }

    /// Edit content (and optionally category), recording the edit history
    pub async fn edit_memo(
        &mut self,
        id: &str,
        content: &str,
        category_id: Option<&str>,
        now: i64,
    ) -> DomainResult<Memo> {
        let previous = self
            .book
            .find_memo(id)
            .map(|m| m.content.clone())
            .ok_or_else(|| DomainError::NotFound(format!("Memo {} not found", id)))?;

        let memo = self.commit(|book| book.edit_memo(id, content, category_id, now)).await?;

        let limit = self.history_limit;
        self.histories
            .entry(id.to_string())
            .or_insert_with(|| EditHistory::new(previous, limit))
            .record(memo.content.clone());
        Ok(memo)
    }

    /// Restore the previous content. `None` when there is nothing to undo.
    pub async fn undo_edit(&mut self, id: &str, now: i64) -> DomainResult<Option<Memo>> {
        self.step_history(id, now, true).await
    }

    pub async fn redo_edit(&mut self, id: &str, now: i64) -> DomainResult<Option<Memo>> {
        self.step_history(id, now, false).await
    }

    async fn step_history(&mut self, id: &str, now: i64, back: bool) -> DomainResult<Option<Memo>> {
        let Some(history) = self.histories.get_mut(id) else {
            return Ok(None);
        };
        let step = if back { history.undo() } else { history.redo() };
        let Some(content) = step.map(str::to_string) else {
            return Ok(None);
        };

        let result = self.commit(|book| book.edit_memo(id, &content, None, now)).await;
        if result.is_err() {
            if let Some(history) = self.histories.get_mut(id) {
                if back {
                    history.redo();
                } else {
                    history.undo();
                }
            }
        }
        result.map(Some)
    }

    pub fn can_undo(&self, id: &str) -> bool {
        self.histories.get(id).is_some_and(EditHistory::can_undo)
    }

    pub fn can_redo(&self, id: &str) -> bool {
        self.histories.get(id).is_some_and(EditHistory::can_redo)
    }

    pub async fn delete_memo(&mut self, id: &str) -> DomainResult<Memo> {
        let memo = self.commit(|book| book.delete_memo(id)).await?;
        self.histories.remove(id);
        log::info!("Deleted memo {}", id);
        Ok(memo)
    }

    /// Pin or unpin. Unknown ids are ignored without a write.
    pub async fn toggle_pin(&mut self, id: &str, now: i64) -> DomainResult<Option<Memo>> {
        self.commit_with(|book| Ok(book.toggle_pin(id, now)), Option::is_some).await
    }

    pub async fn reorder_memos(&mut self, category_id: &str, ordered_ids: &[String]) -> DomainResult<usize> {
        let placed = self
            .commit_with(|book| book.reorder_memos(category_id, ordered_ids), |n| *n > 0)
            .await?;
        log::debug!(
            "Reordered {} memos in {} ({:?})",
            placed,
            category_id,
            ReorderStrategy::FullRenumber
        );
        Ok(placed)
    }

    pub async fn toggle_bookmark(&mut self, id: &str, position: Option<f64>) -> DomainResult<Memo> {
        self.commit(|book| book.toggle_bookmark(id, position)).await
    }

    // ========================
    // Categories
    // ========================

    pub async fn add_category(&mut self, name: &str, now: i64) -> DomainResult<Category> {
        self.commit(|book| book.add_category(name, now)).await
    }

    pub async fn rename_category(&mut self, id: &str, name: &str) -> DomainResult<Category> {
        self.commit(|book| book.rename_category(id, name)).await
    }

    pub async fn delete_category(&mut self, id: &str) -> DomainResult<(Category, usize)> {
        let (category, cascaded) = self.commit(|book| book.delete_category(id)).await?;
        let book = &self.book;
        self.histories.retain(|memo_id, _| book.find_memo(memo_id).is_some());
        log::info!("Deleted category {} with {} memos", category.id, cascaded);
        Ok((category, cascaded))
    }

    pub async fn move_category_up(&mut self, id: &str) -> DomainResult<bool> {
        self.commit_with(|book| book.move_category_up(id), |moved| *moved).await
    }

    pub async fn move_category_down(&mut self, id: &str) -> DomainResult<bool> {
        self.commit_with(|book| book.move_category_down(id), |moved| *moved).await
    }

    // ========================
    // Clipboard buttons
    // ========================

    pub async fn add_clipboard_button(&mut self, title: &str, content: &str) -> DomainResult<ClipboardButton> {
        self.commit(|book| book.add_clipboard_button(title, content)).await
    }

    pub async fn update_clipboard_button(
        &mut self,
        id: &str,
        title: Option<&str>,
        content: Option<&str>,
        color: Option<&str>,
    ) -> DomainResult<ClipboardButton> {
        self.commit(|book| book.update_clipboard_button(id, title, content, color)).await
    }

    pub async fn delete_clipboard_button(&mut self, id: &str) -> DomainResult<ClipboardButton> {
        self.commit(|book| book.delete_clipboard_button(id)).await
    }

    // ========================
    // Backup
    // ========================

    pub fn export_backup(&self, now: i64) -> Backup {
        self.book.export_backup(now)
    }

    /// Replace everything with a validated backup
    pub async fn restore(&mut self, parsed: ParsedBackup, now: i64) -> DomainResult<MigrationReport> {
        let summary = parsed.summary();
        let report = self.commit(|book| Ok(book.restore(parsed, now))).await?;
        self.histories.clear();
        log::info!("Restored backup: {}; normalized: {}", summary, report);
        Ok(report)
    }
}
