//! Edit History
//!
//! Bounded linear undo/redo stack of content snapshots.

use std::collections::VecDeque;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct EditHistory {
    entries: VecDeque<String>,
    cursor: usize,
    limit: usize,
}

impl EditHistory {
    /// Start a history whose current entry is `initial`
    pub fn new(initial: String, limit: usize) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(initial);
        Self {
            entries,
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Record a new current value.
    ///
    /// Drops the redo tail, and the oldest entry once over the limit.
    /// A value equal to the current entry is ignored.
    pub fn record(&mut self, content: String) {
        if self.current() == Some(content.as_str()) {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(content);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
    }

    pub fn undo(&mut self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.current()
    }

    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.current()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_walk() {
        let mut history = EditHistory::new("a".into(), 10);
        history.record("b".into());
        history.record("c".into());

        assert_eq!(history.undo(), Some("b"));
        assert_eq!(history.undo(), Some("a"));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), Some("b"));
        assert_eq!(history.redo(), Some("c"));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_record_truncates_redo_tail() {
        let mut history = EditHistory::new("a".into(), 10);
        history.record("b".into());
        history.undo();
        history.record("z".into());

        assert!(!history.can_redo());
        assert_eq!(history.undo(), Some("a"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_duplicate_record_is_ignored() {
        let mut history = EditHistory::new("a".into(), 10);
        history.record("a".into());
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = EditHistory::new("0".into(), DEFAULT_HISTORY_LIMIT);
        for i in 1..=60 {
            history.record(i.to_string());
        }
        assert_eq!(history.len(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(history.current(), Some("60"));

        let mut oldest = None;
        while let Some(value) = history.undo() {
            oldest = Some(value.to_string());
        }
        assert_eq!(oldest.as_deref(), Some("11"));
    }
}
